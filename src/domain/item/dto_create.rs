#[derive(Debug, Clone)]
pub struct CreateItemDto {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: i32,
}
