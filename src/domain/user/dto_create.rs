/// New user row. The password is already hashed at this point.
#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub username: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub hashed_password: String,
}
