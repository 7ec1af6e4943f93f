use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::shared::{DomainResult, PageParams};

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self, page: PageParams) -> DomainResult<Vec<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn count_users(&self) -> DomainResult<u64>;
}
