use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};

use crate::domain::{CreateUserDto, DomainError, DomainResult, User, UserRepositoryInterface};
use crate::infrastructure::database::entities::user;
use crate::shared::PageParams;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        full_name: model.full_name,
        hashed_password: model.hashed_password,
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let new_user = user::ActiveModel {
            username: Set(dto.username),
            email: Set(dto.email),
            full_name: Set(dto.full_name),
            hashed_password: Set(dto.hashed_password),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Username already registered".to_string())
            } else {
                DomainError::from(e)
            }
        })?;

        Ok(user_model_to_domain(model))
    }

    async fn list_users(&self, page: PageParams) -> DomainResult<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .offset(page.effective_skip())
            .limit(page.effective_limit())
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn count_users(&self) -> DomainResult<u64> {
        Ok(user::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_connection;

    fn dto(username: &str) -> CreateUserDto {
        CreateUserDto {
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            full_name: None,
            hashed_password: "$2b$04$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_find_by_username() {
        let repo = UserRepository::new(test_connection().await);

        let created = repo.create_user(dto("johndoe")).await.unwrap();
        assert!(created.id > 0);
        assert!(created.is_active);

        let found = repo.get_user_by_username("johndoe").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email.as_deref(), Some("johndoe@example.com"));

        assert!(repo.get_user_by_username("nobody").await.unwrap().is_none());
        assert!(repo.get_user_by_id(created.id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_username_is_a_conflict() {
        let repo = UserRepository::new(test_connection().await);
        repo.create_user(dto("alice")).await.unwrap();

        let err = repo.create_user(dto("alice")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_respects_skip_and_limit() {
        let repo = UserRepository::new(test_connection().await);
        for name in ["u1", "u2", "u3", "u4"] {
            repo.create_user(dto(name)).await.unwrap();
        }

        let page = repo.list_users(PageParams::new(1, 2)).await.unwrap();
        let names: Vec<_> = page.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["u2", "u3"]);
        assert_eq!(repo.count_users().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn offset_past_the_end_is_empty() {
        let repo = UserRepository::new(test_connection().await);
        repo.create_user(dto("alice")).await.unwrap();

        let page = repo
            .list_users(PageParams::new(u64::MAX, 10))
            .await
            .unwrap();
        assert!(page.is_empty());
    }
}
