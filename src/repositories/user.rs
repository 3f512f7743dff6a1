use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::entity::user::{self, ActiveModel, Column, Entity as UserEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, User};
use crate::repositories::Repository;

/// User repository for database operations
pub struct UserRepository;

#[async_trait]
impl Repository<User> for UserRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<User> {
        let model = UserEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        let result = UserEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("User".to_string()));
        }

        Ok(())
    }
}

impl UserRepository {
    /// Create a new user. The email must not already be registered
    /// (exact, case-sensitive match).
    pub async fn create(
        db: &DatabaseConnection,
        input: &CreateUser,
        password_hash: &str,
    ) -> AppResult<User> {
        if Self::find_by_email_opt(db, &input.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            password_hash: Set(password_hash.to_string()),
            name: Set(input.name.clone()),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        // Concurrent registrations can still race past the pre-check;
        // the unique index surfaces those as a Conflict too.
        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("unique") {
                AppError::Conflict("Email already registered".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Find user by email (for login)
    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> AppResult<User> {
        Self::find_by_email_opt(db, email)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))
    }

    async fn find_by_email_opt(db: &DatabaseConnection, email: &str) -> AppResult<Option<User>> {
        let model = UserEntity::find()
            .filter(Column::Email.eq(email))
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }
}

// Conversion from SeaORM model to our domain model
impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            password_hash: m.password_hash,
            name: m.name,
            created_at: m.created_at,
        }
    }
}
