pub mod comment;
pub mod project;
pub mod task;
pub mod user;

pub use comment::CommentRepository;
pub use project::ProjectRepository;
pub use task::TaskRepository;
pub use user::UserRepository;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::AppResult;

/// Base repository trait for entities addressable by bare id.
///
/// Tasks and comments are deliberately absent: they only support scoped
/// lookups (id + parent id) and expose inherent methods instead.
#[async_trait]
pub trait Repository<T>
where
    T: Send + Sync,
{
    /// Find entity by ID
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<T>;

    /// Delete entity by ID
    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()>;
}
