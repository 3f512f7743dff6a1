use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::comment::{self, ActiveModel, Column, Entity as CommentEntity};
use crate::error::AppResult;
use crate::models::{Comment, CreateComment};

/// Comment repository for database operations
pub struct CommentRepository;

impl CommentRepository {
    /// Create a comment on a task; the author is the authenticated member
    pub async fn create(
        db: &DatabaseConnection,
        task_id: Uuid,
        author_id: Uuid,
        input: &CreateComment,
    ) -> AppResult<Comment> {
        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            content: Set(input.content.clone()),
            task_id: Set(task_id),
            author_id: Set(author_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// Comments for a task, oldest first.
    /// The ascending order is the opposite of project listing; both are
    /// part of the API contract.
    pub async fn list_by_task(db: &DatabaseConnection, task_id: Uuid) -> AppResult<Vec<Comment>> {
        let models = CommentEntity::find()
            .filter(Column::TaskId.eq(task_id))
            .order_by_asc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

// Conversion from SeaORM model to our domain model
impl From<comment::Model> for Comment {
    fn from(m: comment::Model) -> Self {
        Self {
            id: m.id,
            content: m.content,
            task_id: m.task_id,
            author_id: m.author_id,
            created_at: m.created_at,
        }
    }
}
