use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::task::{self, ActiveModel, Column, Entity as TaskEntity};
use crate::error::{AppError, AppResult};
use crate::models::{CreateTask, Task, TaskFilter, TaskStatus, UpdateTask};

/// Task repository. Every read and write is scoped by project id: a task id
/// that exists under another project behaves exactly like a missing task.
pub struct TaskRepository;

impl TaskRepository {
    /// Create a new task in a project. Status always starts at `todo`;
    /// it is only settable through the update and status operations.
    pub async fn create(
        db: &DatabaseConnection,
        project_id: Uuid,
        input: &CreateTask,
    ) -> AppResult<Task> {
        let now = time::OffsetDateTime::now_utc();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            title: Set(input.title.clone()),
            description: Set(input.description.clone()),
            status: Set(TaskStatus::Todo),
            priority: Set(input.priority),
            project_id: Set(project_id),
            assignee_id: Set(input.assignee_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result.into())
    }

    /// List a project's tasks with optional equality filters and an
    /// allow-listed sort.
    ///
    /// Unknown `sort_by` values silently fall back to `created_at`; any
    /// direction other than exactly "asc" (absent, uppercase, typo) sorts
    /// descending. Tie order is whatever the database gives us.
    pub async fn list_by_project(
        db: &DatabaseConnection,
        project_id: Uuid,
        filter: &TaskFilter,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> AppResult<Vec<Task>> {
        let mut query = TaskEntity::find().filter(Column::ProjectId.eq(project_id));

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(Column::Priority.eq(priority));
        }
        if let Some(assignee_id) = filter.assignee_id {
            query = query.filter(Column::AssigneeId.eq(assignee_id));
        }

        let sort_column = match sort_by.unwrap_or("created_at") {
            "updated_at" => Column::UpdatedAt,
            "title" => Column::Title,
            "priority" => Column::Priority,
            "status" => Column::Status,
            _ => Column::CreatedAt,
        };

        let query = match sort_order {
            Some("asc") => query.order_by_asc(sort_column),
            _ => query.order_by_desc(sort_column),
        };

        let models = query.all(db).await?;
        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Scoped lookup: both the task id and the project id must match
    pub async fn find_by_id_in_project(
        db: &DatabaseConnection,
        task_id: Uuid,
        project_id: Uuid,
    ) -> AppResult<Task> {
        let model = Self::find_model(db, task_id, project_id).await?;
        Ok(model.into())
    }

    /// Partial update; touches `updated_at`
    pub async fn update_in_project(
        db: &DatabaseConnection,
        task_id: Uuid,
        project_id: Uuid,
        input: &UpdateTask,
    ) -> AppResult<Task> {
        let model = Self::find_model(db, task_id, project_id).await?;

        let mut active: ActiveModel = model.into();

        if let Some(title) = &input.title {
            active.title = Set(title.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(description.clone());
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }
        if let Some(priority) = input.priority {
            active.priority = Set(priority);
        }
        // Present-and-null clears the assignee; an absent field leaves it alone
        if let Some(assignee_id) = input.assignee_id {
            active.assignee_id = Set(assignee_id);
        }
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Set the status field only; touches `updated_at`.
    /// Any status is reachable from any other: there is no transition graph.
    pub async fn update_status_in_project(
        db: &DatabaseConnection,
        task_id: Uuid,
        project_id: Uuid,
        status: TaskStatus,
    ) -> AppResult<Task> {
        let model = Self::find_model(db, task_id, project_id).await?;

        let mut active: ActiveModel = model.into();
        active.status = Set(status);
        active.updated_at = Set(time::OffsetDateTime::now_utc());

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Delete a task; its comments go with it through ON DELETE CASCADE
    pub async fn delete_in_project(
        db: &DatabaseConnection,
        task_id: Uuid,
        project_id: Uuid,
    ) -> AppResult<()> {
        let model = Self::find_model(db, task_id, project_id).await?;

        let active: ActiveModel = model.into();
        active.delete(db).await?;

        Ok(())
    }

    async fn find_model(
        db: &DatabaseConnection,
        task_id: Uuid,
        project_id: Uuid,
    ) -> AppResult<task::Model> {
        TaskEntity::find_by_id(task_id)
            .filter(Column::ProjectId.eq(project_id))
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Task".to_string()))
    }
}

// Conversion from SeaORM model to our domain model
impl From<task::Model> for Task {
    fn from(m: task::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            status: m.status,
            priority: m.priority,
            project_id: m.project_id,
            assignee_id: m.assignee_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
