use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{validate_optional, validate_required};
use crate::middlewares::AuthUser;
use crate::models::{CreateTask, Task, TaskFilter, TaskPriority, TaskStatus, UpdateTask};
use crate::repositories::TaskRepository;
use crate::services::require_member;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: TaskPriority,
    pub assignee_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// `null` clears the assignee; leaving the field out keeps it
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub assignee_id: Option<Option<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateTaskStatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TaskListParams {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<Uuid>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    #[schema(value_type = String)]
    pub updated_at: time::OffsetDateTime,
}

impl From<Task> for TaskResponse {
    fn from(t: Task) -> Self {
        Self {
            id: t.id,
            title: t.title,
            description: t.description,
            status: t.status,
            priority: t.priority,
            project_id: t.project_id,
            assignee_id: t.assignee_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

// Distinguishes an absent field from an explicit null
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Uuid>::deserialize(deserializer).map(Some)
}

// ============ Handlers ============

/// Create a task in a project (any member). New tasks always start as todo.
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/tasks",
    params(
        ("project_id" = Uuid, Path, description = "Project ID")
    ),
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created successfully", body = TaskResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Project not found"),
        (status = 422, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Json(payload): Json<CreateTaskRequest>,
) -> AppResult<(StatusCode, Json<TaskResponse>)> {
    require_member(&state.db, project_id, user.id).await?;

    validate_required(&payload.title, "Title", 300)?;

    let create_task = CreateTask {
        title: payload.title,
        description: payload.description,
        priority: payload.priority,
        assignee_id: payload.assignee_id,
    };

    let task = TaskRepository::create(&state.db, project_id, &create_task).await?;
    Ok((StatusCode::CREATED, Json(task.into())))
}

/// List a project's tasks with optional filters and sorting
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tasks",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        TaskListParams
    ),
    responses(
        (status = 200, description = "List of tasks", body = [TaskResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn list_tasks(
    user: AuthUser,
    State(state): State<AppState>,
    Path(project_id): Path<Uuid>,
    Query(params): Query<TaskListParams>,
) -> AppResult<Json<Vec<TaskResponse>>> {
    require_member(&state.db, project_id, user.id).await?;

    let filter = TaskFilter {
        status: params.status,
        priority: params.priority,
        assignee_id: params.assignee_id,
    };

    let tasks = TaskRepository::list_by_project(
        &state.db,
        project_id,
        &filter,
        params.sort_by.as_deref(),
        params.sort_order.as_deref(),
    )
    .await?;

    Ok(Json(tasks.into_iter().map(|t| t.into()).collect()))
}

/// Get a task by ID within a project
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tasks/{task_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "Task details", body = TaskResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn get_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<TaskResponse>> {
    require_member(&state.db, project_id, user.id).await?;

    let task = TaskRepository::find_by_id_in_project(&state.db, task_id, project_id).await?;
    Ok(Json(task.into()))
}

/// Update a task (partial)
#[utoipa::path(
    put,
    path = "/api/v1/projects/{project_id}/tasks/{task_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTaskRequest>,
) -> AppResult<Json<TaskResponse>> {
    require_member(&state.db, project_id, user.id).await?;

    validate_optional(&payload.title, "Title", 300)?;
    validate_optional(&payload.description, "Description", 5000)?;

    let update_task = UpdateTask {
        title: payload.title,
        description: payload.description,
        status: payload.status,
        priority: payload.priority,
        assignee_id: payload.assignee_id,
    };

    let task =
        TaskRepository::update_in_project(&state.db, task_id, project_id, &update_task).await?;
    Ok(Json(task.into()))
}

/// Set a task's status. Any status can be set from any other.
#[utoipa::path(
    patch,
    path = "/api/v1/projects/{project_id}/tasks/{task_id}/status",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = UpdateTaskStatusRequest,
    responses(
        (status = 200, description = "Task status updated", body = TaskResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn update_task_status(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<UpdateTaskStatusRequest>,
) -> AppResult<Json<TaskResponse>> {
    require_member(&state.db, project_id, user.id).await?;

    let task =
        TaskRepository::update_status_in_project(&state.db, task_id, project_id, payload.status)
            .await?;
    Ok(Json(task.into()))
}

/// Delete a task and its comments
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{project_id}/tasks/{task_id}",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Tasks"
)]
pub async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> AppResult<StatusCode> {
    require_member(&state.db, project_id, user.id).await?;

    TaskRepository::delete_in_project(&state.db, task_id, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
