use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::validate_required;
use crate::middlewares::AuthUser;
use crate::models::{Comment, CreateComment};
use crate::repositories::{CommentRepository, TaskRepository};
use crate::services::require_member;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub task_id: Uuid,
    pub author_id: Uuid,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Comment> for CommentResponse {
    fn from(c: Comment) -> Self {
        Self {
            id: c.id,
            content: c.content,
            task_id: c.task_id,
            author_id: c.author_id,
            created_at: c.created_at,
        }
    }
}

// ============ Handlers ============

/// Comment on a task (any member); the author is the current user
#[utoipa::path(
    post,
    path = "/api/v1/projects/{project_id}/tasks/{task_id}/comments",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created successfully", body = CommentResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
pub async fn create_comment(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<CommentResponse>)> {
    require_member(&state.db, project_id, user.id).await?;

    validate_required(&payload.content, "Content", 5000)?;

    // The task must live under this project
    TaskRepository::find_by_id_in_project(&state.db, task_id, project_id).await?;

    let create_comment = CreateComment {
        content: payload.content,
    };

    let comment = CommentRepository::create(&state.db, task_id, user.id, &create_comment).await?;
    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// List a task's comments, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/projects/{project_id}/tasks/{task_id}/comments",
    params(
        ("project_id" = Uuid, Path, description = "Project ID"),
        ("task_id" = Uuid, Path, description = "Task ID")
    ),
    responses(
        (status = 200, description = "List of comments", body = [CommentResponse]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Task not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Comments"
)]
pub async fn list_comments(
    user: AuthUser,
    State(state): State<AppState>,
    Path((project_id, task_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<Vec<CommentResponse>>> {
    require_member(&state.db, project_id, user.id).await?;

    TaskRepository::find_by_id_in_project(&state.db, task_id, project_id).await?;

    let comments = CommentRepository::list_by_task(&state.db, task_id).await?;
    Ok(Json(comments.into_iter().map(|c| c.into()).collect()))
}
