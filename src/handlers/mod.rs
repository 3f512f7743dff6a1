pub mod auth;
pub mod comment;
pub mod common;
pub mod health;
pub mod project;
pub mod task;

pub use auth::{login, me, register, LoginRequest, LoginResponse, RegisterRequest, TokenResponse};
pub use comment::{create_comment, list_comments, CommentResponse, CreateCommentRequest};
pub use common::{validate_email, validate_optional, validate_required};
pub use health::{health_check, health_check_db, HealthResponse};
pub use project::{
    add_member, create_project, delete_project, get_project, list_projects, update_project,
    AddMemberRequest, CreateProjectRequest, ProjectDetailResponse, ProjectMemberResponse,
    ProjectResponse, UpdateProjectRequest,
};
pub use task::{
    create_task, delete_task, get_task, list_tasks, update_task, update_task_status,
    CreateTaskRequest, TaskListParams, TaskResponse, UpdateTaskRequest, UpdateTaskStatusRequest,
};
