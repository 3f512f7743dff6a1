use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppResult;
use crate::handlers::{validate_optional, validate_required};
use crate::middlewares::AuthUser;
use crate::models::{
    AddProjectMember, CreateProject, Project, ProjectMember, ProjectRole, UpdateProject,
};
use crate::repositories::{ProjectRepository, Repository};
use crate::services::{require_member, require_role};
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProjectRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddMemberRequest {
    pub user_id: Uuid,
    #[serde(default)]
    pub role: ProjectRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
}

impl From<Project> for ProjectResponse {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            owner_id: p.owner_id,
            created_at: p.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectMemberResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Uuid,
    pub role: ProjectRole,
}

impl From<ProjectMember> for ProjectMemberResponse {
    fn from(m: ProjectMember) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            project_id: m.project_id,
            role: m.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProjectDetailResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub owner_id: Uuid,
    #[schema(value_type = String)]
    pub created_at: time::OffsetDateTime,
    pub members: Vec<ProjectMemberResponse>,
}

// ============ Handlers ============

/// Create a new project (the creator becomes its owner member)
#[utoipa::path(
    post,
    path = "/api/v1/projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn create_project(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<ProjectResponse>)> {
    validate_required(&payload.name, "Name", 200)?;

    let create_project = CreateProject {
        name: payload.name,
        description: payload.description,
    };

    let project = ProjectRepository::create(&state.db, user.id, &create_project).await?;
    Ok((StatusCode::CREATED, Json(project.into())))
}

/// List projects the current user is a member of, newest first
#[utoipa::path(
    get,
    path = "/api/v1/projects",
    responses(
        (status = 200, description = "List of projects", body = [ProjectResponse]),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn list_projects(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ProjectResponse>>> {
    let projects = ProjectRepository::list_by_member(&state.db, user.id).await?;
    Ok(Json(projects.into_iter().map(|p| p.into()).collect()))
}

/// Get a project with its membership list
#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 200, description = "Project details", body = ProjectDetailResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Not a project member"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn get_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProjectDetailResponse>> {
    require_member(&state.db, id, user.id).await?;

    let (project, members) = ProjectRepository::find_with_members(&state.db, id).await?;

    Ok(Json(ProjectDetailResponse {
        id: project.id,
        name: project.name,
        description: project.description,
        owner_id: project.owner_id,
        created_at: project.created_at,
        members: members.into_iter().map(|m| m.into()).collect(),
    }))
}

/// Update a project (owner or admin)
#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated successfully", body = ProjectResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn update_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProjectRequest>,
) -> AppResult<Json<ProjectResponse>> {
    let member = require_member(&state.db, id, user.id).await?;
    require_role(&member, &[ProjectRole::Owner, ProjectRole::Admin])?;

    validate_optional(&payload.name, "Name", 200)?;
    validate_optional(&payload.description, "Description", 2000)?;

    let update_project = UpdateProject {
        name: payload.name,
        description: payload.description,
    };

    let project = ProjectRepository::update(&state.db, id, &update_project).await?;
    Ok(Json(project.into()))
}

/// Delete a project and everything under it (owner only)
#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    responses(
        (status = 204, description = "Project deleted successfully"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Project not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let member = require_member(&state.db, id, user.id).await?;
    require_role(&member, &[ProjectRole::Owner])?;

    ProjectRepository::delete(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a member to a project (owner or admin)
#[utoipa::path(
    post,
    path = "/api/v1/projects/{id}/members",
    params(
        ("id" = Uuid, Path, description = "Project ID")
    ),
    request_body = AddMemberRequest,
    responses(
        (status = 201, description = "Member added successfully", body = ProjectMemberResponse),
        (status = 400, description = "User is already a member"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Insufficient role"),
        (status = 404, description = "Project or user not found")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Projects"
)]
pub async fn add_member(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddMemberRequest>,
) -> AppResult<(StatusCode, Json<ProjectMemberResponse>)> {
    let member = require_member(&state.db, id, user.id).await?;
    require_role(&member, &[ProjectRole::Owner, ProjectRole::Admin])?;

    let add = AddProjectMember {
        user_id: payload.user_id,
        role: payload.role,
    };

    let created = ProjectRepository::add_member(&state.db, id, add.user_id, add.role).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
