use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{ProjectMember, ProjectRole};
use crate::repositories::{ProjectRepository, Repository};

/// Resolve the caller's membership for a project.
///
/// The two lookups run in a fixed order: a missing project is 404 for
/// everyone, while an existing project without a membership row is 403.
/// Any authenticated caller can therefore learn that a project id exists;
/// that leak is documented behavior.
pub async fn require_member(
    db: &DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> AppResult<ProjectMember> {
    ProjectRepository::find_by_id(db, project_id).await?;

    ProjectRepository::find_member(db, project_id, user_id)
        .await?
        .ok_or_else(|| AppError::Forbidden("You are not a member of this project".to_string()))
}

/// Check a membership against the set of roles an operation allows.
pub fn require_role(member: &ProjectMember, allowed: &[ProjectRole]) -> AppResult<()> {
    if allowed.contains(&member.role) {
        return Ok(());
    }

    Err(AppError::Forbidden(
        "Your role does not permit this operation".to_string(),
    ))
}
