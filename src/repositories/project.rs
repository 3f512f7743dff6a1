use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entity::project::{self, ActiveModel, Column, Entity as ProjectEntity};
use crate::entity::project_member::{
    self, ActiveModel as MemberActiveModel, Column as MemberColumn, Entity as MemberEntity,
};
use crate::error::{AppError, AppResult};
use crate::models::{CreateProject, Project, ProjectMember, ProjectRole, UpdateProject};
use crate::repositories::{Repository, UserRepository};

/// Project repository for database operations
pub struct ProjectRepository;

#[async_trait]
impl Repository<Project> for ProjectRepository {
    async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        Ok(model.into())
    }

    async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<()> {
        // Row delete only; memberships, tasks and comments go with it
        // through the ON DELETE CASCADE constraints.
        let result = ProjectEntity::delete_by_id(id).exec(db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Project".to_string()));
        }

        Ok(())
    }
}

impl ProjectRepository {
    /// Create a new project together with its owner membership.
    ///
    /// Both rows are written in one transaction: there is no code path that
    /// produces a project without an owner membership.
    pub async fn create(
        db: &DatabaseConnection,
        owner_id: Uuid,
        input: &CreateProject,
    ) -> AppResult<Project> {
        let txn = db.begin().await?;

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            owner_id: Set(owner_id),
            created_at: Set(time::OffsetDateTime::now_utc()),
        };

        let result = model.insert(&txn).await?;

        let member = MemberActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(owner_id),
            project_id: Set(result.id),
            role: Set(ProjectRole::Owner),
        };

        member.insert(&txn).await?;

        txn.commit().await?;

        Ok(result.into())
    }

    /// List projects the user is a member of, newest first
    pub async fn list_by_member(db: &DatabaseConnection, user_id: Uuid) -> AppResult<Vec<Project>> {
        let models = ProjectEntity::find()
            .join(JoinType::InnerJoin, project::Relation::Members.def())
            .filter(MemberColumn::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }

    /// Project with its full membership list, for detail views
    pub async fn find_with_members(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> AppResult<(Project, Vec<ProjectMember>)> {
        let project = Self::find_by_id(db, id).await?;
        let members = Self::list_members(db, id).await?;

        Ok((project, members))
    }

    /// Partial update: only fields present in the input are applied
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        input: &UpdateProject,
    ) -> AppResult<Project> {
        let model = ProjectEntity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::NotFound("Project".to_string()))?;

        let mut active: ActiveModel = model.into();

        if let Some(name) = &input.name {
            active.name = Set(name.clone());
        }
        if let Some(description) = &input.description {
            active.description = Set(description.clone());
        }

        let result = active.update(db).await?;
        Ok(result.into())
    }

    /// Add a member to a project.
    /// Fails NotFound for an unknown user and Conflict when the
    /// (user, project) membership already exists.
    pub async fn add_member(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
        role: ProjectRole,
    ) -> AppResult<ProjectMember> {
        UserRepository::find_by_id(db, user_id).await?;

        if Self::find_member(db, project_id, user_id).await?.is_some() {
            return Err(AppError::Conflict(
                "User is already a member of this project".to_string(),
            ));
        }

        let model = MemberActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            project_id: Set(project_id),
            role: Set(role),
        };

        // The unique (user_id, project_id) constraint catches concurrent adds
        let result = model.insert(db).await.map_err(|e| {
            if e.to_string().contains("duplicate key") || e.to_string().contains("unique") {
                AppError::Conflict("User is already a member of this project".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })?;

        Ok(result.into())
    }

    /// Membership row for (project, user), if any
    pub async fn find_member(
        db: &DatabaseConnection,
        project_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Option<ProjectMember>> {
        let model = MemberEntity::find()
            .filter(MemberColumn::ProjectId.eq(project_id))
            .filter(MemberColumn::UserId.eq(user_id))
            .one(db)
            .await?;

        Ok(model.map(|m| m.into()))
    }

    /// All memberships of a project
    pub async fn list_members(
        db: &DatabaseConnection,
        project_id: Uuid,
    ) -> AppResult<Vec<ProjectMember>> {
        let models = MemberEntity::find()
            .filter(MemberColumn::ProjectId.eq(project_id))
            .all(db)
            .await?;

        Ok(models.into_iter().map(|m| m.into()).collect())
    }
}

// Conversion from SeaORM models to our domain models
impl From<project::Model> for Project {
    fn from(m: project::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            owner_id: m.owner_id,
            created_at: m.created_at,
        }
    }
}

impl From<project_member::Model> for ProjectMember {
    fn from(m: project_member::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            project_id: m.project_id,
            role: m.role,
        }
    }
}
