/// Project service
///
/// Project creation resolves the acting user by username to assign
/// ownership; membership management keeps the project/user pair unique
/// and checks both sides exist before inserting.

use crate::error::{ServiceError, ServiceResult};
use crate::models::project::{CreateProject, Project, ProjectDetails, UpdateProject};
use crate::models::project_member::{
    CreateProjectMember, ProjectMember, ProjectMemberDetails, ProjectRole,
};
use crate::models::user::User;
use sqlx::PgPool;
use tracing::info;

/// Transport-facing input for creating or updating a project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
}

fn parse_role(value: &str) -> ServiceResult<ProjectRole> {
    ProjectRole::parse(value)
        .ok_or_else(|| ServiceError::invalid("role", format!("unrecognized value: {}", value)))
}

/// Project business operations
#[derive(Clone)]
pub struct ProjectService {
    db: PgPool,
}

impl ProjectService {
    /// Creates a new project service backed by the given pool
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Creates a project owned by the named user
    ///
    /// An unknown username fails with `NotFound` and creates no project
    /// row.
    pub async fn create_project(&self, input: NewProject, username: &str) -> ServiceResult<Project> {
        info!(name = %input.name, username, "Creating project");

        let mut tx = self.db.begin().await?;

        let owner = User::find_by_username(&mut *tx, username)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", username))?;

        let project = Project::create(
            &mut *tx,
            CreateProject {
                name: input.name,
                description: input.description,
                owner_id: owner.id,
            },
        )
        .await?;

        tx.commit().await?;

        info!(id = project.id, "Created project");
        Ok(project)
    }

    /// Fetches a project with the owner's username joined in
    pub async fn get_project(&self, id: i64) -> ServiceResult<ProjectDetails> {
        Project::find_by_id_with_details(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", id))
    }

    /// Lists the named user's projects, owned or joined, newest first
    pub async fn list_user_projects(&self, username: &str) -> ServiceResult<Vec<ProjectDetails>> {
        let user = User::find_by_username(&self.db, username)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", username))?;

        Ok(Project::find_by_user_id(&self.db, user.id).await?)
    }

    /// Updates a project's name and description
    pub async fn update_project(&self, id: i64, input: NewProject) -> ServiceResult<Project> {
        info!(id, "Updating project");

        let mut tx = self.db.begin().await?;

        Project::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", id))?;

        let project = Project::update(
            &mut *tx,
            id,
            UpdateProject {
                name: input.name,
                description: input.description,
            },
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("project", id))?;

        tx.commit().await?;

        Ok(project)
    }

    /// Deletes a project
    pub async fn delete_project(&self, id: i64) -> ServiceResult<()> {
        info!(id, "Deleting project");

        let mut tx = self.db.begin().await?;

        Project::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", id))?;

        Project::delete(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// Adds a user to a project with the given role
    ///
    /// Both the project and the user must exist. Adding the same user
    /// twice is a store constraint error, not pre-checked here.
    pub async fn add_member(
        &self,
        project_id: i64,
        user_id: i64,
        role: &str,
    ) -> ServiceResult<ProjectMember> {
        info!(project_id, user_id, role, "Adding project member");

        let role = parse_role(role)?;

        let mut tx = self.db.begin().await?;

        Project::find_by_id(&mut *tx, project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("project", project_id))?;

        User::find_by_id(&mut *tx, user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", user_id))?;

        let member = ProjectMember::create(
            &mut *tx,
            CreateProjectMember {
                project_id,
                user_id,
                role,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(member)
    }

    /// Lists a project's members in join order
    pub async fn list_members(&self, project_id: i64) -> ServiceResult<Vec<ProjectMemberDetails>> {
        Ok(ProjectMember::find_by_project_id(&self.db, project_id).await?)
    }

    /// Removes a user from a project
    ///
    /// An absent membership fails with `NotFound`.
    pub async fn remove_member(&self, project_id: i64, user_id: i64) -> ServiceResult<()> {
        info!(project_id, user_id, "Removing project member");

        let mut tx = self.db.begin().await?;

        ProjectMember::find_by_project_and_user(&mut *tx, project_id, user_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("membership", format!("project {} user {}", project_id, user_id))
            })?;

        ProjectMember::delete(&mut *tx, project_id, user_id).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_rejects_unknown_value() {
        assert_eq!(parse_role("OWNER").unwrap(), ProjectRole::Owner);
        let err = parse_role("ADMIN").unwrap_err();
        assert!(matches!(err, ServiceError::Validation { ref field, .. } if field == "role"));
    }
}
