/// Project membership model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_role AS ENUM ('OWNER', 'MEMBER');
///
/// CREATE TABLE project_members (
///     id BIGSERIAL PRIMARY KEY,
///     project_id BIGINT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     role project_role NOT NULL DEFAULT 'MEMBER',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (project_id, user_id)
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Role of a user within a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectRole {
    Owner,
    Member,
}

impl ProjectRole {
    /// Symbolic name as stored in the database
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Owner => "OWNER",
            ProjectRole::Member => "MEMBER",
        }
    }

    /// Parses a symbolic name, returning `None` for unrecognized values
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "OWNER" => Some(ProjectRole::Owner),
            "MEMBER" => Some(ProjectRole::Member),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectRole::Owner => "Owner",
            ProjectRole::Member => "Member",
        }
    }
}

/// Membership record as persisted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMember {
    /// Unique membership ID, assigned by the store on insert
    pub id: i64,

    pub project_id: i64,
    pub user_id: i64,
    pub role: ProjectRole,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

/// Membership read projection with the member's names joined in
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectMemberDetails {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub role: ProjectRole,
    pub joined_at: DateTime<Utc>,

    /// Member's login name
    pub username: Option<String>,

    /// Member's display name
    pub display_name: Option<String>,
}

/// Input for adding a user to a project
#[derive(Debug, Clone)]
pub struct CreateProjectMember {
    pub project_id: i64,
    pub user_id: i64,
    pub role: ProjectRole,
}

impl ProjectMember {
    /// Adds a user to a project
    ///
    /// # Errors
    ///
    /// Returns an error if the user is already a member (unique
    /// constraint on the pair) or either reference violates a foreign
    /// key.
    pub async fn create(
        db: impl PgExecutor<'_>,
        data: CreateProjectMember,
    ) -> Result<Self, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            INSERT INTO project_members (project_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, user_id, role, joined_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(db)
        .await?;

        Ok(member)
    }

    /// Lists a project's members in join order, with names joined in
    pub async fn find_by_project_id(
        db: impl PgExecutor<'_>,
        project_id: i64,
    ) -> Result<Vec<ProjectMemberDetails>, sqlx::Error> {
        let members = sqlx::query_as::<_, ProjectMemberDetails>(
            r#"
            SELECT pm.id, pm.project_id, pm.user_id, pm.role, pm.joined_at,
                   u.username AS username,
                   u.name AS display_name
            FROM project_members pm
            LEFT JOIN users u ON pm.user_id = u.id
            WHERE pm.project_id = $1
            ORDER BY pm.joined_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(db)
        .await?;

        Ok(members)
    }

    /// Finds the membership of one user in one project
    pub async fn find_by_project_and_user(
        db: impl PgExecutor<'_>,
        project_id: i64,
        user_id: i64,
    ) -> Result<Option<Self>, sqlx::Error> {
        let member = sqlx::query_as::<_, ProjectMember>(
            r#"
            SELECT id, project_id, user_id, role, joined_at
            FROM project_members
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(member)
    }

    /// Removes a user from a project
    ///
    /// Returns whether a membership row was deleted.
    pub async fn delete(
        db: impl PgExecutor<'_>,
        project_id: i64,
        user_id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_members WHERE project_id = $1 AND user_id = $2")
            .bind(project_id)
            .bind(user_id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_role_parse_roundtrip() {
        for role in [ProjectRole::Owner, ProjectRole::Member] {
            assert_eq!(ProjectRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(ProjectRole::parse("ADMIN"), None);
    }
}
