/// Project model and database operations
///
/// # Schema
///
/// ```sql
/// CREATE TABLE projects (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     description TEXT,
///     owner_id BIGINT NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// A user's visible projects are the ones they own plus the ones they
/// joined through `project_members`; [`Project::find_by_user_id`]
/// deduplicates the union by project id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

/// Project record as persisted
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID, assigned by the store on insert
    pub id: i64,

    /// Project name
    pub name: String,

    /// Free-form description
    pub description: Option<String>,

    /// Owning user
    pub owner_id: i64,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Project read projection with the owner's username joined in
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProjectDetails {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Username of the owner
    pub owner_name: Option<String>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// Input for updating a project's mutable fields
///
/// Ownership is fixed at creation.
#[derive(Debug, Clone)]
pub struct UpdateProject {
    pub name: String,
    pub description: Option<String>,
}

impl Project {
    /// Creates a new project
    pub async fn create(db: impl PgExecutor<'_>, data: CreateProject) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.owner_id)
        .fetch_one(db)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, owner_id, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID with the owner's username joined in
    pub async fn find_by_id_with_details(
        db: impl PgExecutor<'_>,
        id: i64,
    ) -> Result<Option<ProjectDetails>, sqlx::Error> {
        let project = sqlx::query_as::<_, ProjectDetails>(
            r#"
            SELECT p.id, p.name, p.description, p.owner_id, p.created_at, p.updated_at,
                   u.username AS owner_name
            FROM projects p
            LEFT JOIN users u ON p.owner_id = u.id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(project)
    }

    /// Lists every project the user owns or is a member of
    ///
    /// The owner/member union is deduplicated by project id; newest
    /// projects first.
    pub async fn find_by_user_id(
        db: impl PgExecutor<'_>,
        user_id: i64,
    ) -> Result<Vec<ProjectDetails>, sqlx::Error> {
        let projects = sqlx::query_as::<_, ProjectDetails>(
            r#"
            SELECT DISTINCT p.id, p.name, p.description, p.owner_id, p.created_at, p.updated_at,
                   u.username AS owner_name
            FROM projects p
            LEFT JOIN users u ON p.owner_id = u.id
            LEFT JOIN project_members pm ON p.id = pm.project_id
            WHERE p.owner_id = $1 OR pm.user_id = $1
            ORDER BY p.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(projects)
    }

    /// Updates a project's name and description, refreshing updated_at
    pub async fn update(
        db: impl PgExecutor<'_>,
        id: i64,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = $2,
                description = $3,
                updated_at = CURRENT_TIMESTAMP
            WHERE id = $1
            RETURNING id, name, description, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .fetch_optional(db)
        .await?;

        Ok(project)
    }

    /// Deletes a project
    ///
    /// Returns whether a row was deleted. Tasks, memberships, and
    /// comments under the project go with it via CASCADE.
    pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
