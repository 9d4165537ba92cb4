/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::services::{
    CommentService, ProjectService, TagService, TaskService, UserService,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The
/// services share one pool; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Task operations
    pub tasks: TaskService,

    /// Project and membership operations
    pub projects: ProjectService,

    /// User operations
    pub users: UserService,

    /// Comment operations
    pub comments: CommentService,

    /// Tag operations
    pub tags: TagService,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            tasks: TaskService::new(db.clone()),
            projects: ProjectService::new(db.clone()),
            users: UserService::new(db.clone()),
            comments: CommentService::new(db.clone()),
            tags: TagService::new(db.clone()),
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// └── /v1/
///     ├── /tasks                    # Search, create, kanban, overdue
///     │   ├── /:id                  # Detail, update, delete
///     │   ├── /:id/status           # Narrow status update
///     │   ├── /:id/comments         # Comments on a task
///     │   └── /:id/tags             # Tags on a task
///     ├── /comments/:id             # Comment update/delete
///     ├── /tags                     # Tag catalog
///     ├── /projects                 # Project CRUD
///     │   └── /:id/members          # Membership
///     └── /users                    # Registration and profiles
/// ```
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let task_routes = Router::new()
        .route(
            "/",
            get(routes::tasks::list_tasks).post(routes::tasks::create_task),
        )
        .route("/kanban", get(routes::tasks::kanban_board))
        .route("/overdue", get(routes::tasks::overdue_tasks))
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/status", post(routes::tasks::update_task_status))
        .route(
            "/:id/comments",
            get(routes::comments::list_task_comments).post(routes::comments::create_comment),
        )
        .route(
            "/:id/tags",
            get(routes::tags::list_task_tags).post(routes::tags::tag_task),
        )
        .route("/:id/tags/:tag_id", delete(routes::tags::untag_task));

    let comment_routes = Router::new().route(
        "/:id",
        axum::routing::put(routes::comments::update_comment)
            .delete(routes::comments::delete_comment),
    );

    let tag_routes = Router::new()
        .route(
            "/",
            get(routes::tags::list_tags).post(routes::tags::create_tag),
        )
        .route("/:id", delete(routes::tags::delete_tag));

    let project_routes = Router::new()
        .route(
            "/",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/:id",
            get(routes::projects::get_project)
                .put(routes::projects::update_project)
                .delete(routes::projects::delete_project),
        )
        .route(
            "/:id/members",
            get(routes::projects::list_members).post(routes::projects::add_member),
        )
        .route(
            "/:id/members/:user_id",
            delete(routes::projects::remove_member),
        );

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::register_user),
        )
        .route(
            "/:id",
            get(routes::users::get_user).put(routes::users::update_user),
        )
        .route("/:id/password", post(routes::users::change_password));

    let v1_routes = Router::new()
        .nest("/tasks", task_routes)
        .nest("/comments", comment_routes)
        .nest("/tags", tag_routes)
        .nest("/projects", project_routes)
        .nest("/users", user_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
