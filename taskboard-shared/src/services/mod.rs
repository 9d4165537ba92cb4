/// Business services for Taskboard
///
/// Services sit between the HTTP layer and the models. Each one owns a
/// clone of the connection pool and enforces two rules the models do
/// not:
///
/// - every write path verifies that the record it references exists,
///   failing with `NotFound` before touching the store;
/// - every mutating operation runs inside a single transaction, so an
///   existence check and its write commit or roll back together.
///
/// Symbolic status/priority/role values arriving from transport are
/// parsed here; unrecognized values fail with a validation error before
/// any persistence is attempted.
///
/// # Services
///
/// - `task`: Task CRUD, search, status updates, overdue listing
/// - `project`: Project CRUD and membership
/// - `user`: Registration, profiles, password changes
/// - `comment`: Task comments
/// - `tag`: Tags and task tagging

pub mod comment;
pub mod project;
pub mod tag;
pub mod task;
pub mod user;

pub use comment::CommentService;
pub use project::ProjectService;
pub use tag::TagService;
pub use task::TaskService;
pub use user::UserService;
