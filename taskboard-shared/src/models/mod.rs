/// Database models for Taskboard
///
/// This module contains all persisted records and their SQL operations.
/// Every operation issues exactly one parameterized query, which lets the
/// service layer compose operations inside a single transaction by
/// passing `&mut *tx` where a pool reference would otherwise go.
///
/// Records that carry join-only columns (`TaskDetails`, `ProjectDetails`,
/// `CommentDetails`, `ProjectMemberDetails`) are separate read
/// projections. They are produced only by queries that perform the join
/// and are never written back to the store.
///
/// # Models
///
/// - `user`: User accounts
/// - `project`: Projects and ownership
/// - `task`: Tasks, status/priority enums, search
/// - `comment`: Task comments
/// - `tag`: Tags and the task/tag association
/// - `project_member`: Project membership with roles

pub mod comment;
pub mod project;
pub mod project_member;
pub mod tag;
pub mod task;
pub mod user;
