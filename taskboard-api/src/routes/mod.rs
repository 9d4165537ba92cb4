/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `tasks`: Task search, CRUD, kanban board, status updates
/// - `projects`: Project CRUD and membership
/// - `comments`: Comments on tasks
/// - `tags`: Tag catalog and task tagging
/// - `users`: Registration, profiles, password changes

pub mod comments;
pub mod health;
pub mod projects;
pub mod tags;
pub mod tasks;
pub mod users;
