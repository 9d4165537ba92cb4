/// User service
///
/// Passwords are hashed here, on the way in; the stored value is opaque
/// everywhere else. Username and email uniqueness is left to the store's
/// unique constraints.

use crate::error::{ServiceError, ServiceResult};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::password::{hash_password, verify_password};
use sqlx::PgPool;
use tracing::info;

/// Transport-facing input for registering a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Transport-facing input for updating a user's profile
#[derive(Debug, Clone)]
pub struct EditProfile {
    pub email: String,
    pub name: String,
}

/// User business operations
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

impl UserService {
    /// Creates a new user service backed by the given pool
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Registers a user, hashing the supplied password
    ///
    /// A taken username or email surfaces as a store constraint error.
    pub async fn register_user(&self, input: NewUser) -> ServiceResult<User> {
        info!(username = %input.username, "Registering user");

        let password = hash_password(&input.password)?;

        let user = User::create(
            &self.db,
            CreateUser {
                username: input.username,
                email: input.email,
                password,
                name: input.name,
            },
        )
        .await?;

        info!(id = user.id, "Registered user");
        Ok(user)
    }

    /// Fetches a user by ID
    pub async fn get_user(&self, id: i64) -> ServiceResult<User> {
        User::find_by_id(&self.db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))
    }

    /// Fetches a user by exact username
    pub async fn get_by_username(&self, username: &str) -> ServiceResult<User> {
        User::find_by_username(&self.db, username)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", username))
    }

    /// Lists all users ordered by username
    pub async fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(User::list_all(&self.db).await?)
    }

    /// Updates a user's email and display name
    pub async fn update_profile(&self, id: i64, input: EditProfile) -> ServiceResult<User> {
        info!(id, "Updating user profile");

        let mut tx = self.db.begin().await?;

        User::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;

        let user = User::update(
            &mut *tx,
            id,
            UpdateUser {
                email: input.email,
                name: input.name,
            },
        )
        .await?
        .ok_or_else(|| ServiceError::not_found("user", id))?;

        tx.commit().await?;

        Ok(user)
    }

    /// Changes a user's password after verifying the current one
    ///
    /// A wrong current password fails validation; nothing is written.
    pub async fn change_password(
        &self,
        id: i64,
        current_password: &str,
        new_password: &str,
    ) -> ServiceResult<()> {
        info!(id, "Changing user password");

        let mut tx = self.db.begin().await?;

        let user = User::find_by_id(&mut *tx, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;

        if !verify_password(current_password, &user.password)? {
            return Err(ServiceError::invalid(
                "current_password",
                "current password is incorrect",
            ));
        }

        let password = hash_password(new_password)?;

        User::update_password(&mut *tx, id, &password)
            .await?
            .ok_or_else(|| ServiceError::not_found("user", id))?;

        tx.commit().await?;

        Ok(())
    }
}
