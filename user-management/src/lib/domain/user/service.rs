use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::Session;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn hash_password(&self, password: &Password) -> Result<String, UserError> {
        self.authenticator
            .hash_password(password.as_str())
            .map_err(|e| UserError::Unknown(format!("Password hashing failed: {}", e)))
    }

    /// Fail if `username` belongs to a user other than `owner`.
    async fn ensure_username_available(
        &self,
        username: &Username,
        owner: Option<UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_username(username).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(UserError::UsernameAlreadyExists(username.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Fail if `email` belongs to a user other than `owner`.
    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        owner: Option<UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(UserError::EmailAlreadyExists(email.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        self.ensure_username_available(&command.username, None)
            .await?;
        self.ensure_email_available(&command.email, None).await?;

        let password_hash = self.hash_password(&command.password)?;

        let new_user = NewUser {
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(new_user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<Session, UserError> {
        // Unknown accounts pay the same hashing cost as a wrong password
        let Ok(username) = Username::new(command.username) else {
            tracing::debug!("Login rejected: username fails validation");
            self.authenticator.reject_unknown_account(&command.password);
            return Err(UserError::InvalidCredentials);
        };

        let Some(user) = self.repository.find_by_username(&username).await? else {
            tracing::debug!(username = %username, "Login rejected: unknown username");
            self.authenticator.reject_unknown_account(&command.password);
            return Err(UserError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id, Utc::now())
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::debug!(user_id = %user.id, "Login rejected: password mismatch");
                    UserError::InvalidCredentials
                }
                AuthenticationError::TokenError(err) => {
                    UserError::Unknown(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::info!(user_id = %user.id, expires_at = %result.expires_at, "Token issued");

        Ok(Session {
            user,
            access_token: result.access_token,
            expires_at: result.expires_at,
        })
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.repository.list_all().await
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            self.ensure_username_available(&new_username, Some(user.id))
                .await?;
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            self.ensure_email_available(&new_email, Some(user.id))
                .await?;
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(&new_password)?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User updated");

        Ok(updated_user)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");

        Ok(())
    }
}
