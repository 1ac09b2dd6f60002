//! User and role management service

use std::sync::Arc;

use tracing::info;

use crate::domain::{
    DomainError, DomainResult, NewUser, Role, RepositoryProvider, User, UserFilter, UserWithRoles,
};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

pub struct UserService {
    repos: Arc<dyn RepositoryProvider>,
}

impl UserService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Verify credentials and return the user with their roles. Inactive
    /// accounts and bad credentials fail identically.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<(User, Vec<Role>)> {
        let invalid = || DomainError::Validation("Invalid username or password".to_string());
        let user = self
            .repos
            .users()
            .find_by_username(username)
            .await?
            .ok_or_else(invalid)?;
        if !user.is_active {
            return Err(invalid());
        }
        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| DomainError::Storage(format!("Password verification failed: {e}")))?;
        if !ok {
            return Err(invalid());
        }
        self.repos.users().touch_last_login(user.id).await?;
        let roles = self.repos.users().roles_of(user.id).await?;
        info!(user_id = user.id, "User logged in");
        Ok((user, roles))
    }

    pub async fn get_user(&self, id: i32) -> DomainResult<UserWithRoles> {
        self.repos
            .users()
            .find_with_roles(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn list_users(&self, filter: UserFilter) -> DomainResult<(Vec<User>, u64)> {
        self.repos.users().list(filter).await
    }

    pub async fn create_user(
        &self,
        username: &str,
        email: &str,
        password: &str,
        nickname: Option<String>,
    ) -> DomainResult<User> {
        if username.trim().is_empty() || email.trim().is_empty() {
            return Err(DomainError::Validation(
                "Username and email are required".to_string(),
            ));
        }
        if password.len() < 8 {
            return Err(DomainError::Validation(
                "Password must be at least 8 characters".to_string(),
            ));
        }
        if self
            .repos
            .users()
            .find_by_username(username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!(
                "Username '{username}' is taken"
            )));
        }
        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Password hashing failed: {e}")))?;
        let user = self
            .repos
            .users()
            .create(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
                nickname,
            })
            .await?;
        // Every account starts out as a plain member.
        self.repos
            .users()
            .assign_role(user.id, Role::Member, None)
            .await?;
        info!(user_id = user.id, username, "User created");
        Ok(user)
    }

    pub async fn assign_role(
        &self,
        user_id: i32,
        role: Role,
        assigned_by_id: i32,
    ) -> DomainResult<()> {
        self.require_user(user_id).await?;
        self.repos
            .users()
            .assign_role(user_id, role, Some(assigned_by_id))
            .await?;
        info!(user_id, role = %role, by = assigned_by_id, "Role assigned");
        Ok(())
    }

    pub async fn revoke_role(&self, user_id: i32, role: Role) -> DomainResult<()> {
        self.require_user(user_id).await?;
        self.repos.users().revoke_role(user_id, role).await?;
        info!(user_id, role = %role, "Role revoked");
        Ok(())
    }

    async fn require_user(&self, id: i32) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}
