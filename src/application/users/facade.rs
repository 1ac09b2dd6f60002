//! User management facade: admin-only operations plus self-service reads.

use std::sync::Arc;

use super::dto::{UserDto, UserWithRolesDto};
use super::service::UserService;
use crate::application::context::Caller;
use crate::domain::{DomainError, DomainResult, Role, UserFilter};

pub struct UsersFacade {
    service: Arc<UserService>,
}

impl UsersFacade {
    pub fn new(service: Arc<UserService>) -> Self {
        Self { service }
    }

    /// The caller's own account with roles
    pub async fn me(&self, caller: &Caller) -> DomainResult<UserWithRolesDto> {
        let ctx = caller.require_user()?;
        Ok(self.service.get_user(ctx.id).await?.into())
    }

    pub async fn list_users(
        &self,
        caller: &Caller,
        name_fragment: Option<String>,
        page: u32,
        page_size: u32,
    ) -> DomainResult<(Vec<UserDto>, u64)> {
        caller.require_role(Role::Admin)?;
        let (users, total) = self
            .service
            .list_users(UserFilter {
                name_fragment,
                page,
                page_size,
            })
            .await?;
        Ok((users.into_iter().map(UserDto::from).collect(), total))
    }

    pub async fn get_user(&self, caller: &Caller, id: i32) -> DomainResult<UserWithRolesDto> {
        caller.require_role(Role::Admin)?;
        Ok(self.service.get_user(id).await?.into())
    }

    pub async fn create_user(
        &self,
        caller: &Caller,
        username: &str,
        email: &str,
        password: &str,
        nickname: Option<String>,
    ) -> DomainResult<UserDto> {
        caller.require_role(Role::Admin)?;
        let user = self
            .service
            .create_user(username, email, password, nickname)
            .await?;
        Ok(user.into())
    }

    pub async fn assign_role(
        &self,
        caller: &Caller,
        user_id: i32,
        role_name: &str,
    ) -> DomainResult<()> {
        let ctx = caller.require_role(Role::Admin)?;
        let role = Role::from_str(role_name)
            .ok_or_else(|| DomainError::Validation(format!("Unknown role '{role_name}'")))?;
        self.service.assign_role(user_id, role, ctx.id).await
    }

    pub async fn revoke_role(
        &self,
        caller: &Caller,
        user_id: i32,
        role_name: &str,
    ) -> DomainResult<()> {
        caller.require_role(Role::Admin)?;
        let role = Role::from_str(role_name)
            .ok_or_else(|| DomainError::Validation(format!("Unknown role '{role_name}'")))?;
        self.service.revoke_role(user_id, role).await
    }
}
