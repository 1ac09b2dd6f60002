//! User repository interface

use async_trait::async_trait;

use super::model::{NewUser, Role, User, UserWithRoles};
use crate::domain::DomainResult;

/// Filter for user listings
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Substring matched against username and nickname
    pub name_fragment: Option<String>,
    pub page: u32,
    pub page_size: u32,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Find a user with roles eagerly attached
    async fn find_with_roles(&self, id: i32) -> DomainResult<Option<UserWithRoles>>;

    /// Role names a user currently holds
    async fn roles_of(&self, user_id: i32) -> DomainResult<Vec<Role>>;

    /// List users matching the filter, newest first, with the total count
    async fn list(&self, filter: UserFilter) -> DomainResult<(Vec<User>, u64)>;

    async fn count(&self) -> DomainResult<u64>;

    async fn create(&self, user: NewUser) -> DomainResult<User>;

    async fn update(&self, user: User) -> DomainResult<()>;

    /// Record a role grant; no-op when the user already holds the role
    async fn assign_role(
        &self,
        user_id: i32,
        role: Role,
        assigned_by_id: Option<i32>,
    ) -> DomainResult<()>;

    async fn revoke_role(&self, user_id: i32, role: Role) -> DomainResult<()>;

    async fn touch_last_login(&self, user_id: i32) -> DomainResult<()>;
}
