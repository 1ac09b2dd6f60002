//! User transport DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{RoleAssignment, User, UserWithRoles};

/// User in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub nickname: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            email: u.email,
            nickname: u.nickname,
            is_active: u.is_active,
            created_at: u.created_at,
            last_login_at: u.last_login_at,
        }
    }
}

/// A role held by a user, with assignment audit data
#[derive(Debug, Serialize, ToSchema)]
pub struct RoleAssignmentDto {
    pub role: String,
    pub assigned_by_id: Option<i32>,
    pub assigned_at: DateTime<Utc>,
}

impl From<RoleAssignment> for RoleAssignmentDto {
    fn from(a: RoleAssignment) -> Self {
        Self {
            role: a.role.as_str().to_string(),
            assigned_by_id: a.assigned_by_id,
            assigned_at: a.assigned_at,
        }
    }
}

/// User with eagerly loaded roles
#[derive(Debug, Serialize, ToSchema)]
pub struct UserWithRolesDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub roles: Vec<RoleAssignmentDto>,
}

impl From<UserWithRoles> for UserWithRolesDto {
    fn from(u: UserWithRoles) -> Self {
        Self {
            user: u.user.into(),
            roles: u.roles.into_iter().map(RoleAssignmentDto::from).collect(),
        }
    }
}
