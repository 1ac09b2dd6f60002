//! User and role domain entities

use chrono::{DateTime, Utc};

/// Club roles, assigned many-to-many via `user_roles`.
///
/// `Admin` implies every other role when capabilities are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Member,
    BoardGamesManager,
    StatesManager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::BoardGamesManager => "board-games-manager",
            Self::StatesManager => "states-manager",
            Self::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "member" => Some(Self::Member),
            "board-games-manager" => Some(Self::BoardGamesManager),
            "states-manager" => Some(Self::StatesManager),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    /// All roles, in seeding order.
    pub fn all() -> [Role; 4] {
        [
            Self::Member,
            Self::BoardGamesManager,
            Self::StatesManager,
            Self::Admin,
        ]
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Club member account
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    /// Display name shown to other members
    pub nickname: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

/// A role held by a user, with assignment audit data.
#[derive(Debug, Clone)]
pub struct RoleAssignment {
    pub role: Role,
    /// Who granted the role; `None` for seeded assignments.
    pub assigned_by_id: Option<i32>,
    pub assigned_at: DateTime<Utc>,
}

/// User with eagerly loaded role assignments
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    pub user: User,
    pub roles: Vec<RoleAssignment>,
}

/// Data for creating a new user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_str_roundtrip() {
        for role in Role::all() {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_is_none() {
        assert_eq!(Role::from_str("janitor"), None);
    }
}
