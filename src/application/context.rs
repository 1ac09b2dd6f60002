//! Typed caller context
//!
//! Handlers build a `Caller` from the authentication middleware and pass it
//! into facades. Authorization is decided against this explicit context,
//! never by inspecting ambient request state.

use crate::domain::{DomainError, DomainResult, Role};

/// Identity of the authenticated user behind a request
#[derive(Debug, Clone)]
pub struct UserContext {
    pub id: i32,
    pub username: String,
    pub roles: Vec<Role>,
}

/// Who is calling a facade operation
#[derive(Debug, Clone)]
pub enum Caller {
    Anonymous,
    User(UserContext),
}

impl Caller {
    pub fn user(&self) -> Option<&UserContext> {
        match self {
            Self::Anonymous => None,
            Self::User(ctx) => Some(ctx),
        }
    }

    /// The authenticated user, or `NotAuthenticated`
    pub fn require_user(&self) -> DomainResult<&UserContext> {
        self.user().ok_or(DomainError::NotAuthenticated)
    }

    /// Whether the caller holds a role. `Admin` implies every role.
    pub fn has_role(&self, role: Role) -> bool {
        match self.user() {
            Some(ctx) => ctx.roles.contains(&role) || ctx.roles.contains(&Role::Admin),
            None => false,
        }
    }

    /// The authenticated user holding a role; anonymous callers fail with
    /// `NotAuthenticated`, authenticated callers without the role with
    /// `MissingRole`.
    pub fn require_role(&self, role: Role) -> DomainResult<&UserContext> {
        let ctx = self.require_user()?;
        if self.has_role(role) {
            Ok(ctx)
        } else {
            Err(DomainError::MissingRole(role.as_str()))
        }
    }

    pub fn is_board_games_manager(&self) -> bool {
        self.has_role(Role::BoardGamesManager)
    }

    pub fn is_states_manager(&self) -> bool {
        self.has_role(Role::StatesManager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: i32) -> Caller {
        Caller::User(UserContext {
            id,
            username: format!("user{id}"),
            roles: vec![Role::Member],
        })
    }

    #[test]
    fn anonymous_caller_is_not_authenticated() {
        let caller = Caller::Anonymous;
        assert!(matches!(
            caller.require_user(),
            Err(DomainError::NotAuthenticated)
        ));
        assert!(matches!(
            caller.require_role(Role::BoardGamesManager),
            Err(DomainError::NotAuthenticated)
        ));
    }

    #[test]
    fn member_lacks_manager_role() {
        let caller = member(42);
        assert!(matches!(
            caller.require_role(Role::BoardGamesManager),
            Err(DomainError::MissingRole("board-games-manager"))
        ));
    }

    #[test]
    fn admin_implies_every_role() {
        let caller = Caller::User(UserContext {
            id: 1,
            username: "root".to_string(),
            roles: vec![Role::Admin],
        });
        assert!(caller.is_board_games_manager());
        assert!(caller.is_states_manager());
        assert!(caller.require_role(Role::StatesManager).is_ok());
    }
}
