pub mod model;
pub mod repository;

pub use model::{NewUser, Role, RoleAssignment, User, UserWithRoles};
pub use repository::{UserFilter, UserRepository};
