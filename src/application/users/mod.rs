pub mod dto;
pub mod facade;
pub mod service;

pub use dto::{RoleAssignmentDto, UserDto, UserWithRolesDto};
pub use facade::UsersFacade;
pub use service::UserService;
