//! # Gameclub Service
//!
//! Club management backend: board game inventory and reservations, club
//! open/closed state planning, user/role management and Discord
//! notifications, exposed as a REST API for the web client.
//!
//! ## Architecture
//!
//! - **domain**: entities, the reservation item state machine, repository
//!   traits and domain errors
//! - **application**: services (business rules), facades (authorization +
//!   DTO conversion) and background tasks
//! - **infrastructure**: SeaORM persistence, migrations, JWT/bcrypt crypto
//!   and the Discord webhook notifier
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: graceful shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::{create_api_router, AppState};
