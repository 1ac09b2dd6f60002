//! HTTP REST API interfaces
//!
//! - `middleware`: JWT authentication middleware building the caller context
//! - `common`: response envelopes and the error-to-status mapping
//! - `modules`: request DTOs and handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, AppState};
