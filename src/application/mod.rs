//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! the short-code codec, and validation. Services consume repository traits and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Create and resolve paths
//! - [`services::auth_service::AuthService`] - Shared-secret authentication for create requests

pub mod services;
