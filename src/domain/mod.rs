//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, repository interfaces, and the short-code codec independent of
//! infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`codec`] - Reversible mapping between row ids and short codes
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])
//!
//! # Request Flow
//!
//! 1. Create: URL is inserted via [`repositories::LinkRepository`], the new row id
//!    is encoded by [`codec::ShortCodeCodec`]
//! 2. Resolve: the code is decoded back to a row id, which is looked up in the store

pub mod codec;
pub mod entities;
pub mod repositories;
