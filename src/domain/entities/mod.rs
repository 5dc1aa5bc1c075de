//! Core domain entities.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`Link`] - A stored destination URL and its row id
//! - [`ShortenedLink`] - The outcome of the create path (id plus derived code)

pub mod link;

pub use link::{Link, ShortenedLink};
