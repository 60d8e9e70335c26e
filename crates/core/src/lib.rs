//! Domain types, validation, and filter composition for catalog favorites.
//!
//! This crate has no database dependency so the rules it encodes can be
//! tested in isolation and reused by any persistence backend.

pub mod error;
pub mod favorites;
pub mod types;
