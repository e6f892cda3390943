//! Giftwise Core - Shared types library.
//!
//! This crate provides common types used across all Giftwise components:
//! - `api` - REST API server (catalog, wishlist, ordering, auth)
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. Entity IDs, validated value types, and pagination primitives live
//! here so that every crate speaks the same vocabulary.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, prices, and pagination types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
