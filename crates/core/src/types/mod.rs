//! Core types for Giftwise.
//!
//! Type-safe wrappers for the domain concepts shared between crates.

pub mod email;
pub mod id;
pub mod page;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use page::{Page, PageRequest, SortDirection};
pub use price::{Price, PriceError};
