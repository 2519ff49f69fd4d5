//! # SchoolHub Core
//!
//! Core types, errors, and utilities shared by every SchoolHub crate.
//!
//! - [`errors`]: the [`AppError`] type and its HTTP rendering
//! - [`pagination`]: pagination query parameters and response metadata
//! - [`listing`]: ordering and search helpers for list endpoints
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: serde helpers for query strings and partial updates
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::errors::AppError;
//! use schoolhub_core::pagination::PaginationParams;
//! use schoolhub_core::password::hash_password;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Teacher not found"));
//! let hash = hash_password("secure_password")?;
//! let limit = PaginationParams::default().limit();
//! ```

pub mod errors;
pub mod listing;
pub mod pagination;
pub mod password;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use listing::{Ordering, SortDirection, like_pattern};
pub use pagination::{PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
