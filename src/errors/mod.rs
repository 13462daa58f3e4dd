//! # Error Handling
//!
//! Crate-wide error type and result alias. Handler-facing conversion to HTTP
//! responses lives in [`crate::api::error`].

pub mod types;

pub use types::{Error, Result};
