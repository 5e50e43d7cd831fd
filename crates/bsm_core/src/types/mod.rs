//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error type for pricing operations
//!
//! # Re-exports
//!
//! - [`PricingError`] from `error`

pub mod error;

pub use error::PricingError;
