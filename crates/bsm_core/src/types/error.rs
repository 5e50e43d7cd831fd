//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Model-independent errors from pricing operations

use thiserror::Error;

/// Categorised pricing errors.
///
/// Model families report their own, more detailed errors and convert them
/// into this type at the [`Priceable`](crate::traits::priceable::Priceable)
/// boundary.
///
/// # Variants
/// - `InvalidInput`: Invalid market data or parameters
/// - `NumericalInstability`: Formula is undefined for the given inputs
/// - `ModelFailure`: Model assumptions violated
/// - `UnsupportedInstrument`: Instrument or measure not supported by model
///
/// # Examples
/// ```
/// use bsm_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid input data or parameters
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Numerical instability during computation
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Model failed to produce valid result
    #[error("Model failure: {0}")]
    ModelFailure(String),

    /// Instrument type not supported
    #[error("Unsupported instrument: {0}")]
    UnsupportedInstrument(String),
}
