//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors from construction, evaluation and composition
//!   of closed-form options

use bsm_core::types::PricingError;
use thiserror::Error;

use crate::greeks::{GreekView, Measure, ModelFamily};

/// Analytical pricing errors.
///
/// Every failure is permanent for the given inputs: constructing or
/// evaluating again with the same values fails the same way.
///
/// # Variants
/// - `InvalidParameter`: Negative or non-finite input at construction
/// - `DegenerateInput`: Formula undefined for the inputs (σ√T = 0, zero price, ...)
/// - `UnsupportedMeasure`: Measure not defined by the model family
/// - `UnsupportedView`: Aggregation view not defined by the model family
/// - `UnknownMeasure`: Unrecognised measure key
/// - `Composition`: Legs cannot form the requested composite
///
/// # Examples
/// ```
/// use bsm_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidParameter {
///     name: "volatility",
///     value: -0.2,
///     constraint: "must be non-negative",
/// };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Input rejected at construction.
    #[error("Invalid parameter: {name} = {value} ({constraint})")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Constraint the value violates
        constraint: &'static str,
    },

    /// The closed form is undefined for the inputs.
    #[error("Degenerate input for {measure}: {reason}")]
    DegenerateInput {
        /// Measure being evaluated
        measure: Measure,
        /// Why the formula is undefined
        reason: String,
    },

    /// Measure not defined by the model family.
    #[error("{measure} is not defined by the {family} model")]
    UnsupportedMeasure {
        /// Model family of the option
        family: ModelFamily,
        /// Requested measure
        measure: Measure,
    },

    /// Aggregation view not defined by the model family.
    #[error("{view} view is not defined by the {family} model")]
    UnsupportedView {
        /// Model family of the option
        family: ModelFamily,
        /// Requested view
        view: GreekView,
    },

    /// Unrecognised measure key.
    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    /// Legs cannot form the requested composite.
    #[error("Composition error: {0}")]
    Composition(String),
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidParameter { .. } | AnalyticalError::Composition(_) => {
                PricingError::InvalidInput(err.to_string())
            }
            AnalyticalError::DegenerateInput { .. } => {
                PricingError::NumericalInstability(err.to_string())
            }
            AnalyticalError::UnsupportedMeasure { .. }
            | AnalyticalError::UnsupportedView { .. }
            | AnalyticalError::UnknownMeasure(_) => {
                PricingError::UnsupportedInstrument(err.to_string())
            }
        }
    }
}
