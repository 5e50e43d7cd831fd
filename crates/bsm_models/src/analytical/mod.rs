//! Analytical pricing formulas for European options.
//!
//! This module provides closed-form solutions for option pricing:
//! - Black-Scholes-Merton model for spot underlyings with dividend yield
//! - Black-76 model for forwards and futures
//! - Analytical Greeks up to third order
//!
//! ## Design Principles
//!
//! - **Computed once**: d₁ and d₂ are cached when an option is built
//! - **Numerical Stability**: Uses erfc-based CDF for accuracy in the tails
//! - **No silent NaN**: undefined results surface as `AnalyticalError`

pub mod black76;
pub mod black_scholes;
pub mod error;
pub(crate) mod terms;

// Re-export main types at module level
pub use black76::{Black76, Black76Params};
pub use black_scholes::{BlackScholes, BlackScholesParams};
pub use error::AnalyticalError;
