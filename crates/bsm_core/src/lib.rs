//! # bsm_core: Mathematical Foundation for Closed-Form Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! bsm_core is the bottom layer of the workspace, providing:
//! - Standard normal density and distribution functions (`math::distributions`)
//! - Pricing traits shared by every model family (`traits`)
//! - Error types: `PricingError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other bsm_* crates, with minimal external dependencies:
//! - libm: Double-precision error function
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use bsm_core::math::distributions::{norm_cdf, norm_pdf};
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! assert!((norm_pdf(0.0) - 0.398_942_280_401_432_7).abs() < 1e-15);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod traits;
pub mod types;
