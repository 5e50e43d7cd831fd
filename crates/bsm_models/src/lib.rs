//! # bsm_models (L2: Models)
//!
//! Closed-form prices and Greeks for European options, and option
//! strategies built from them.
//!
//! This crate provides:
//! - Black-Scholes-Merton model for spot options with dividend yield
//! - Black-76 model for options on futures and forwards
//! - A closed catalogue of measures with fixed aggregation views
//! - Composite instruments (straddles, strangles, butterflies) that combine
//!   legs linearly across every measure
//!
//! ## Design Principles
//!
//! - **Enum-based dispatch** over model families, no trait objects
//! - **Validated construction**: negative or non-finite inputs never produce
//!   an option
//! - **Explicit degeneracy**: σ√T = 0 and other undefined formulas return
//!   `AnalyticalError::DegenerateInput`, never NaN or infinity
//!
//! ## Example
//!
//! ```
//! use bsm_models::analytical::BlackScholes;
//! use bsm_models::greeks::{Measure, Sensitivities};
//! use bsm_models::instruments::{Composite, Position};
//!
//! let call = BlackScholes::call(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
//! let put = BlackScholes::put(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
//!
//! let straddle = Composite::straddle(call.clone(), put.clone(), Position::Long).unwrap();
//! assert_eq!(
//!     straddle.delta().unwrap(),
//!     call.delta().unwrap() + put.delta().unwrap()
//! );
//!
//! let greeks = call.all_greeks().unwrap();
//! assert_eq!(greeks.len(), 18);
//! assert!(greeks.get(Measure::Vega).unwrap() > 0.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod greeks;
pub mod instruments;
