//! Option instruments and the strategies built from them.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects) over the two model families:
//! - [`AnalyticalOption`] wraps a Black-Scholes-Merton or Black-76 option
//! - [`Composite`] holds signed legs of one family and one expiry, and
//!   reports every measure as the signed sum over its legs
//!
//! # Examples
//!
//! ```
//! use bsm_models::analytical::Black76;
//! use bsm_models::greeks::Sensitivities;
//! use bsm_models::instruments::{Composite, Position};
//!
//! let call = Black76::call(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
//! let put = Black76::put(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
//!
//! let short = Composite::straddle(call, put, Position::Short).unwrap();
//! assert!(short.price().unwrap() < 0.0);
//! assert!(short.gamma().unwrap() < 0.0);
//! assert_eq!(short.all_greeks().unwrap().len(), 7);
//! ```

mod composite;
mod option;

pub use composite::{Composite, Leg, Position};
pub use option::{AnalyticalOption, OptionType};
