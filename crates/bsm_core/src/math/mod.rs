//! Numerical building blocks shared by every analytic model.
//!
//! - `distributions`: Standard normal PDF and CDF

pub mod distributions;

pub use distributions::{erf, norm_cdf, norm_pdf};
