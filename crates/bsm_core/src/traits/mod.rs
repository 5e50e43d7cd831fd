//! Core traits for priceable instruments.
//!
//! This module defines:
//! - Price calculation (`Priceable` trait)
//!
//! All traits are designed for static dispatch (enum-based). Model
//! families wrap their variants in an `enum` and implement the trait once
//! with a `match`, rather than boxing trait objects.

pub mod priceable;

pub use priceable::Priceable;
