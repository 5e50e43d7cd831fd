//! Trait for priceable instruments.

use crate::types::PricingError;

/// Trait for entities that can be priced.
///
/// # Design Philosophy
///
/// This trait is designed for **static dispatch**. Implement it for
/// instrument enums and dispatch with `match`:
///
/// ```
/// use bsm_core::traits::Priceable;
/// use bsm_core::types::PricingError;
///
/// enum Instrument {
///     Cash(f64),
///     Forward { spot: f64, strike: f64, discount: f64 },
/// }
///
/// impl Priceable for Instrument {
///     fn price(&self) -> Result<f64, PricingError> {
///         match self {
///             Instrument::Cash(amount) => Ok(*amount),
///             Instrument::Forward { spot, strike, discount } => {
///                 Ok(spot - strike * discount)
///             }
///         }
///     }
/// }
///
/// let fwd = Instrument::Forward { spot: 100.0, strike: 95.0, discount: 1.0 };
/// assert_eq!(fwd.price().unwrap(), 5.0);
/// ```
///
/// # Invariants
/// - The method must be pure (no side effects, deterministic)
/// - A returned price is always finite; ill-defined inputs are reported as
///   an error instead of NaN or infinity
pub trait Priceable {
    /// Calculate the present value of the instrument.
    fn price(&self) -> Result<f64, PricingError>;
}
