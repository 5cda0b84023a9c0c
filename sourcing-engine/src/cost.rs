use rust_decimal::{Decimal, prelude::FromPrimitive as _};
use sourcing_core::models::{Quantity, StorageRate};

/// The cost of sourcing a full request from one location.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cost {
    /// quantity × distance × transport rate
    pub transport: Decimal,
    /// transport plus storage rate × quantity
    pub total: Decimal,
}

/// The cost of moving `quantity` units over `distance`.
///
/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn transport_cost(quantity: Quantity, distance: Decimal, transport_rate: Decimal) -> Decimal {
    Decimal::from(quantity.get())
        .saturating_mul(distance)
        .saturating_mul(transport_rate)
}

/// Price a request of `quantity` units against one candidate location.
pub fn evaluate(
    quantity: Quantity,
    distance: Decimal,
    transport_rate: Decimal,
    storage_rate: StorageRate,
) -> Cost {
    let transport = transport_cost(quantity, distance, transport_rate);
    let storage = storage_rate
        .get()
        .saturating_mul(Decimal::from(quantity.get()));
    Cost {
        transport,
        total: transport.saturating_add(storage),
    }
}

/// Convert a finite, non-negative float into a decimal.
///
/// Returns None for NaN, infinities, negative values, and magnitudes a
/// `Decimal` cannot hold.
pub fn non_negative(value: f64) -> Option<Decimal> {
    if value.is_finite() && value >= 0.0 {
        Decimal::from_f64(value)
    } else {
        None
    }
}
