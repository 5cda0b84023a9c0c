use std::num::NonZeroU32;

/// A validated, strictly positive number of units.
///
/// Requests arrive with whatever integer the caller supplied; converting into
/// a `Quantity` is where non-positive values are rejected. Nothing is clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// The number of units
    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(QuantityError::NonPositive(value));
        }
        u32::try_from(value)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(QuantityError::TooLarge(value))
    }
}

impl From<NonZeroU32> for Quantity {
    fn from(value: NonZeroU32) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The ways a requested quantity can be unusable
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum QuantityError {
    /// Zero or negative quantities cannot be sourced
    #[error("quantity must be positive, got {0}")]
    NonPositive(i64),
    /// Quantities are counted in 32 bits
    #[error("quantity {0} exceeds the supported maximum of {max}", max = u32::MAX)]
    TooLarge(i64),
}
