use super::Quantity;
use rust_decimal::Decimal;
use std::num::NonZeroU32;

/// One place a given product can be sourced from.
///
/// The travel distance to a candidate is not stored here. It is supplied
/// afresh by a [`DistanceProvider`](crate::ports::DistanceProvider) every time
/// the candidate is evaluated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageCandidate<LocationId> {
    /// The storage location
    pub location: LocationId,
    /// A display name for the location
    pub name: String,
    /// The most units of the product this location can supply
    pub capacity: NonZeroU32,
    /// The cost of storing one unit of the product at this location
    pub storage_rate: StorageRate,
}

impl<LocationId> StorageCandidate<LocationId> {
    /// Whether this location can supply the full quantity on its own
    pub fn covers(&self, quantity: Quantity) -> bool {
        self.capacity.get() >= quantity.get()
    }
}

/// A non-negative, per-unit storage cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Decimal", into = "Decimal")
)]
pub struct StorageRate(Decimal);

impl StorageRate {
    /// Creates a storage rate with validation
    pub fn new(rate: Decimal) -> Result<Self, StorageRateError> {
        Self::try_from(rate)
    }

    /// The cost per unit
    pub fn get(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for StorageRate {
    type Error = StorageRateError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value.is_sign_negative() && !value.is_zero() {
            Err(StorageRateError::Negative(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<StorageRate> for Decimal {
    fn from(value: StorageRate) -> Self {
        value.0
    }
}

/// Errors that can occur when validating a storage rate
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum StorageRateError {
    /// Storage cannot pay the customer
    #[error("storage rate cannot be negative, got {0}")]
    Negative(Decimal),
}
