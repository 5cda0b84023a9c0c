use super::{Map, Quantity, RequestError};
use rust_decimal::Decimal;
use std::hash::Hash;

/// The location chosen under one criterion, with the costs that decided it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decision<LocationId> {
    /// The chosen storage location
    pub location: LocationId,
    /// The display name of the chosen location
    pub location_name: String,
    /// Transport plus storage cost of sourcing the full quantity here
    pub total_cost: Decimal,
    /// The transport share of `total_cost`
    pub transport_cost: Decimal,
}

/// Both decisions for a single requested product.
///
/// The two are computed independently. `convenient` only considers locations
/// whose capacity covers `quantity`, so whenever both are present its total
/// cost is never below that of `cheapest`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation<LocationId> {
    /// The requested quantity the decisions were computed for
    pub quantity: Quantity,
    /// The lowest-cost location, or None if nothing stocks the product
    pub cheapest: Option<Decision<LocationId>>,
    /// The lowest-cost location able to supply the full quantity, or None if there is none
    pub convenient: Option<Decision<LocationId>>,
}

/// A request that was refused, identified by its position in the session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rejection<ProductId> {
    /// The zero-based position of the request in the submitted session
    pub index: usize,
    /// The product the request named
    pub product: ProductId,
    /// Why it was refused
    pub reason: RequestError,
}

/// The result of optimizing one customer-session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(
        serialize = "ProductId: serde::Serialize, LocationId: serde::Serialize",
        deserialize = "ProductId: serde::Deserialize<'de>, LocationId: serde::Deserialize<'de>"
    ))
)]
pub struct Plan<ProductId: Eq + Hash, LocationId> {
    /// Decisions for every accepted request, in submission order
    pub decisions: Map<ProductId, Allocation<LocationId>>,
    /// Requests refused before optimization, in submission order
    pub rejected: Vec<Rejection<ProductId>>,
}

impl<ProductId: Eq + Hash, LocationId> Default for Plan<ProductId, LocationId> {
    fn default() -> Self {
        Self {
            decisions: Default::default(),
            rejected: Default::default(),
        }
    }
}

impl<ProductId: Eq + Hash, LocationId> Plan<ProductId, LocationId> {
    /// Look up the allocation for a product
    pub fn get(&self, product: &ProductId) -> Option<&Allocation<LocationId>> {
        self.decisions.get(product)
    }

    /// The number of products for which no location at all was found
    pub fn unsourced(&self) -> usize {
        self.decisions
            .values()
            .filter(|allocation| allocation.cheapest.is_none())
            .count()
    }
}
