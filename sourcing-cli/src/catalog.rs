//! An in-memory catalog loaded from JSON.
//!
//! The catalog lists products, storage locations, and which location stocks
//! which product at what capacity and storage rate. It is validated once on
//! load and is read-only afterwards.

use crate::{LocationId, ProductId};
use serde::{Deserialize, Serialize};
use sourcing_core::{
    models::{Map, StorageCandidate, StorageRate},
    ports::CandidateResolver,
};
use std::{convert::Infallible, num::NonZeroU32};

/// A product as listed in the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    /// The product identity
    pub id: ProductId,
    /// A display name
    pub name: String,
}

/// A storage location as listed in the catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Location {
    /// The location identity
    pub id: LocationId,
    /// A display name
    pub name: String,
}

/// One location stocking one product
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stock {
    /// The stocking location
    pub location: LocationId,
    /// The stocked product
    pub product: ProductId,
    /// The most units the location can supply
    pub capacity: NonZeroU32,
    /// The cost of storing one unit
    pub storage_rate: StorageRate,
}

/// A fixed distance, optionally specific to one product
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Distance {
    /// The location being measured
    pub location: LocationId,
    /// If given, the distance only applies to this product
    #[serde(default)]
    pub product: Option<ProductId>,
    /// The travel distance
    pub distance: f64,
}

/// The on-disk form of a catalog
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Every known product
    pub products: Vec<Product>,
    /// Every known location
    pub locations: Vec<Location>,
    /// Which location stocks which product
    #[serde(default)]
    pub stock: Vec<Stock>,
    /// Fixed distances; if empty, distances are sampled
    #[serde(default)]
    pub distances: Vec<Distance>,
}

/// A validated catalog answering candidate lookups in file order.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Map<ProductId, Vec<StorageCandidate<LocationId>>>,
}

impl Catalog {
    /// Check referential integrity and index the stock by product.
    pub fn new(file: &CatalogFile) -> Result<Self, CatalogError> {
        let mut products = Map::<ProductId, Vec<StorageCandidate<LocationId>>>::default();
        for product in &file.products {
            if products.claim(product.id.clone(), Vec::new()).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }

        let mut locations = Map::<LocationId, &str>::default();
        for location in &file.locations {
            if locations
                .claim(location.id.clone(), location.name.as_str())
                .is_some()
            {
                return Err(CatalogError::DuplicateLocation(location.id.clone()));
            }
        }

        for stock in &file.stock {
            let name = *locations
                .get(&stock.location)
                .ok_or_else(|| CatalogError::UnknownLocation(stock.location.clone()))?;
            let candidates = products
                .get_mut(&stock.product)
                .ok_or_else(|| CatalogError::UnknownProduct(stock.product.clone()))?;
            if candidates
                .iter()
                .any(|candidate| candidate.location == stock.location)
            {
                return Err(CatalogError::DuplicateStock {
                    location: stock.location.clone(),
                    product: stock.product.clone(),
                });
            }

            candidates.push(StorageCandidate {
                location: stock.location.clone(),
                name: name.to_owned(),
                capacity: stock.capacity,
                storage_rate: stock.storage_rate,
            });
        }

        for distance in &file.distances {
            if !locations.contains_key(&distance.location) {
                return Err(CatalogError::UnknownLocation(distance.location.clone()));
            }
            if let Some(product) = &distance.product
                && !products.contains_key(product)
            {
                return Err(CatalogError::UnknownProduct(product.clone()));
            }
        }

        Ok(Self { products })
    }

    /// The number of known products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog lists no products
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl CandidateResolver for Catalog {
    type ProductId = ProductId;
    type LocationId = LocationId;
    type Error = Infallible;

    fn candidates_for(
        &self,
        product: &ProductId,
    ) -> impl Future<Output = Result<Option<Vec<StorageCandidate<LocationId>>>, Infallible>> + Send
    {
        std::future::ready(Ok(self.products.get(product).cloned()))
    }
}

/// The ways a catalog file can be inconsistent
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A product id is listed twice
    #[error("product {0} is listed more than once")]
    DuplicateProduct(ProductId),
    /// A location id is listed twice
    #[error("location {0} is listed more than once")]
    DuplicateLocation(LocationId),
    /// Stock or a distance refers to a product that is not listed
    #[error("unknown product {0}")]
    UnknownProduct(ProductId),
    /// Stock or a distance refers to a location that is not listed
    #[error("unknown location {0}")]
    UnknownLocation(LocationId),
    /// The same location stocks the same product twice
    #[error("location {location} stocks product {product} more than once")]
    DuplicateStock {
        /// The location
        location: LocationId,
        /// The product
        product: ProductId,
    },
}
