//! Distance providers: sampled or looked up from the catalog file.

use crate::{LocationId, ProductId, catalog};
use rand::{Rng as _, SeedableRng as _, rngs::StdRng};
use serde::{Deserialize, Serialize};
use sourcing_core::{models::Map, ports::DistanceProvider};
use std::sync::{Mutex, PoisonError};

/// Configuration for sampled distances
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceConfig {
    /// The smallest distance that can be drawn
    #[serde(default = "default_min")]
    pub min: f64,
    /// The largest distance that can be drawn
    #[serde(default = "default_max")]
    pub max: f64,
    /// A seed for reproducible draws (if omitted, seeded from the OS)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_min() -> f64 {
    1.0
}

fn default_max() -> f64 {
    100.0
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            seed: None,
        }
    }
}

/// Draws a fresh distance, uniformly from `[min, max]`, on every query.
#[derive(Debug)]
pub struct UniformDistance {
    min: f64,
    max: f64,
    rng: Mutex<StdRng>,
}

impl UniformDistance {
    /// Create a sampler, checking that the range is sensible
    pub fn new(config: &DistanceConfig) -> Result<Self, DistanceError> {
        let DistanceConfig { min, max, seed } = *config;
        if !(min.is_finite() && max.is_finite() && 0.0 <= min && min <= max) {
            return Err(DistanceError::Range { min, max });
        }

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            min,
            max,
            rng: Mutex::new(rng),
        })
    }

    fn sample(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.random_range(self.min..=self.max)
    }
}

/// Distances fixed in advance, per location and optionally per product.
#[derive(Clone, Debug, Default)]
pub struct DistanceTable {
    by_product: Map<(LocationId, ProductId), f64>,
    by_location: Map<LocationId, f64>,
}

impl DistanceTable {
    /// Build the table from catalog entries.
    ///
    /// A product-specific entry takes precedence over a location-wide one.
    pub fn new(entries: &[catalog::Distance]) -> Result<Self, DistanceError> {
        let mut table = Self::default();
        for entry in entries {
            if !(entry.distance.is_finite() && entry.distance >= 0.0) {
                return Err(DistanceError::Invalid {
                    location: entry.location.clone(),
                    distance: entry.distance,
                });
            }

            let duplicate = match &entry.product {
                Some(product) => table
                    .by_product
                    .claim((entry.location.clone(), product.clone()), entry.distance)
                    .is_some(),
                None => table
                    .by_location
                    .claim(entry.location.clone(), entry.distance)
                    .is_some(),
            };
            if duplicate {
                return Err(DistanceError::Duplicate(entry.location.clone()));
            }
        }
        Ok(table)
    }

    fn lookup(&self, location: &LocationId, product: &ProductId) -> Result<f64, DistanceError> {
        self.by_product
            .get(&(location.clone(), product.clone()))
            .or_else(|| self.by_location.get(location))
            .copied()
            .ok_or_else(|| DistanceError::Unknown {
                location: location.clone(),
                product: product.clone(),
            })
    }
}

/// The distance provider selected for a run
#[derive(Debug)]
pub enum Distances {
    /// Sample on every query
    Uniform(UniformDistance),
    /// Look up a fixed table
    Table(DistanceTable),
}

impl Distances {
    /// Use the catalog's fixed distances if it has any, otherwise sample.
    pub fn select(
        entries: &[catalog::Distance],
        config: &DistanceConfig,
    ) -> Result<Self, DistanceError> {
        if entries.is_empty() {
            Ok(Self::Uniform(UniformDistance::new(config)?))
        } else {
            Ok(Self::Table(DistanceTable::new(entries)?))
        }
    }
}

impl DistanceProvider<ProductId, LocationId> for Distances {
    type Error = DistanceError;

    fn distance_to(
        &self,
        location: &LocationId,
        product: &ProductId,
    ) -> impl Future<Output = Result<f64, DistanceError>> + Send {
        let answer = match self {
            Self::Uniform(uniform) => Ok(uniform.sample()),
            Self::Table(table) => table.lookup(location, product),
        };
        std::future::ready(answer)
    }
}

/// Errors configuring or querying distances
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DistanceError {
    /// The sampling range is empty, negative, or unbounded
    #[error("invalid distance range [{min}, {max}]")]
    Range {
        /// The configured lower bound
        min: f64,
        /// The configured upper bound
        max: f64,
    },
    /// A fixed distance is negative or non-finite
    #[error("invalid distance {distance} for location {location}")]
    Invalid {
        /// The location
        location: LocationId,
        /// The offending value
        distance: f64,
    },
    /// The same distance is given twice
    #[error("distance for location {0} is given more than once")]
    Duplicate(LocationId),
    /// No fixed distance applies
    #[error("no distance known for location {location} and product {product}")]
    Unknown {
        /// The location
        location: LocationId,
        /// The product
        product: ProductId,
    },
}
