#![allow(dead_code)]
use rust_decimal::Decimal;
use sourcing_core::{
    models::{Map, StorageCandidate, StorageRate},
    ports::{CandidateResolver, DistanceProvider},
};
use std::{
    num::NonZeroU32,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

pub type Id = &'static str;

pub fn candidate(location: Id, capacity: u32, storage_rate: Decimal) -> StorageCandidate<Id> {
    StorageCandidate {
        location,
        name: format!("Warehouse {location}"),
        capacity: NonZeroU32::new(capacity).unwrap(),
        storage_rate: StorageRate::new(storage_rate).unwrap(),
    }
}

#[derive(Debug, thiserror::Error)]
#[error("{0} is offline")]
pub struct Offline(pub &'static str);

/// An in-memory catalog that answers in insertion order
#[derive(Default)]
pub struct Catalog {
    stock: Map<Id, Vec<StorageCandidate<Id>>>,
    offline: bool,
}

impl Catalog {
    pub fn stock(mut self, product: Id, candidates: Vec<StorageCandidate<Id>>) -> Self {
        self.stock.insert(product, candidates);
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }
}

impl CandidateResolver for Catalog {
    type ProductId = Id;
    type LocationId = Id;
    type Error = Offline;

    fn candidates_for(
        &self,
        product: &Id,
    ) -> impl Future<Output = Result<Option<Vec<StorageCandidate<Id>>>, Offline>> + Send {
        let answer = if self.offline {
            Err(Offline("catalog"))
        } else {
            Ok(self.stock.get(product).cloned())
        };
        std::future::ready(answer)
    }
}

/// Fixed distances per location, counting every query
#[derive(Default)]
pub struct Distances {
    by_location: Map<Id, f64>,
    delay: Option<Duration>,
    offline: bool,
    queries: AtomicUsize,
}

impl Distances {
    pub fn uniform(distance: f64, locations: &[Id]) -> Self {
        locations
            .iter()
            .fold(Self::default(), |this, location| this.set(*location, distance))
    }

    pub fn set(mut self, location: Id, distance: f64) -> Self {
        self.by_location.insert(location, distance);
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Default::default()
        }
    }

    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl DistanceProvider<Id, Id> for Distances {
    type Error = Offline;

    fn distance_to(
        &self,
        location: &Id,
        _product: &Id,
    ) -> impl Future<Output = Result<f64, Offline>> + Send {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let answer = if self.offline {
            Err(Offline("distance service"))
        } else {
            self.by_location
                .get(location)
                .copied()
                .ok_or(Offline("distance service"))
        };
        let delay = self.delay;
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            answer
        }
    }
}
