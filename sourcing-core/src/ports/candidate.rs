use crate::models::StorageCandidate;
use std::{fmt::Debug, hash::Hash};

/// Catalog interface for finding where a product is stocked.
///
/// This is a pull interface: the allocation asks for the candidates of one
/// product at a time and never caches the answer across calls.
///
/// # Ordering
///
/// The order of the returned candidates is not semantically meaningful, but it
/// must be stable within a call. When two candidates cost the same, the one
/// returned first is chosen.
pub trait CandidateResolver {
    /// A stable, opaque product identity
    type ProductId: Clone + Eq + Hash + Debug + Send + Sync;

    /// A stable, opaque storage location identity
    type LocationId: Clone + Debug + Send + Sync;

    /// Error type for failing to reach the catalog
    type Error: std::error::Error + Send + Sync + 'static;

    /// List the locations currently stocking `product`.
    ///
    /// # Returns
    ///
    /// Ok(Some(candidates)) if the product is known. The vector is empty if
    /// no location stocks it.
    ///
    /// Ok(None) if the product does not exist.
    fn candidates_for(
        &self,
        product: &Self::ProductId,
    ) -> impl Future<Output = Result<Option<Vec<StorageCandidate<Self::LocationId>>>, Self::Error>>
    + Send;
}
