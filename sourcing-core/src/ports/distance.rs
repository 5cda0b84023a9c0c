/// Interface for measuring how far a storage location is.
///
/// Distances are queried once per candidate per evaluation and are never
/// reused, so an implementation is free to answer differently on each call
/// (e.g. by sampling). Answers must be finite and non-negative.
pub trait DistanceProvider<ProductId, LocationId> {
    /// Error type for failing to produce a distance
    type Error: std::error::Error + Send + Sync + 'static;

    /// The travel distance for sourcing `product` from `location`
    fn distance_to(
        &self,
        location: &LocationId,
        product: &ProductId,
    ) -> impl Future<Output = Result<f64, Self::Error>> + Send;
}
