use super::QuantityError;

/// One line of a customer-session: a product and how many units of it.
///
/// The quantity is kept exactly as submitted. It is validated when the
/// session is optimized, so that a bad entry is reported against its own
/// position rather than failing the whole session at parse time.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseRequest<ProductId> {
    /// The requested product
    pub product: ProductId,
    /// The requested number of units
    pub quantity: i64,
}

impl<ProductId> PurchaseRequest<ProductId> {
    /// Convenience constructor
    pub fn new(product: ProductId, quantity: i64) -> Self {
        Self { product, quantity }
    }
}

/// The reasons a single request is refused before any costs are evaluated.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "detail", rename_all = "snake_case")
)]
pub enum RequestError {
    /// The quantity is not a usable number of units
    #[error("invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),
    /// The catalog does not know the product
    #[error("unknown product")]
    UnknownProduct,
    /// The product was already requested earlier in the same session
    #[error("product already requested by entry {first}")]
    DuplicateProduct {
        /// The index of the entry that is being optimized instead
        first: usize,
    },
}
