mod candidate;
mod map;
mod outcome;
mod quantity;
mod request;

pub use candidate::{StorageCandidate, StorageRate, StorageRateError};
pub use map::Map;
pub use outcome::{Allocation, Decision, Plan, Rejection};
pub use quantity::{Quantity, QuantityError};
pub use request::{PurchaseRequest, RequestError};
