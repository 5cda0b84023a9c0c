mod candidate;
mod distance;

pub use candidate::CandidateResolver;
pub use distance::DistanceProvider;
