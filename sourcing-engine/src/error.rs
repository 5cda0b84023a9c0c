use std::{fmt, time::Duration};

/// The external services an allocation depends on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collaborator {
    /// The catalog answering which locations stock a product
    CandidateResolver,
    /// The service measuring how far a location is
    DistanceProvider,
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CandidateResolver => write!(f, "candidate resolver"),
            Self::DistanceProvider => write!(f, "distance provider"),
        }
    }
}

/// A failure at the collaborator boundary.
///
/// These abort the session being optimized. None of them mean "no
/// candidate": a caller can retry the session or report the outage, whereas
/// a genuine shortage is an absent decision inside a successful plan.
#[derive(Debug, thiserror::Error)]
pub enum EngineError<ResolverError, DistanceError> {
    /// The catalog failed to answer
    #[error("candidate resolver unavailable: {0}")]
    Resolver(#[source] ResolverError),
    /// The distance provider failed to answer
    #[error("distance provider unavailable: {0}")]
    Distance(#[source] DistanceError),
    /// A collaborator did not answer before the configured deadline
    #[error("{collaborator} did not answer within {limit:?}")]
    Timeout {
        /// Which collaborator timed out
        collaborator: Collaborator,
        /// The deadline that elapsed
        limit: Duration,
    },
    /// The distance provider answered with a negative or non-finite value
    #[error("distance provider answered {distance} for location {location}")]
    InvalidDistance {
        /// The location being measured, as debug-formatted text
        location: String,
        /// The offending answer
        distance: f64,
    },
}

impl<ResolverError, DistanceError> EngineError<ResolverError, DistanceError> {
    /// The collaborator responsible for the failure
    pub fn collaborator(&self) -> Collaborator {
        match self {
            Self::Resolver(_) => Collaborator::CandidateResolver,
            Self::Distance(_) | Self::InvalidDistance { .. } => Collaborator::DistanceProvider,
            Self::Timeout { collaborator, .. } => *collaborator,
        }
    }
}
