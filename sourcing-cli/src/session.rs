//! Optimizing a batch of customer-sessions, one after another.

use crate::{LocationId, ProductId};
use serde::{Deserialize, Serialize};
use sourcing_core::{
    models::{Plan, PurchaseRequest},
    ports::{CandidateResolver, DistanceProvider},
};
use sourcing_engine::AllocationEngine;
use tracing::{Instrument as _, Level, event, span};

/// One customer's requests
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// The customer placing the requests
    pub customer: String,
    /// The requested products and quantities
    pub requests: Vec<PurchaseRequest<ProductId>>,
}

/// The outcome of one session
#[derive(Debug, Serialize)]
pub struct SessionReport {
    /// The customer the session belongs to
    pub customer: String,
    /// Either the plan or the collaborator failure that prevented it
    #[serde(flatten)]
    pub outcome: SessionOutcome,
}

/// Whether a session could be optimized
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SessionOutcome {
    /// The session was optimized
    Planned(Plan<ProductId, LocationId>),
    /// A collaborator failed; the session may be retried
    Failed {
        /// The failure, as text
        error: String,
    },
}

/// Optimize every session in order.
///
/// A collaborator failure is recorded against the session it interrupted and
/// does not stop the remaining sessions.
pub async fn optimize_sessions<R, D>(
    engine: &AllocationEngine,
    resolver: &R,
    distances: &D,
    sessions: Vec<Session>,
) -> Vec<SessionReport>
where
    R: CandidateResolver<ProductId = ProductId, LocationId = LocationId>,
    D: DistanceProvider<ProductId, LocationId>,
{
    let mut reports = Vec::with_capacity(sessions.len());

    for Session { customer, requests } in sessions {
        let span = span!(Level::INFO, "session", customer = customer.as_str());
        let outcome = match engine
            .optimize(resolver, distances, requests)
            .instrument(span)
            .await
        {
            Ok(plan) => SessionOutcome::Planned(plan),
            Err(err) => {
                event!(Level::ERROR, customer = customer.as_str(), err = err.to_string());
                SessionOutcome::Failed {
                    error: err.to_string(),
                }
            }
        };
        reports.push(SessionReport { customer, outcome });
    }

    reports
}
