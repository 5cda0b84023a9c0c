use crate::{
    Collaborator, ConfigError, EngineConfig, EngineError,
    cost::{self, Cost},
};
use rust_decimal::Decimal;
use sourcing_core::{
    models::{
        Allocation, Decision, Map, Plan, PurchaseRequest, Quantity, Rejection, RequestError,
        StorageCandidate,
    },
    ports::{CandidateResolver, DistanceProvider},
};
use std::{fmt::Debug, time::Duration};
use tracing::{Instrument as _, Level, event, span};

/// Chooses, per requested product, the cheapest storage location and the
/// cheapest location that can supply the full quantity.
///
/// The engine holds only its configuration. Every call to
/// [`optimize`](Self::optimize) is independent, so a single engine can serve
/// any number of sessions.
#[derive(Clone, Debug)]
pub struct AllocationEngine {
    transport_rate: Decimal,
    timeout: Option<Duration>,
}

impl AllocationEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            transport_rate: config.transport_rate()?,
            timeout: config.timeout()?,
        })
    }

    /// The per-unit, per-distance transport rate in effect
    pub fn transport_rate(&self) -> Decimal {
        self.transport_rate
    }

    /// Optimize a customer-session.
    ///
    /// Requests are screened first: entries with a non-positive quantity,
    /// products unknown to the catalog, and repeats of a product that an
    /// earlier entry already claimed are rejected individually, and the
    /// remaining entries are still optimized. Only then are candidates priced, one product at a time, in
    /// a single pass over the catalog's answer.
    ///
    /// # Arguments
    ///
    /// - `resolver`: the catalog listing the candidates of each product
    /// - `distances`: queried once per candidate, never cached
    /// - `requests`: the session, in submission order
    ///
    /// # Returns
    ///
    /// A [`Plan`] with one [`Allocation`] per accepted request and one
    /// [`Rejection`] per refused request, or an [`EngineError`] if a
    /// collaborator could not answer.
    pub async fn optimize<R, D>(
        &self,
        resolver: &R,
        distances: &D,
        requests: impl IntoIterator<Item = PurchaseRequest<R::ProductId>>,
    ) -> Result<Plan<R::ProductId, R::LocationId>, EngineError<R::Error, D::Error>>
    where
        R: CandidateResolver,
        D: DistanceProvider<R::ProductId, R::LocationId>,
    {
        let span = span!(Level::INFO, "optimize");
        async move {
            let mut plan = Plan::default();
            let accepted = screen(requests, &mut plan.rejected);

            // Every product is resolved before anything is priced, so that an
            // unknown product is rejected before optimization begins. Only a
            // resolved entry claims its product (`Some(index)`); a product the
            // catalog does not know is remembered as `None` and not asked
            // about again.
            let mut seen = Map::<R::ProductId, Option<usize>>::default();
            let mut resolved = Vec::with_capacity(accepted.len());
            for (index, product, quantity) in accepted {
                let reason = match seen.get(&product) {
                    Some(&Some(first)) => Some(RequestError::DuplicateProduct { first }),
                    Some(None) => Some(RequestError::UnknownProduct),
                    None => None,
                };
                if let Some(reason) = reason {
                    reject(&mut plan.rejected, index, product, reason);
                    continue;
                }

                let candidates = self
                    .call(
                        Collaborator::CandidateResolver,
                        resolver.candidates_for(&product),
                        EngineError::Resolver,
                    )
                    .await?;

                match candidates {
                    Some(candidates) => {
                        seen.insert(product.clone(), Some(index));
                        resolved.push((product, quantity, candidates));
                    }
                    None => {
                        seen.insert(product.clone(), None);
                        reject(
                            &mut plan.rejected,
                            index,
                            product,
                            RequestError::UnknownProduct,
                        );
                    }
                }
            }
            plan.rejected.sort_by_key(|rejection| rejection.index);

            for (product, quantity, candidates) in resolved {
                let allocation = self
                    .allocate(distances, &product, quantity, candidates)
                    .await?;
                plan.decisions.insert(product, allocation);
            }

            event!(
                Level::INFO,
                allocated = plan.decisions.len(),
                rejected = plan.rejected.len(),
                unsourced = plan.unsourced(),
            );
            Ok(plan)
        }
        .instrument(span)
        .await
    }

    /// Price every candidate once, feeding both running minimums.
    async fn allocate<P, L, D, RE>(
        &self,
        distances: &D,
        product: &P,
        quantity: Quantity,
        candidates: Vec<StorageCandidate<L>>,
    ) -> Result<Allocation<L>, EngineError<RE, D::Error>>
    where
        P: Debug,
        L: Clone + Debug,
        D: DistanceProvider<P, L>,
    {
        let mut cheapest = RunningMin::default();
        let mut convenient = RunningMin::default();

        for candidate in candidates.iter() {
            let answer = self
                .call(
                    Collaborator::DistanceProvider,
                    distances.distance_to(&candidate.location, product),
                    EngineError::Distance,
                )
                .await?;
            let distance =
                cost::non_negative(answer).ok_or_else(|| EngineError::InvalidDistance {
                    location: format!("{:?}", candidate.location),
                    distance: answer,
                })?;

            let cost = cost::evaluate(
                quantity,
                distance,
                self.transport_rate,
                candidate.storage_rate,
            );
            event!(
                Level::DEBUG,
                product = ?product,
                location = ?candidate.location,
                %distance,
                transport = %cost.transport,
                total = %cost.total,
            );

            cheapest.offer(cost, || decide(candidate, cost));
            if candidate.covers(quantity) {
                convenient.offer(cost, || decide(candidate, cost));
            }
        }

        Ok(Allocation {
            quantity,
            cheapest: cheapest.0,
            convenient: convenient.0,
        })
    }

    /// Await a collaborator, bounded by the configured deadline.
    async fn call<T, E, RE, DE>(
        &self,
        collaborator: Collaborator,
        call: impl Future<Output = Result<T, E>>,
        wrap: impl FnOnce(E) -> EngineError<RE, DE>,
    ) -> Result<T, EngineError<RE, DE>>
    where
        E: std::error::Error,
    {
        let answer = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call).await.map_err(|_| {
                event!(Level::ERROR, %collaborator, ?limit, "deadline elapsed");
                EngineError::Timeout {
                    collaborator,
                    limit,
                }
            })?,
            None => call.await,
        };

        answer.map_err(|err| {
            event!(Level::ERROR, %collaborator, err = err.to_string());
            wrap(err)
        })
    }
}

/// Validate quantities, recording refusals as we go.
fn screen<P: Debug>(
    requests: impl IntoIterator<Item = PurchaseRequest<P>>,
    rejected: &mut Vec<Rejection<P>>,
) -> Vec<(usize, P, Quantity)> {
    let mut accepted = Vec::new();

    for (index, PurchaseRequest { product, quantity }) in requests.into_iter().enumerate() {
        match Quantity::try_from(quantity) {
            Ok(quantity) => accepted.push((index, product, quantity)),
            Err(err) => reject(rejected, index, product, err.into()),
        }
    }

    accepted
}

fn reject<P: Debug>(
    rejected: &mut Vec<Rejection<P>>,
    index: usize,
    product: P,
    reason: RequestError,
) {
    event!(Level::WARN, index, product = ?product, reason = reason.to_string());
    rejected.push(Rejection {
        index,
        product,
        reason,
    });
}

fn decide<L: Clone>(candidate: &StorageCandidate<L>, cost: Cost) -> Decision<L> {
    Decision {
        location: candidate.location.clone(),
        location_name: candidate.name.clone(),
        total_cost: cost.total,
        transport_cost: cost.transport,
    }
}

/// The best decision seen so far under one criterion.
///
/// Only a strictly lower cost replaces the incumbent, so the first candidate
/// at the minimum wins.
struct RunningMin<L>(Option<Decision<L>>);

impl<L> Default for RunningMin<L> {
    fn default() -> Self {
        Self(None)
    }
}

impl<L> RunningMin<L> {
    fn offer(&mut self, cost: Cost, decide: impl FnOnce() -> Decision<L>) {
        if self
            .0
            .as_ref()
            .is_none_or(|best| cost.total < best.total_cost)
        {
            self.0 = Some(decide());
        }
    }
}
