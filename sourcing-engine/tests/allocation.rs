use rstest::*;
use rust_decimal_macros::dec;
use sourcing_core::models::{PurchaseRequest, QuantityError, RequestError};
use sourcing_engine::{AllocationEngine, EngineConfig};

mod common;
use common::{Catalog, Distances, candidate};

#[fixture]
fn engine() -> AllocationEngine {
    AllocationEngine::new(&EngineConfig {
        transport_rate: 0.1,
        timeout: None,
    })
    .unwrap()
}

#[rstest]
#[tokio::test]
async fn undersized_expensive_location_loses_both(engine: AllocationEngine) {
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", 5, dec!(2.0)),
            candidate("B", 50, dec!(1.0)),
        ],
    );
    let distances = Distances::uniform(10.0, &["A", "B"]);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", 20)])
        .await
        .unwrap();

    let allocation = plan.get(&"P").unwrap();
    let cheapest = allocation.cheapest.as_ref().unwrap();
    let convenient = allocation.convenient.as_ref().unwrap();

    assert_eq!(cheapest.location, "B");
    assert_eq!(cheapest.total_cost, dec!(40));
    assert_eq!(cheapest.transport_cost, dec!(20));
    assert_eq!(convenient.location, "B");
    assert_eq!(convenient.total_cost, dec!(40));
    assert!(plan.rejected.is_empty());
}

#[rstest]
#[tokio::test]
async fn cheap_location_with_capacity_wins_both(engine: AllocationEngine) {
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", 30, dec!(0.5)),
            candidate("B", 50, dec!(1.0)),
        ],
    );
    let distances = Distances::uniform(10.0, &["A", "B"]);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", 20)])
        .await
        .unwrap();

    let allocation = plan.get(&"P").unwrap();
    let cheapest = allocation.cheapest.as_ref().unwrap();
    let convenient = allocation.convenient.as_ref().unwrap();

    assert_eq!(cheapest.location, "A");
    assert_eq!(cheapest.total_cost, dec!(30));
    assert_eq!(convenient.location, "A");
    assert_eq!(convenient.location_name, "Warehouse A");
}

#[rstest]
#[tokio::test]
async fn criteria_diverge_when_cheapest_lacks_capacity(engine: AllocationEngine) {
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", 5, dec!(0.5)),
            candidate("B", 50, dec!(1.0)),
        ],
    );
    let distances = Distances::uniform(10.0, &["A", "B"]);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", 20)])
        .await
        .unwrap();

    let allocation = plan.get(&"P").unwrap();
    assert_eq!(allocation.cheapest.as_ref().unwrap().location, "A");
    assert_eq!(allocation.convenient.as_ref().unwrap().location, "B");
}

#[rstest]
#[tokio::test]
async fn no_candidates_means_no_decisions(engine: AllocationEngine) {
    let catalog = Catalog::default().stock("Q", vec![]);
    let distances = Distances::default();

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("Q", 7)])
        .await
        .unwrap();

    let allocation = plan.get(&"Q").unwrap();
    assert_eq!(allocation.quantity.get(), 7);
    assert!(allocation.cheapest.is_none());
    assert!(allocation.convenient.is_none());
    assert_eq!(plan.unsourced(), 1);
    assert_eq!(distances.queries(), 0);
}

#[rstest]
#[case::exactly_short(20, 19)]
#[case::far_short(50, 10)]
#[tokio::test]
async fn no_capacity_means_no_convenient(
    engine: AllocationEngine,
    #[case] quantity: i64,
    #[case] capacity: u32,
) {
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", capacity, dec!(1.0)),
            candidate("B", capacity, dec!(3.0)),
        ],
    );
    let distances = Distances::uniform(10.0, &["A", "B"]);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", quantity)])
        .await
        .unwrap();

    let allocation = plan.get(&"P").unwrap();
    assert_eq!(allocation.cheapest.as_ref().unwrap().location, "A");
    assert!(allocation.convenient.is_none());
}

#[rstest]
#[case::forward(["A", "B"], "A")]
#[case::reversed(["B", "A"], "B")]
#[tokio::test]
async fn ties_go_to_first_seen(
    engine: AllocationEngine,
    #[case] order: [&'static str; 2],
    #[case] expected: &'static str,
) {
    let catalog = Catalog::default().stock(
        "P",
        order
            .iter()
            .map(|&location| candidate(location, 50, dec!(1.0)))
            .collect(),
    );
    let distances = Distances::uniform(10.0, &["A", "B"]);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", 20)])
        .await
        .unwrap();

    let allocation = plan.get(&"P").unwrap();
    assert_eq!(allocation.cheapest.as_ref().unwrap().location, expected);
    assert_eq!(allocation.convenient.as_ref().unwrap().location, expected);
}

#[rstest]
#[tokio::test]
async fn ties_across_different_cost_splits(engine: AllocationEngine) {
    // A: 20 × 10 × 0.1 + 2.0 × 20 = 60
    // B: 20 × 30 × 0.1 + 0.0 × 20 = 60
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", 50, dec!(2.0)),
            candidate("B", 50, dec!(0.0)),
        ],
    );
    let distances = Distances::default().set("A", 10.0).set("B", 30.0);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", 20)])
        .await
        .unwrap();

    let cheapest = plan.get(&"P").unwrap().cheapest.clone().unwrap();
    assert_eq!(cheapest.location, "A");
    assert_eq!(cheapest.total_cost, dec!(60));
    assert_eq!(cheapest.transport_cost, dec!(20));
}

#[rstest]
#[tokio::test]
async fn convenient_never_beats_cheapest(engine: AllocationEngine) {
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", 10, dec!(0.25)),
            candidate("B", 25, dec!(1.75)),
            candidate("C", 40, dec!(4.5)),
            candidate("D", 100, dec!(9.99)),
        ],
    );
    let distances = Distances::default()
        .set("A", 80.0)
        .set("B", 12.5)
        .set("C", 3.0)
        .set("D", 1.0);

    for quantity in 1..=100 {
        let plan = engine
            .optimize(&catalog, &distances, [PurchaseRequest::new("P", quantity)])
            .await
            .unwrap();

        let allocation = plan.get(&"P").unwrap();
        let cheapest = allocation.cheapest.as_ref().unwrap();
        let convenient = allocation.convenient.as_ref().unwrap();
        assert!(
            convenient.total_cost >= cheapest.total_cost,
            "quantity {quantity}: {} < {}",
            convenient.total_cost,
            cheapest.total_cost
        );
    }
}

#[rstest]
#[tokio::test]
async fn repeated_runs_are_identical(engine: AllocationEngine) {
    let catalog = Catalog::default()
        .stock(
            "T1",
            vec![
                candidate("C1", 40, dec!(3.3)),
                candidate("C2", 15, dec!(1.2)),
            ],
        )
        .stock("T2", vec![candidate("C2", 90, dec!(7.05))]);
    let distances = Distances::default().set("C1", 17.25).set("C2", 64.5);
    let requests = [PurchaseRequest::new("T1", 20), PurchaseRequest::new("T2", 3)];

    let first = engine
        .optimize(&catalog, &distances, requests.clone())
        .await
        .unwrap();
    let second = engine
        .optimize(&catalog, &distances, requests)
        .await
        .unwrap();

    assert_eq!(first, second);
    // Distances are asked again on every run, once per candidate
    assert_eq!(distances.queries(), 6);
}

#[rstest]
#[tokio::test]
async fn bad_entries_do_not_abort_the_session(engine: AllocationEngine) {
    let catalog = Catalog::default()
        .stock("T1", vec![candidate("C1", 40, dec!(3.0))])
        .stock("T2", vec![candidate("C1", 40, dec!(3.0))]);
    let distances = Distances::uniform(5.0, &["C1"]);

    let plan = engine
        .optimize(
            &catalog,
            &distances,
            [
                PurchaseRequest::new("T1", 0),
                PurchaseRequest::new("T9", 4),
                PurchaseRequest::new("T2", 4),
                PurchaseRequest::new("T2", 6),
                PurchaseRequest::new("T1", -2),
                PurchaseRequest::new("T9", 2),
            ],
        )
        .await
        .unwrap();

    assert_eq!(plan.decisions.len(), 1);
    assert_eq!(plan.get(&"T2").unwrap().quantity.get(), 4);

    let rejected = plan
        .rejected
        .iter()
        .map(|rejection| (rejection.index, rejection.product, rejection.reason.clone()))
        .collect::<Vec<_>>();
    assert_eq!(
        rejected,
        vec![
            (
                0,
                "T1",
                RequestError::InvalidQuantity(QuantityError::NonPositive(0))
            ),
            (1, "T9", RequestError::UnknownProduct),
            (3, "T2", RequestError::DuplicateProduct { first: 2 }),
            (
                4,
                "T1",
                RequestError::InvalidQuantity(QuantityError::NonPositive(-2))
            ),
            (5, "T9", RequestError::UnknownProduct),
        ]
    );
}

#[rstest]
#[case::unknown_product("T9", 1, vec![
    (0, RequestError::UnknownProduct),
    (1, RequestError::UnknownProduct),
])]
#[case::invalid_quantity("T1", 0, vec![
    (0, RequestError::InvalidQuantity(QuantityError::NonPositive(0))),
])]
#[tokio::test]
async fn rejected_entries_do_not_claim_their_product(
    engine: AllocationEngine,
    #[case] product: &'static str,
    #[case] first_quantity: i64,
    #[case] expected: Vec<(usize, RequestError)>,
) {
    let catalog = Catalog::default().stock("T1", vec![candidate("C1", 40, dec!(3.0))]);
    let distances = Distances::uniform(5.0, &["C1"]);

    let plan = engine
        .optimize(
            &catalog,
            &distances,
            [
                PurchaseRequest::new(product, first_quantity),
                PurchaseRequest::new(product, 3),
            ],
        )
        .await
        .unwrap();

    let rejected = plan
        .rejected
        .iter()
        .map(|rejection| (rejection.index, rejection.reason.clone()))
        .collect::<Vec<_>>();
    assert_eq!(rejected, expected);
    assert_eq!(plan.decisions.len(), 2 - expected.len());
}

#[rstest]
#[tokio::test]
async fn decisions_follow_submission_order(engine: AllocationEngine) {
    let catalog = Catalog::default()
        .stock("T1", vec![candidate("C1", 40, dec!(3.0))])
        .stock("T2", vec![])
        .stock("T3", vec![candidate("C1", 40, dec!(3.0))]);
    let distances = Distances::uniform(5.0, &["C1"]);

    let plan = engine
        .optimize(
            &catalog,
            &distances,
            [
                PurchaseRequest::new("T3", 1),
                PurchaseRequest::new("T1", 1),
                PurchaseRequest::new("T2", 1),
            ],
        )
        .await
        .unwrap();

    let order = plan.decisions.keys().copied().collect::<Vec<_>>();
    assert_eq!(order, vec!["T3", "T1", "T2"]);
}

#[tokio::test]
async fn zero_transport_rate_ranks_by_storage_alone() {
    let engine = AllocationEngine::new(&EngineConfig {
        transport_rate: 0.0,
        timeout: None,
    })
    .unwrap();
    let catalog = Catalog::default().stock(
        "P",
        vec![
            candidate("A", 50, dec!(2.0)),
            candidate("B", 50, dec!(1.5)),
        ],
    );
    let distances = Distances::default().set("A", 1.0).set("B", 1000.0);

    let plan = engine
        .optimize(&catalog, &distances, [PurchaseRequest::new("P", 10)])
        .await
        .unwrap();

    let cheapest = plan.get(&"P").unwrap().cheapest.clone().unwrap();
    assert_eq!(cheapest.location, "B");
    assert_eq!(cheapest.transport_cost, dec!(0));
    assert_eq!(cheapest.total_cost, dec!(15));
}
