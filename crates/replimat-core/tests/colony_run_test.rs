//! Long-running colony scenarios through the public engine API.

use replimat_core::generation::ColonyConfig;
use replimat_core::prelude::*;
use replimat_logic::catalog::Catalog;
use replimat_logic::constants::meals;
use replimat_logic::eligibility::ConsumerPolicy;
use replimat_logic::error::DispenseError;
use replimat_logic::feedstock::FeedstockTank;
use replimat_logic::settings::ReplicatorSettings;

fn new_engine(seed: u64) -> ColonyEngine {
    ColonyEngine::new(Catalog::vanilla(), ReplicatorSettings::default(), seed)
}

#[test]
fn colony_feeds_itself_without_overdrawing() {
    let mut engine = new_engine(7);
    engine.generate(&ColonyConfig::default());

    let mut served = 0;
    for _ in 0..60 {
        let events = engine.update(100);
        served += events
            .iter()
            .filter(|e| matches!(e, FeedingEvent::Served { .. }))
            .count();
        for network in engine.networks.iter() {
            assert!(network.pool.quantity() >= 0.0);
            assert!(network.pool.tanks().iter().all(|tank| tank.stored >= 0.0));
        }
    }

    assert!(served > 0);
    assert_eq!(served as u32, engine.meals_served());
    assert_eq!(engine.tick(), 6000);
}

#[test]
fn starving_network_reports_insufficient_stock() {
    let mut engine = new_engine(1);
    // Exactly two lavish meals (2 x 3.52 L) plus change
    let network = engine.add_network(vec![FeedstockTank::new(8.0, 8.0)]);
    engine.spawn_computer(network, true).unwrap();
    for i in 0..3 {
        engine.spawn_terminal(network, format!("T{}", i)).unwrap();
    }
    let policy = ConsumerPolicy::allowing([meals::LAVISH]);
    for name in ["Ada", "Bruno", "Cass"] {
        engine
            .spawn_colonist(name, network, policy.clone(), 1.0)
            .unwrap();
    }

    let events = engine.update(30);

    let served = events
        .iter()
        .filter(|e| matches!(e, FeedingEvent::Served { .. }))
        .count();
    let starved = events
        .iter()
        .filter(|e| {
            matches!(
                e,
                FeedingEvent::Refused {
                    error: DispenseError::InsufficientStock { .. },
                    ..
                }
            )
        })
        .count();
    assert_eq!(served, 2);
    assert_eq!(starved, 1);

    let left = engine.networks.get(network).unwrap().pool.quantity();
    assert!(left >= 0.0 && left < 3.52);
}

#[test]
fn same_seed_same_story() {
    let run = |seed| {
        let mut engine = new_engine(seed);
        engine.generate(&ColonyConfig::default());
        engine
            .update(3000)
            .into_iter()
            .filter_map(|e| match e {
                FeedingEvent::Served { meal, .. } => Some(meal),
                FeedingEvent::Refused { .. } => None,
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn batch_then_dispense_share_feedstock() {
    let mut engine = new_engine(3);
    let network = engine.add_network(vec![FeedstockTank::new(11.0, 100.0)]);
    engine.spawn_computer(network, true).unwrap();
    let terminal = engine.spawn_terminal(network, "T").unwrap();

    // 11 L / 2.4 L per survival meal
    let plan = engine.request_batch(terminal).unwrap();
    assert_eq!(plan.max_count(), 4);
    engine.confirm_batch(terminal, &plan, 4).unwrap();

    let plan = engine.request_batch(terminal);
    assert_eq!(
        plan.unwrap_err(),
        EngineError::Dispense(DispenseError::BatchCapacityZero)
    );

    engine.refill(network, 50.0).unwrap();
    assert!(engine.request_batch(terminal).is_ok());
}
