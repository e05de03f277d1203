//! Replimat Headless Simulation Harness
//!
//! Validates pure replicator logic, the bundled data files and the colony
//! engine without a host game. Runs entirely in-process — no rendering.
//!
//! Usage:
//!   cargo run -p replimat-simtest
//!   cargo run -p replimat-simtest -- --verbose
//!   RUST_LOG=replimat_logic=debug cargo run -p replimat-simtest

use std::collections::BTreeMap;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use replimat_core::generation::ColonyConfig;
use replimat_core::prelude::*;
use replimat_logic::catalog::{Catalog, Preferability};
use replimat_logic::constants::{limits, meals};
use replimat_logic::eligibility::{eligible, ConsumerPolicy};
use replimat_logic::error::DispenseError;
use replimat_logic::feedstock::{self, FeedstockConversion, FeedstockPool, FeedstockTank};
use replimat_logic::production::{ProductionPhase, ProductionState};
use replimat_logic::selection::{select, SelectionMode};
use replimat_logic::settings::{validate_settings, ReplicatorSettings};
use replimat_logic::terminal::{NetworkHandle, Terminal};

// ── Bundled data (same files the tests use) ─────────────────────────────
const CATALOG_JSON: &str = include_str!("../../../data/meal_catalog.json");
const SETTINGS_TOML: &str = include_str!("../../../data/replimat.toml");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Replimat Simulation Harness ===\n");

    let mut results = Vec::new();

    // 1. Data files
    let (catalog, settings) = match load_data(&mut results) {
        Some(data) => data,
        None => {
            report(&results, verbose);
            std::process::exit(1);
        }
    };

    // 2. Eligibility filter sweep
    results.extend(validate_eligibility(&catalog, &settings, verbose));

    // 3. Selection policy
    results.extend(validate_selection(&catalog, &settings, verbose));

    // 4. Feedstock ledger
    results.extend(validate_feedstock(verbose));

    // 5. Production cycle and terminal scenarios
    results.extend(validate_terminal(&catalog, &settings, verbose));

    // 6. Colony engine run
    results.extend(validate_colony(&catalog, &settings, verbose));

    if !report(&results, verbose) {
        std::process::exit(1);
    }
}

/// Print the summary. Returns true when everything passed.
fn report(results: &[TestResult], verbose: bool) -> bool {
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );
    tracing::info!(passed, failed, "simulation harness finished");
    failed == 0
}

// ── 1. Data Files ───────────────────────────────────────────────────────

fn load_data(results: &mut Vec<TestResult>) -> Option<(Catalog, ReplicatorSettings)> {
    println!("--- Data Files ---");

    let catalog = match Catalog::from_json(CATALOG_JSON) {
        Ok(c) => c,
        Err(e) => {
            results.push(TestResult {
                name: "catalog_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            return None;
        }
    };
    results.push(TestResult {
        name: "catalog_parse".into(),
        passed: !catalog.is_empty(),
        detail: format!("{} item kinds loaded", catalog.len()),
    });

    let has_batch_item = catalog.get(meals::SURVIVAL_PACK).is_some();
    let has_default_item = catalog.get(meals::LAVISH).is_some();
    results.push(TestResult {
        name: "catalog_key_items".into(),
        passed: has_batch_item && has_default_item,
        detail: format!("survival_pack={} lavish={}", has_batch_item, has_default_item),
    });

    let settings = match ReplicatorSettings::from_toml_str(SETTINGS_TOML) {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "settings_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            return None;
        }
    };
    let errors = validate_settings(&settings);
    results.push(TestResult {
        name: "settings_valid".into(),
        passed: errors.is_empty(),
        detail: format!("{} validation errors", errors.len()),
    });
    results.push(TestResult {
        name: "settings_batch_item_known".into(),
        passed: catalog.get(&settings.batch_item).is_some(),
        detail: format!("batch item {}", settings.batch_item),
    });

    Some((catalog, settings))
}

// ── 2. Eligibility ──────────────────────────────────────────────────────

fn validate_eligibility(
    catalog: &Catalog,
    settings: &ReplicatorSettings,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Eligibility Filter ---");
    let mut results = Vec::new();
    let names = catalog.def_names();

    // Every subset of the catalog as a consumer policy
    let mut violations = 0;
    let mut checked = 0;
    for mask in 0u32..(1 << names.len().min(16)) {
        let policy = ConsumerPolicy::allowing(
            names
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, n)| n.as_str()),
        );
        for item in eligible(&policy, catalog, settings) {
            checked += 1;
            if item.nutrition <= settings.min_meal_nutrition
                || settings.is_excluded(&item.def_name)
                || !item.is_meal()
            {
                violations += 1;
            }
        }
    }
    results.push(TestResult {
        name: "eligibility_invariants".into(),
        passed: violations == 0,
        detail: format!("{} eligible entries checked, {} violations", checked, violations),
    });

    let none = eligible(&ConsumerPolicy::none(), catalog, settings);
    results.push(TestResult {
        name: "eligibility_no_policy_empty".into(),
        passed: none.is_empty(),
        detail: format!("{} entries for a consumer without policy", none.len()),
    });

    if verbose {
        let all = eligible(&ConsumerPolicy::unrestricted(catalog), catalog, settings);
        println!("  Eligible for an unrestricted consumer:");
        for item in all {
            println!("    {:18} {:?}", item.def_name, item.preferability);
        }
    }

    results
}

// ── 3. Selection ────────────────────────────────────────────────────────

fn validate_selection(
    catalog: &Catalog,
    settings: &ReplicatorSettings,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Selection Policy ---");
    let mut results = Vec::new();
    let candidates = eligible(&ConsumerPolicy::unrestricted(catalog), catalog, settings);
    let mut rng = StdRng::seed_from_u64(2024);

    // QualityFirst: only top tier, ties roughly uniform
    let trials = 30_000;
    let mut counts: BTreeMap<String, u32> = BTreeMap::new();
    let mut off_tier = 0;
    for _ in 0..trials {
        if let Some(item) = select(&candidates, SelectionMode::QualityFirst, &mut rng) {
            if item.preferability != Preferability::MealLavish {
                off_tier += 1;
            }
            *counts.entry(item.def_name.clone()).or_insert(0) += 1;
        }
    }
    results.push(TestResult {
        name: "selection_quality_first_top_tier".into(),
        passed: off_tier == 0,
        detail: format!("{} picks below lavish", off_tier),
    });

    let expected = trials as f64 / counts.len().max(1) as f64;
    let worst = counts
        .values()
        .map(|&c| (c as f64 - expected).abs() / expected)
        .fold(0.0, f64::max);
    results.push(TestResult {
        name: "selection_tie_fairness".into(),
        passed: counts.len() == 3 && worst < 0.05,
        detail: format!("{} tied meals, worst deviation {:.2}%", counts.len(), worst * 100.0),
    });

    if verbose {
        for (name, count) in &counts {
            println!("    {:18} {}", name, count);
        }
    }

    // Balanced: never awful when better exists
    let awful = (0..2000)
        .filter_map(|_| select(&candidates, SelectionMode::Balanced, &mut rng))
        .filter(|item| item.preferability == Preferability::MealAwful)
        .count();
    results.push(TestResult {
        name: "selection_balanced_avoids_awful".into(),
        passed: awful == 0,
        detail: format!("{} awful picks in 2000", awful),
    });

    results.push(TestResult {
        name: "selection_empty_none".into(),
        passed: select(&[], SelectionMode::Balanced, &mut rng).is_none(),
        detail: "empty eligible set yields no meal".into(),
    });

    results
}

// ── 4. Feedstock ────────────────────────────────────────────────────────

fn validate_feedstock(_verbose: bool) -> Vec<TestResult> {
    println!("--- Feedstock Ledger ---");
    let mut results = Vec::new();

    let pool = FeedstockPool::with_quantity(100.0);
    let ok = pool.try_consume(10.0);
    results.push(TestResult {
        name: "feedstock_consume_success".into(),
        passed: ok && (pool.quantity() - 90.0).abs() < 1e-9,
        detail: format!("100 L - 10 L = {:.1} L", pool.quantity()),
    });

    let pool = FeedstockPool::with_quantity(5.0);
    let refused = !pool.try_consume(10.0);
    results.push(TestResult {
        name: "feedstock_consume_refused".into(),
        passed: refused && (pool.quantity() - 5.0).abs() < 1e-9,
        detail: format!("pool stays at {:.1} L", pool.quantity()),
    });

    // Batch cap: 12.5 units of mass, 1 unit each, cap 30 → 12
    let unit = replimat_logic::catalog::ItemKind::new(
        "MealUnit",
        "unit meal",
        0.9,
        1.0,
        Preferability::MealSimple,
    );
    let pool = FeedstockPool::with_quantity(12.5);
    let cap = feedstock::plan_batch(&pool, &unit, limits::BATCH_CAP, &FeedstockConversion::new(1.0))
        .map(|plan| plan.max_count());
    results.push(TestResult {
        name: "feedstock_batch_cap".into(),
        passed: cap == Ok(12),
        detail: format!("batch cap {:?}", cap),
    });

    // Many threads, one pool
    let pool = Arc::new(FeedstockPool::new(vec![
        FeedstockTank::new(60.0, 60.0),
        FeedstockTank::new(40.0, 40.0),
    ]));
    let debits: usize = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let pool = Arc::clone(&pool);
                scope.spawn(move || (0..100).filter(|_| pool.try_consume(0.7)).count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap_or(0)).sum()
    });
    results.push(TestResult {
        name: "feedstock_concurrent_no_overdraw".into(),
        passed: debits == 142 && pool.quantity() >= 0.0,
        detail: format!("{} debits of 0.7 L, {:.2} L left", debits, pool.quantity()),
    });

    results
}

// ── 5. Terminal ─────────────────────────────────────────────────────────

fn validate_terminal(
    catalog: &Catalog,
    settings: &ReplicatorSettings,
    _verbose: bool,
) -> Vec<TestResult> {
    println!("--- Terminal & Production ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(7);
    let policy = ConsumerPolicy::unrestricted(catalog);

    let mut state = ProductionState { ticks_remaining: 1 };
    state.tick();
    results.push(TestResult {
        name: "production_last_tick_idle".into(),
        passed: state.phase() == ProductionPhase::Idle,
        detail: format!("{:?}", state.phase()),
    });

    let network = NetworkHandle::new(Arc::new(FeedstockPool::with_quantity(100.0)), true);
    let mut terminal = Terminal::new(settings.clone());
    let served = terminal.request_dispense(&policy, catalog, &network, &true, &mut rng);
    results.push(TestResult {
        name: "terminal_dispense_starts_cycle".into(),
        passed: served.is_ok()
            && terminal.state.phase()
                == ProductionPhase::Producing(settings.collect_duration_ticks)
            && terminal.power_draw() == settings.active_power_draw,
        detail: terminal.status(&network).to_string(),
    });

    let before = network.pool.quantity();
    let refused = Terminal::new(settings.clone()).request_dispense(
        &ConsumerPolicy::none(),
        catalog,
        &network,
        &true,
        &mut rng,
    );
    results.push(TestResult {
        name: "terminal_empty_policy_refused".into(),
        passed: refused == Err(DispenseError::NoEligibleItem)
            && network.pool.quantity() == before,
        detail: format!("{:?}", refused),
    });

    let no_computer = NetworkHandle::new(Arc::new(FeedstockPool::with_quantity(100.0)), false);
    let gated = Terminal::new(settings.clone())
        .request_dispense(&policy, catalog, &no_computer, &true, &mut rng)
        .is_err();
    let batch = Terminal::new(settings.clone()).plan_batch(catalog, &no_computer, &true);
    results.push(TestResult {
        name: "terminal_batch_bypasses_computer".into(),
        passed: gated && batch.is_ok(),
        detail: format!(
            "dispense gated={} batch max={:?}",
            gated,
            batch.map(|plan| plan.max_count())
        ),
    });

    results
}

// ── 6. Colony ───────────────────────────────────────────────────────────

fn validate_colony(
    catalog: &Catalog,
    settings: &ReplicatorSettings,
    verbose: bool,
) -> Vec<TestResult> {
    println!("--- Colony Engine ---");
    let mut results = Vec::new();

    let mut engine = ColonyEngine::new(catalog.clone(), settings.clone(), 42);
    let layout = engine.generate(&ColonyConfig::default());

    let mut served = 0;
    let mut refused = 0;
    let mut min_litres = f64::MAX;
    for _ in 0..100 {
        for event in engine.update(60) {
            match event {
                FeedingEvent::Served { .. } => served += 1,
                FeedingEvent::Refused { .. } => refused += 1,
            }
        }
        for network in engine.networks.iter() {
            min_litres = min_litres.min(network.pool.quantity());
        }
    }

    results.push(TestResult {
        name: "colony_colonists_fed".into(),
        passed: served > 0,
        detail: format!(
            "{} meals served, {} refused over {} ticks",
            served,
            refused,
            engine.tick()
        ),
    });
    results.push(TestResult {
        name: "colony_pools_non_negative".into(),
        passed: min_litres >= 0.0,
        detail: format!("lowest pool {:.2} L", min_litres),
    });

    let draws = engine.power_draw();
    results.push(TestResult {
        name: "colony_power_draw_reported".into(),
        passed: draws.len() == layout.networks.len(),
        detail: format!("{} networks drawing power", draws.len()),
    });

    let mut save = Vec::new();
    let saved = engine.save(&mut save).is_ok();
    let mut reloaded = ColonyEngine::new(catalog.clone(), settings.clone(), 0);
    let loaded = reloaded.load(&save[..]).is_ok();
    results.push(TestResult {
        name: "colony_save_load".into(),
        passed: saved
            && loaded
            && reloaded.tick() == engine.tick()
            && reloaded.colonist_count() == engine.colonist_count(),
        detail: format!("{} bytes", save.len()),
    });

    if verbose {
        for (network, watts) in &draws {
            println!("    {}: {:.0} W", network, watts);
        }
        for &terminal in &layout.terminals {
            if let Ok(status) = engine.terminal_status(terminal) {
                println!("    {:?}: {}", terminal, status);
            }
        }
    }

    results
}
