//! Tests for the best-first search engine.

use idlemax::models::{Catalog, Item, StartMode};
use idlemax::search::{SearchConfig, SearchEngine};

fn item(name: &str, base_cost: f64, rate: f64) -> Item {
    Item {
        name: name.to_string(),
        base_cost,
        rate,
    }
}

fn manual_catalog(items: Vec<Item>) -> Catalog {
    Catalog::new(items, StartMode::Manual { human_rate: 4.0 }).expect("valid catalog")
}

/// Hand-computed single-item schedule. Starting from a Human producing
/// 4/s, Widgets cost 10 with rate 1/s each:
///
///   t=0.000  {Human:1}            rate 4, next Widget costs 10 -> t=2.5
///   t=2.500  {Human:1, Widget:1}  rate 5, costs ceil(11.5)=12   -> t=4.9
///   t=4.900  {Human:1, Widget:2}  rate 6, costs ceil(13.225)=14 -> t=7.2333
///   t=7.233  {Human:1, Widget:3}  rate 7, costs ceil(15.209)=16 -> t=9.519
///   t=9.519  {Human:1, Widget:4}  rate 8, costs 18 -> t=11.769 > 10
#[test]
fn test_single_item_schedule_matches_hand_computation() {
    let catalog = manual_catalog(vec![item("Widget", 10.0, 1.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(10.0));
    let outcome = engine.run().expect("search completes");

    assert!((outcome.best_rate - 8.0).abs() < 1e-9);
    assert_eq!(outcome.best_counts, vec![1, 4]);
    assert_eq!(outcome.plan.len(), 5);

    let expected_times = [0.0, 2.5, 4.9, 4.9 + 14.0 / 6.0, 4.9 + 14.0 / 6.0 + 16.0 / 7.0];
    for (step, expected) in outcome.plan.iter().zip(expected_times) {
        assert!(
            (step.time - expected).abs() < 1e-9,
            "step at {} expected {}",
            step.time,
            expected
        );
    }

    assert!(outcome.plan[0].item.is_none());
    for step in &outcome.plan[1..] {
        assert_eq!(step.item.as_deref(), Some("Widget"));
    }

    // Rates along the plan never decrease.
    for pair in outcome.plan.windows(2) {
        assert!(pair[1].rate >= pair[0].rate);
    }
}

#[test]
fn test_zero_horizon_expands_only_the_initial_state() {
    let catalog = manual_catalog(vec![item("Widget", 10.0, 1.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(0.0));
    let outcome = engine.run().expect("search completes");

    assert_eq!(outcome.stats.expanded, 1);
    assert_eq!(outcome.plan.len(), 1);
    assert_eq!(outcome.best_counts, vec![1, 0]);
    assert!((outcome.best_rate - 4.0).abs() < 1e-12);
}

/// A lone Cursor (base cost 15, rate 0.1) with an automated
/// start. At rate 0.1 the second Cursor costs 18 and takes 180s, so a
/// horizon of 100 buys nothing.
#[test]
fn test_cursor_only_short_horizon_buys_nothing() {
    let catalog =
        Catalog::new(vec![item("Cursor", 15.0, 0.1)], StartMode::Automated).expect("valid");
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(100.0));
    let outcome = engine.run().expect("search completes");

    assert!((outcome.best_rate - 0.1).abs() < 1e-12);
    assert_eq!(outcome.best_counts, vec![1]);
    assert_eq!(outcome.plan.len(), 1);
}

/// Same scenario with a long horizon: cumulative purchase times
/// (180, 280, 356.67, ...) admit exactly 13 purchases by t=1000,
/// ending at 14 Cursors.
#[test]
fn test_cursor_only_long_horizon_buys_until_the_money_runs_out() {
    let catalog =
        Catalog::new(vec![item("Cursor", 15.0, 0.1)], StartMode::Automated).expect("valid");
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(1000.0));
    let outcome = engine.run().expect("search completes");

    assert_eq!(outcome.best_counts, vec![14]);
    assert!((outcome.best_rate - 1.4).abs() < 1e-9);
    assert_eq!(outcome.plan.len(), 14);

    // Every purchase lands within the horizon, in increasing time order.
    for pair in outcome.plan.windows(2) {
        assert!(pair[0].time < pair[1].time);
    }
    assert!(outcome.plan.last().map_or(false, |step| step.time <= 1000.0));
}

/// Two items reachable in either order converge on the same quantity
/// vector at different times; the slower entry must be popped and
/// classified stale, not expanded a second time.
#[test]
fn test_converging_paths_produce_stale_entries() {
    let catalog = manual_catalog(vec![item("Anvil", 10.0, 0.1), item("Bellows", 12.0, 10.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(6.0));
    let outcome = engine.run().expect("search completes");

    assert!(
        outcome.stats.stale_skipped >= 1,
        "expected at least one stale skip, stats: {:?}",
        outcome.stats
    );
    // Every state is expanded at most once; stale pops are the rest.
    assert!(outcome.stats.expanded <= outcome.stats.enqueued);
}

/// A cheap low-rate item and an expensive high-rate item: once the
/// expensive one becomes affordable the best plan must include it.
#[test]
fn test_mixed_purchases_beat_a_single_item_path() {
    let catalog = manual_catalog(vec![item("Shovel", 10.0, 0.5), item("Excavator", 50.0, 5.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(40.0));
    let outcome = engine.run().expect("search completes");

    let excavators = outcome.best_counts[2];
    assert!(
        excavators >= 1,
        "best plan should buy at least one Excavator, got counts {:?}",
        outcome.best_counts
    );
    assert!(outcome
        .plan
        .iter()
        .any(|step| step.item.as_deref() == Some("Excavator")));
}

/// Pruning is a memory optimization: the outcome must match the
/// unpruned run exactly.
#[test]
fn test_pruned_run_matches_unpruned_outcome() {
    let catalog = manual_catalog(vec![item("Anvil", 10.0, 0.1), item("Bellows", 12.0, 10.0)]);

    let mut plain = SearchEngine::new(&catalog, SearchConfig::new(6.0));
    let baseline = plain.run().expect("search completes");

    let config = SearchConfig {
        prune_every: Some(1),
        ..SearchConfig::new(6.0)
    };
    let mut pruned = SearchEngine::new(&catalog, config);
    let outcome = pruned.run().expect("search completes");

    assert!((outcome.best_rate - baseline.best_rate).abs() < 1e-12);
    assert_eq!(outcome.best_counts, baseline.best_counts);
    assert!(
        outcome.stats.pruned >= 1,
        "converging paths should leave dominated entries to prune, stats: {:?}",
        outcome.stats
    );
}

/// Aggressive pruning must never abort a run: the beyond-horizon
/// sentinel entries are exempt from the pruning pass, so the frontier
/// cannot empty before the horizon even when every within-horizon entry
/// is dominated. Sweeps tight horizons where the frontier is smallest.
#[test]
fn test_aggressive_pruning_terminates_on_tight_horizons() {
    let catalog = manual_catalog(vec![item("Anvil", 10.0, 0.1), item("Bellows", 12.0, 10.0)]);

    for horizon in 1..=12 {
        let horizon = f64::from(horizon);

        let mut plain = SearchEngine::new(&catalog, SearchConfig::new(horizon));
        let baseline = plain.run().expect("unpruned search completes");

        let config = SearchConfig {
            prune_every: Some(1),
            ..SearchConfig::new(horizon)
        };
        let mut pruned = SearchEngine::new(&catalog, config);
        let outcome = pruned
            .run()
            .unwrap_or_else(|err| panic!("pruned run failed at horizon {}: {}", horizon, err));

        assert!(
            (outcome.best_rate - baseline.best_rate).abs() < 1e-12,
            "best rate diverged at horizon {}",
            horizon
        );
        assert_eq!(outcome.best_counts, baseline.best_counts);
    }
}

/// Two identical items reach the same quantity vector at exactly the
/// same time via either purchase order. The tied re-offer must be
/// rejected so the state is expanded once, not once per path. With
/// Human at 4/s and both items at cost 10 / rate 1, the six states
/// reachable by t=5 are the initial one, each single purchase at 2.5,
/// the tied pair at 4.5, and each double purchase at 4.9.
#[test]
fn test_symmetric_tie_expands_each_state_once() {
    let catalog = manual_catalog(vec![item("Left", 10.0, 1.0), item("Right", 10.0, 1.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(5.0));
    let outcome = engine.run().expect("search completes");

    assert_eq!(
        outcome.stats.expanded, 6,
        "each distinct state must be expanded exactly once, stats: {:?}",
        outcome.stats
    );
    assert_eq!(outcome.stats.offers_rejected, 1);
    assert_eq!(outcome.stats.stale_skipped, 0);
    assert!((outcome.best_rate - 6.0).abs() < 1e-9);
    assert_eq!(outcome.best_counts, vec![1, 1, 1]);
}

#[test]
fn test_on_demand_prune_on_fresh_engine_removes_nothing() {
    let catalog = manual_catalog(vec![item("Widget", 10.0, 1.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(10.0));

    // Nothing expanded yet, so nothing dominates the seeded frontier.
    let removed = engine.prune_dominated().expect("prune pass");
    assert_eq!(removed, 0);
    assert_eq!(engine.frontier_len(), 1);
}

#[test]
fn test_min_time_records_first_offer() {
    let catalog = manual_catalog(vec![item("Widget", 10.0, 1.0)]);
    let mut engine = SearchEngine::new(&catalog, SearchConfig::new(10.0));
    assert_eq!(engine.min_time(&[1, 0]), Some(0.0));

    engine.run().expect("search completes");
    let first_purchase = engine.min_time(&[1, 1]).expect("reached during the run");
    assert!((first_purchase - 2.5).abs() < 1e-9);
}
