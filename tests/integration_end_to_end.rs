use std::collections::HashSet;

use dronedispatch::*;
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;

#[test]
fn end_to_end_allocation_from_scenario() {
    let scenario_json = json!({
        "version": 1,
        "drones": [
            { "capacity": 30, "range": 20, "origin": "3C", "speed": 15 },
            { "capacity": 15, "range": 15, "origin": "3C", "speed": 20 },
            { "capacity": 20, "range": 25, "origin": "3C", "speed": 10 }
        ],
        "orders": [
            { "location": "5A", "weight": 10, "priority": "alta" },
            { "location": "2B", "weight": 20, "priority": "baixa" },
            { "location": "4C", "weight": 15, "priority": "media" }
        ]
    });
    let scenario: Scenario = serde_json::from_value(scenario_json).unwrap();
    let mut engine = scenario.build_engine().unwrap();

    let outcome = engine.allocate().unwrap();
    assert!(outcome.performed);
    assert_eq!(outcome.accepted(), 3);
    assert!(engine.orders().iter().all(Order::is_delivered));

    let summary = FleetSummary::from_drones(engine.drones());
    assert_eq!(summary.total_delivered, 3);
    assert!(summary.total_hours > 0.0);
    assert_eq!(summary.top_drone.unwrap().delivered, 2);

    // Nothing left: the next pass is a no-op.
    assert!(!engine.allocate().unwrap().performed);

    let lines = format_summary(&summary);
    assert!(lines.iter().any(|l| l.contains("Deliveries made: 3")));
    let side = format_drone_report(engine.drones());
    assert!(side.iter().any(|l| l.contains("Drones")));
}

#[test]
fn generated_runs_keep_fleet_invariants() {
    for seed in 0..20u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = GeneratorConfig { drone_count: 5, order_count: 60, ..GeneratorConfig::default() };
        let mut engine = Engine::new();
        for d in generate_fleet(&mut rng, &config).unwrap() {
            engine.add_drone(d).unwrap();
        }
        let base = engine.reference_origin().unwrap();
        for o in generate_orders(&mut rng, &config, base).unwrap() {
            engine.add_order(o).unwrap();
        }

        let mut claimed = HashSet::new();
        for _ in 0..100 {
            let outcome = engine.allocate().unwrap();
            for a in &outcome.assignments {
                for id in &a.order_ids {
                    assert!(claimed.insert(*id), "seed {seed}: order {id} claimed twice");
                }
            }
            for trip in &outcome.trips {
                let queued: u32 = outcome
                    .assignments
                    .iter()
                    .filter(|a| a.drone_id == trip.drone_id)
                    .map(|a| a.order_ids.len() as u32)
                    .sum();
                assert_eq!(trip.delivered, queued);
            }
            for d in engine.drones() {
                assert_eq!(d.location(), d.origin());
                assert_eq!(d.battery(), 100);
                assert_eq!(d.queue_len(), 0);
                assert!(d.load() <= d.capacity());
            }
            if !outcome.performed || outcome.accepted() == 0 {
                break;
            }
        }

        let delivered: u32 = engine.drones().iter().map(Drone::delivered_count).sum();
        assert_eq!(delivered as usize, claimed.len());
        assert_eq!(engine.orders().iter().filter(|o| o.is_delivered()).count(), claimed.len());
        // Anything left over is out of every drone's range or heavier than any hold.
        for o in engine.orders().iter().filter(|o| !o.is_delivered()) {
            assert!(engine.drones().iter().all(|d| !d.can_accept(o)));
        }
    }
}

#[test]
fn distance_is_symmetric_over_the_whole_grid() {
    let cells: Vec<Coordinate> = (1..=9u8)
        .flat_map(|c| (1..=26u8).map(move |r| Coordinate::new(c, r).unwrap()))
        .collect();
    for a in &cells {
        assert_eq!(a.distance_to(a), 0.0);
        for b in cells.iter().step_by(7) {
            assert_eq!(a.distance_to(b), b.distance_to(a));
            assert_eq!(distance(&a.to_string(), &b.to_string()).unwrap(), a.distance_to(b));
        }
    }
}
