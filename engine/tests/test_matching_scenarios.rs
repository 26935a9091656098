//! End-to-end matching scenarios on small colonies
//!
//! Each test builds a world, registers requests the way a consumer would
//! during the build phase, and reads the stable matching.

use logistics_network_core::matching::is_injective;
use logistics_network_core::{
    Carrier, Colony, Commitment, LogisticsNetwork, NetworkConfig, Position, RequestId, RequestOptions, ResourceType,
    Store, Target,
};

// ============================================================================
// Test Helpers
// ============================================================================

const DOMAIN: &str = "W1N1";

fn spawn_at(id: &str, pos: Position, amount: i64) -> Target {
    Target::single(id, DOMAIN, pos, ResourceType::energy(), amount, 300)
}

fn loaded(id: &str, pos: Position) -> Carrier {
    Carrier::new(id, pos, 100).with_carry(Store::from_pairs([("energy", 100)]))
}

fn register_all(network: &mut LogisticsNetwork, world: &Colony) -> Vec<RequestId> {
    world
        .targets
        .iter()
        .filter_map(|target| network.request_input(target, RequestOptions::new()))
        .collect()
}

// ============================================================================
// Basic scenarios
// ============================================================================

#[test]
fn test_one_request_two_carriers() {
    let spawn = spawn_at("spawn", Position::new(5, 0), 220);
    let world = Colony::new(DOMAIN)
        .with_target(spawn.clone())
        .with_carrier(loaded("a", Position::new(0, 0)))
        .with_carrier(loaded("b", Position::new(10, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    let id = network.request_input(&spawn, RequestOptions::new()).unwrap();
    assert_eq!(network.request(id).unwrap().amount, 80);

    // Equal range: the roster order breaks the tie
    let matching = network.compute_matching(&world);
    assert_eq!(matching.request_for("a"), Some(id));
    assert_eq!(matching.request_for("b"), None);
    assert_eq!(matching.unmatched_carriers, vec!["b".to_string()]);
}

#[test]
fn test_closer_carrier_wins_regardless_of_roster_order() {
    let spawn = spawn_at("spawn", Position::new(4, 0), 220);
    let world = Colony::new(DOMAIN)
        .with_target(spawn.clone())
        .with_carrier(loaded("far", Position::new(10, 0)))
        .with_carrier(loaded("near", Position::new(0, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    let id = network.request_input(&spawn, RequestOptions::new()).unwrap();

    let matching = network.compute_matching(&world);
    assert_eq!(matching.request_for("near"), Some(id));
    assert_eq!(matching.unmatched_carriers, vec!["far".to_string()]);
}

#[test]
fn test_more_requests_than_carriers() {
    let world = Colony::new(DOMAIN)
        .with_target(spawn_at("s1", Position::new(2, 0), 0))
        .with_target(spawn_at("s2", Position::new(12, 0), 0))
        .with_target(spawn_at("s3", Position::new(30, 30), 0))
        .with_carrier(loaded("a", Position::new(0, 0)))
        .with_carrier(loaded("b", Position::new(14, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    let ids = register_all(&mut network, &world);
    assert_eq!(ids.len(), 3);

    let matching = network.compute_matching(&world);
    assert_eq!(matching.len(), 2);
    assert!(matching.unmatched_carriers.is_empty());
    assert!(is_injective(&matching.assignments));
    assert_eq!(matching.request_for("a"), Some(ids[0]));
    assert_eq!(matching.request_for("b"), Some(ids[1]));
}

#[test]
fn test_more_carriers_than_requests() {
    let world = Colony::new(DOMAIN)
        .with_target(spawn_at("s1", Position::new(2, 0), 0))
        .with_carrier(loaded("a", Position::new(20, 0)))
        .with_carrier(loaded("b", Position::new(3, 0)))
        .with_carrier(loaded("c", Position::new(40, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    let ids = register_all(&mut network, &world);

    let matching = network.compute_matching(&world);
    assert_eq!(matching.request_for("b"), Some(ids[0]));
    assert_eq!(matching.unmatched_carriers, vec!["a".to_string(), "c".to_string()]);
}

#[test]
fn test_priority_multiplier_steers_preference() {
    let left = spawn_at("left", Position::new(-5, 0), 220);
    let right = spawn_at("right", Position::new(5, 0), 220);
    let world = Colony::new(DOMAIN)
        .with_target(left.clone())
        .with_target(right.clone())
        .with_carrier(loaded("a", Position::new(0, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    network.request_input(&left, RequestOptions::new());
    let urgent = network.request_input(&right, RequestOptions::new().multiplier(3.0)).unwrap();

    assert_eq!(network.compute_matching(&world).request_for("a"), Some(urgent));
}

// ============================================================================
// Edge cases
// ============================================================================

#[test]
fn test_no_carriers_gives_empty_matching() {
    let spawn = spawn_at("spawn", Position::new(5, 0), 0);
    let world = Colony::new(DOMAIN).with_target(spawn.clone());
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    network.request_input(&spawn, RequestOptions::new());

    let matching = network.compute_matching(&world);
    assert!(matching.is_empty());
    assert!(matching.unmatched_carriers.is_empty());
}

#[test]
fn test_no_requests_leaves_every_carrier_unmatched() {
    let world = Colony::new(DOMAIN)
        .with_carrier(loaded("a", Position::new(0, 0)))
        .with_carrier(loaded("b", Position::new(1, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);

    let matching = network.compute_matching(&world);
    assert!(matching.is_empty());
    assert_eq!(matching.unmatched_carriers, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_small_carriers_do_not_participate() {
    let spawn = spawn_at("spawn", Position::new(1, 0), 0);
    let world = Colony::new(DOMAIN)
        .with_target(spawn.clone())
        .with_carrier(Carrier::new("tiny", Position::new(0, 0), 20).with_carry(Store::from_pairs([("energy", 20)])))
        .with_carrier(loaded("big", Position::new(30, 0)));
    let config = NetworkConfig {
        min_capacity_to_participate: 50,
        ..Default::default()
    };
    let mut network = LogisticsNetwork::new(DOMAIN, config).unwrap();
    let id = network.request_input(&spawn, RequestOptions::new()).unwrap();

    let matching = network.compute_matching(&world);
    assert_eq!(matching.request_for("big"), Some(id));
    assert_eq!(matching.request_for("tiny"), None);
    assert!(matching.unmatched_carriers.is_empty(), "non-participants are not listed");
}

// ============================================================================
// Cycle lifecycle
// ============================================================================

#[test]
fn test_matching_is_memoized_within_a_cycle() {
    let first = spawn_at("first", Position::new(5, 0), 0);
    let second = spawn_at("second", Position::new(1, 0), 0);
    let world = Colony::new(DOMAIN)
        .with_target(first.clone())
        .with_target(second.clone())
        .with_carrier(loaded("a", Position::new(0, 0)));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    let first_id = network.request_input(&first, RequestOptions::new()).unwrap();
    let before = network.compute_matching(&world).clone();
    assert_eq!(before.request_for("a"), Some(first_id));

    // Late registration does not trigger recomputation
    network.request_input(&second, RequestOptions::new());
    assert_eq!(network.cached_matching(), Some(&before));
    assert_eq!(network.compute_matching(&world), &before);

    network.refresh();
    assert!(network.cached_matching().is_none());
}

#[test]
fn test_refresh_and_replay_reproduces_the_report() {
    let world = Colony::new(DOMAIN)
        .with_target(spawn_at("s1", Position::new(2, 0), 100))
        .with_target(spawn_at("s2", Position::new(8, 3), 0))
        .with_target(Target::store(
            "container",
            DOMAIN,
            Position::new(12, 12),
            2000,
            Store::from_pairs([("energy", 900), ("O", 300)]),
        ))
        .with_carrier(loaded("a", Position::new(0, 0)))
        .with_carrier(Carrier::new("b", Position::new(10, 10), 200))
        .with_carrier(loaded("c", Position::new(5, 5)));

    let register = |network: &mut LogisticsNetwork| {
        register_all(network, &world);
        if let Some(container) = world.targets.iter().find(|t| t.id == "container") {
            network.request_output(container, RequestOptions::new());
            network.request_output_minerals(container, RequestOptions::new());
        }
    };

    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    register(&mut network);
    let first = network.report(&world);

    network.refresh();
    register(&mut network);
    let second = network.report(&world);

    assert_eq!(first, second);
    assert_eq!(first.digest(), second.digest());
    assert!(is_injective(&first.assignments));
}

#[test]
fn test_commit_then_invalidate_updates_forecasts() {
    let spawn = spawn_at("spawn", Position::new(4, 0), 270);
    let mut world = Colony::new(DOMAIN)
        .with_target(spawn.clone())
        .with_carrier(Carrier::new("a", Position::new(0, 0), 100).with_carry(Store::from_pairs([("energy", 50)])));
    let mut network = LogisticsNetwork::with_defaults(DOMAIN);
    let id = network.request_input(&spawn, RequestOptions::new()).unwrap();
    assert_eq!(network.compute_matching(&world).request_for("a"), Some(id));

    if let Some(carrier) = world.carrier_mut("a") {
        carrier.commitment = Some(Commitment {
            eta: Some(5),
            manifest: vec![spawn.pos],
            target: Some(spawn.id.clone()),
        });
    }
    network.invalidate_cache("a", id);

    let carrier = world.carrier("a").cloned().unwrap();
    let availability = network.next_availability(&world, &carrier);
    assert_eq!(availability.ticks, 5);
    assert_eq!(availability.position, spawn.pos);
    // Delivering 30 leaves 20 aboard
    assert_eq!(network.predicted_carrier_cargo(&world, &carrier).get(&ResourceType::energy()), 20.0);
    // The matching itself stays memoized
    assert_eq!(network.cached_matching().and_then(|m| m.request_for("a")), Some(id));
}
