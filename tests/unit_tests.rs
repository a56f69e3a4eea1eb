// This file contains unit tests for the public API: router state, configuration files and the JSON summary.

use std::io::Write;
use dv_simulator::core::network::Network;
use dv_simulator::core::router::{NeighbourTables, Router};
use dv_simulator::core::routing_table::Route;
use dv_simulator::read_config::read_simulation_config;
use dv_simulator::read_topology::{parse_topology, read_topology, read_topology_file};
use dv_simulator::report::write_summary;
use dv_simulator::types::{Metric, RouterId};
use dv_simulator::{run_simulation, Simulation, SimulationConfig, Topology};

struct NoPeers;

impl NeighbourTables for NoPeers {
    fn best_metric(&self, router: RouterId, destination: RouterId) -> Metric {
        if router == destination {
            Metric::Finite(0)
        } else {
            Metric::Infinite
        }
    }
}

#[test]
fn test_router_learns_direct_links_only_from_itself() {
    let mut router = Router::new(RouterId(0), "A", 3);
    router.set_neighbour(RouterId(2), 7);
    router.initialize_table();

    assert!(router.update_table(&NoPeers));
    assert_eq!(router.route(RouterId(2)), Route { next_hop: Some(RouterId(2)), metric: Metric::Finite(7) });
    assert!(!router.route(RouterId(1)).is_reachable());
    // une seconde passe identique ne change rien
    assert!(!router.update_table(&NoPeers));
}

#[test]
fn test_reset_clears_learned_routes() {
    let topology = parse_topology("A\nB\nC\nSTART\nA B 1\nB C 1\nUPDATE\nEND\n").unwrap();
    let mut network = Network::from_topology(&topology).unwrap();
    while network.update_round() {}

    let a = network.router_id("A").unwrap();
    let c = network.router_id("C").unwrap();
    assert_eq!(network.router(a).route(c).metric, Metric::Finite(2));

    network.reset_tables();
    assert_eq!(network.router(a).route(c), Route::UNREACHABLE);
    assert_eq!(network.router(a).best_metric(c), Metric::Infinite);
}

#[test]
fn test_zero_cost_links() {
    let topology = parse_topology("A\nB\nC\nSTART\nA B 0\nB C 0\nUPDATE\nEND\n").unwrap();
    let mut simulation = Simulation::new(&topology, &SimulationConfig::default()).unwrap();
    let summaries = simulation.run(&mut std::io::sink()).unwrap();
    let a_routes = &summaries[0].routing_tables["A"];
    assert_eq!(a_routes[1].next_hop.as_deref(), Some("B"));
    assert_eq!(a_routes[1].cost, Some(0));
}

#[test]
fn test_empty_network() {
    let topology = Topology::new();
    let mut out = Vec::new();
    let summaries = run_simulation(&topology, &SimulationConfig::default(), &mut out).unwrap();
    assert!(out.is_empty());
    assert_eq!(summaries[0].rounds, 1);
}

#[test]
fn test_read_topology_from_reader_and_file() {
    let input = "A\nB\nSTART\nA B 3\nUPDATE\nEND\n";
    let from_reader = read_topology(input.as_bytes()).unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(input.as_bytes()).unwrap();
    let from_file = read_topology_file(file.path()).unwrap();

    assert_eq!(from_reader, from_file);
    assert_eq!(from_file.links[0].cost, 3);
}

#[test]
fn test_config_file_drives_round_limit() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "max_rounds = 1").unwrap();
    let config = read_simulation_config(file.path()).unwrap();

    let topology = parse_topology("A\nB\nSTART\nA B 1\nUPDATE\nEND\n").unwrap();
    let err = run_simulation(&topology, &config, &mut std::io::sink()).unwrap_err();
    assert!(err.to_string().starts_with("Convergence error"));
}

#[test]
fn test_summary_json_file() {
    let topology = parse_topology("A\nB\nSTART\nA B 2\nUPDATE\nA B -1\nEND\n").unwrap();
    let summaries = run_simulation(&topology, &SimulationConfig::default(), &mut std::io::sink()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    write_summary(&path, &summaries).unwrap();

    let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json[0]["phase"], "initial");
    assert_eq!(json[0]["routing_tables"]["A"][0]["next_hop"], "B");
    assert_eq!(json[0]["routing_tables"]["A"][0]["cost"], 2);
    assert_eq!(json[1]["phase"], "after_edits");
    assert!(json[1]["routing_tables"]["B"][0]["cost"].is_null());
}
