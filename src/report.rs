// Rendu texte des tables de distances et de routage, et instantané sérialisable

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use crate::core::network::Network;
use crate::error::{AppError, Result};
use crate::simulation::PhaseSummary;
use crate::types::{RouterId, INF_TOKEN};

/// Une ligne de table de routage ; `None` signifie inaccessible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    pub destination: String,
    pub next_hop: Option<String>,
    pub cost: Option<u64>,
}

/// Destinations vues depuis `id`, par ordre alphabétique
fn other_routers(network: &Network, id: RouterId) -> impl Iterator<Item = RouterId> + '_ {
    network.routers().map(|r| r.id()).filter(move |&other| other != id)
}

/// Bloc `Distance Table of router X at t=N:` suivi d'une ligne vide
pub fn render_distance_table(network: &Network, id: RouterId, t: u64) -> String {
    let router = network.router(id);
    let heads: Vec<RouterId> = other_routers(network, id).collect();

    let mut out = String::new();
    out.push_str(&format!("Distance Table of router {} at t={}:\n", router.name(), t));
    let header: Vec<&str> = heads.iter().map(|&h| network.name(h)).collect();
    out.push_str(&format!("   {}\n", header.join("  ")));
    for &to in &heads {
        let cells: Vec<String> = heads
            .iter()
            .map(|&via| router.distance(to, via).to_string())
            .collect();
        out.push_str(&format!("{}  {}\n", network.name(to), cells.join("  ")));
    }
    out.push('\n');
    out
}

pub fn route_entries(network: &Network, id: RouterId) -> Vec<RouteEntry> {
    network
        .router(id)
        .routing_table()
        .list_routes()
        .filter(|(dest, _)| *dest != id)
        .map(|(dest, route)| {
            let destination = network.name(dest).to_string();
            match (route.next_hop, route.metric.value()) {
                (Some(next_hop), Some(cost)) if route.is_reachable() => RouteEntry {
                    destination,
                    next_hop: Some(network.name(next_hop).to_string()),
                    cost: Some(cost),
                },
                _ => RouteEntry {
                    destination,
                    next_hop: None,
                    cost: None,
                },
            }
        })
        .collect()
}

/// Bloc `Routing Table of router X:` avec une ligne `dest,next_hop,cost` par destination
pub fn render_routing_table(network: &Network, id: RouterId) -> String {
    let mut out = String::new();
    out.push_str(&format!("Routing Table of router {}:\n", network.name(id)));
    for entry in route_entries(network, id) {
        match (entry.next_hop, entry.cost) {
            (Some(next_hop), Some(cost)) => {
                out.push_str(&format!("{},{},{}\n", entry.destination, next_hop, cost));
            }
            _ => {
                out.push_str(&format!("{},{},{}\n", entry.destination, INF_TOKEN, INF_TOKEN));
            }
        }
    }
    out.push('\n');
    out
}

/// Tables de routage de tous les routeurs, indexées par nom
pub fn routing_snapshot(network: &Network) -> BTreeMap<String, Vec<RouteEntry>> {
    network
        .routers()
        .map(|r| (r.name().to_string(), route_entries(network, r.id())))
        .collect()
}

/// Écrit le résumé des phases au format JSON
pub fn write_summary<P: AsRef<Path>>(path: P, summaries: &[PhaseSummary]) -> Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    fs::write(path.as_ref(), json)
        .map_err(|e| AppError::ConfigError(format!("Failed to write summary {}: {}", path.as_ref().display(), e)))?;
    log::info!("Summary written to {}", path.as_ref().display());
    Ok(())
}
