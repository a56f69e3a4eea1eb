// Registre de tous les routeurs simulés, résolu une seule fois à partir de la topologie

use std::collections::HashMap;
use log::{debug, info, warn};
use crate::core::router::{NeighbourTables, Router};
use crate::error::{AppError, Result};
use crate::topology::Topology;
use crate::types::{LinkChange, LinkEdit, Metric, RouterId};

/// Ensemble des routeurs, indexés par `RouterId` (ordre alphabétique des noms)
#[derive(Debug, Clone)]
pub struct Network {
    routers: Vec<Router>,
    index: HashMap<String, RouterId>,
    /// Ordre de déclaration dans l'entrée, utilisé pour les passes de mise à jour
    update_order: Vec<RouterId>,
}

impl Network {
    /// Construit les routeurs, applique les liens initiaux et initialise les tables
    pub fn from_topology(topology: &Topology) -> Result<Self> {
        topology.validate()?;

        let names = topology.sorted_routers();
        let count = names.len();
        let routers: Vec<Router> = names
            .iter()
            .enumerate()
            .map(|(i, name)| Router::new(RouterId(i), *name, count))
            .collect();
        let index: HashMap<String, RouterId> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), RouterId(i)))
            .collect();

        let mut network = Network {
            routers,
            index,
            update_order: Vec::with_capacity(count),
        };
        for name in &topology.routers {
            let id = network.router_id(name)?;
            network.update_order.push(id);
        }

        for link in &topology.links {
            let a = network.router_id(&link.a)?;
            let b = network.router_id(&link.b)?;
            network.set_link(a, b, link.cost);
        }
        network.reset_tables();

        info!("Network built: {} routers, {} links", count, topology.links.len());
        Ok(network)
    }

    pub fn len(&self) -> usize {
        self.routers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routers.is_empty()
    }

    pub fn router_id(&self, name: &str) -> Result<RouterId> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| AppError::TopologyError(format!("Unknown router {}", name)))
    }

    pub fn router(&self, id: RouterId) -> &Router {
        &self.routers[id.index()]
    }

    pub fn name(&self, id: RouterId) -> &str {
        self.routers[id.index()].name()
    }

    /// Routeurs par ordre alphabétique
    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.routers.iter()
    }

    pub fn update_order(&self) -> &[RouterId] {
        &self.update_order
    }

    /// Crée ou remplace le lien sur les deux extrémités
    pub fn set_link(&mut self, a: RouterId, b: RouterId, cost: u64) {
        self.routers[a.index()].set_neighbour(b, cost);
        self.routers[b.index()].set_neighbour(a, cost);
    }

    /// Supprime l'adjacence des deux côtés ; retourne `false` si elle n'existait pas
    pub fn remove_link(&mut self, a: RouterId, b: RouterId) -> bool {
        let removed_a = self.routers[a.index()].remove_neighbour(b);
        let removed_b = self.routers[b.index()].remove_neighbour(a);
        removed_a || removed_b
    }

    pub fn apply_edit(&mut self, edit: &LinkEdit) -> Result<()> {
        let a = self.router_id(&edit.a)?;
        let b = self.router_id(&edit.b)?;
        match edit.change {
            LinkChange::Set(cost) => {
                self.set_link(a, b, cost);
                info!("Link {} <-> {} set to cost {}", edit.a, edit.b, cost);
            }
            LinkChange::Remove => {
                if self.remove_link(a, b) {
                    info!("Link {} <-> {} removed", edit.a, edit.b);
                } else {
                    warn!("No link {} <-> {} to remove, ignoring", edit.a, edit.b);
                }
            }
        }
        Ok(())
    }

    /// Remet chaque routeur à l'état "liens directs uniquement" et vide sa table de routage
    pub fn reset_tables(&mut self) {
        for router in &mut self.routers {
            router.initialize_table();
            router.clear_routing_table();
        }
    }

    /// Met à jour un seul routeur en lisant l'état courant de ses voisins
    pub fn update_router(&mut self, id: RouterId) -> bool {
        let pivot = id.index();
        let (before, rest) = self.routers.split_at_mut(pivot);
        let Some((router, after)) = rest.split_first_mut() else {
            return false;
        };
        let peers = Peers {
            before: &*before,
            after: &*after,
            pivot,
        };
        router.update_table(&peers)
    }

    /// Une passe complète dans l'ordre de déclaration.
    ///
    /// Un routeur mis à jour plus tôt dans la passe est déjà visible par les suivants.
    pub fn update_round(&mut self) -> bool {
        let mut updated = false;
        let order = self.update_order.clone();
        for id in order {
            let changed = self.update_router(id);
            if changed {
                debug!("Router {} changed at least one route", self.name(id));
            }
            updated |= changed;
        }
        updated
    }
}

impl NeighbourTables for Network {
    fn best_metric(&self, router: RouterId, destination: RouterId) -> Metric {
        self.routers
            .get(router.index())
            .map(|r| r.best_metric(destination))
            .unwrap_or(Metric::Infinite)
    }
}

/// Tous les routeurs sauf celui en cours de mise à jour
struct Peers<'a> {
    before: &'a [Router],
    after: &'a [Router],
    pivot: usize,
}

impl NeighbourTables for Peers<'_> {
    fn best_metric(&self, router: RouterId, destination: RouterId) -> Metric {
        let i = router.index();
        let peer = if i < self.pivot {
            self.before.get(i)
        } else if i > self.pivot {
            self.after.get(i - self.pivot - 1)
        } else {
            None
        };
        peer.map(|r| r.best_metric(destination))
            .unwrap_or(Metric::Infinite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::routing_table::Route;

    fn line_topology() -> Topology {
        let mut topology = Topology::new();
        topology.add_router("C");
        topology.add_router("B");
        topology.add_router("A");
        topology.add_link("A", "B", 1);
        topology.add_link("B", "C", 1);
        topology
    }

    #[test]
    fn test_ids_follow_name_order_and_updates_follow_declaration() {
        let network = Network::from_topology(&line_topology()).unwrap();
        assert_eq!(network.router_id("A").unwrap(), RouterId(0));
        assert_eq!(network.router_id("C").unwrap(), RouterId(2));
        assert_eq!(network.update_order(), &[RouterId(2), RouterId(1), RouterId(0)]);
        assert!(network.router_id("Z").is_err());
    }

    #[test]
    fn test_links_are_symmetric() {
        let network = Network::from_topology(&line_topology()).unwrap();
        let a = network.router_id("A").unwrap();
        let b = network.router_id("B").unwrap();
        assert_eq!(network.router(a).neighbour_cost(b), Some(1));
        assert_eq!(network.router(b).neighbour_cost(a), Some(1));
    }

    fn chain(order: &[&str]) -> Network {
        let mut topology = Topology::new();
        for name in order {
            topology.add_router(*name);
        }
        topology.add_link("A", "B", 1);
        topology.add_link("B", "C", 1);
        topology.add_link("C", "D", 1);
        Network::from_topology(&topology).unwrap()
    }

    #[test]
    fn test_same_round_updates_are_visible() {
        // A, B puis C sont déjà à jour quand D lit C : D apprend A dès la première passe
        let mut network = chain(&["A", "B", "C", "D"]);
        assert!(network.update_round());
        let a = network.router_id("A").unwrap();
        let c = network.router_id("C").unwrap();
        let d = network.router_id("D").unwrap();
        assert_eq!(network.router(d).route(a), Route { next_hop: Some(c), metric: Metric::Finite(3) });
    }

    #[test]
    fn test_update_order_changes_intermediate_state() {
        let mut network = chain(&["D", "C", "B", "A"]);
        assert!(network.update_round());
        let a = network.router_id("A").unwrap();
        let d = network.router_id("D").unwrap();
        assert_eq!(network.router(d).route(a), Route::UNREACHABLE);
    }

    #[test]
    fn test_remove_missing_link_is_noop() {
        let mut network = Network::from_topology(&line_topology()).unwrap();
        let edit = LinkEdit { a: "A".into(), b: "C".into(), change: LinkChange::Remove };
        assert!(network.apply_edit(&edit).is_ok());
        let a = network.router_id("A").unwrap();
        assert_eq!(network.router(a).neighbours().count(), 1);
    }

    #[test]
    fn test_edit_with_unknown_router_fails() {
        let mut network = Network::from_topology(&line_topology()).unwrap();
        let edit = LinkEdit { a: "A".into(), b: "Q".into(), change: LinkChange::Set(2) };
        assert!(matches!(network.apply_edit(&edit), Err(AppError::TopologyError(_))));
    }

    #[test]
    fn test_best_metric_through_registry() {
        let network = Network::from_topology(&line_topology()).unwrap();
        let a = network.router_id("A").unwrap();
        let b = network.router_id("B").unwrap();
        assert_eq!(network.best_metric(b, a), Metric::Finite(1));
        assert_eq!(network.best_metric(a, a), Metric::Finite(0));
    }
}
