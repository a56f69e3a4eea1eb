// État d'un routeur Distance Vector et règle locale de mise à jour (Bellman-Ford distribué)

use crate::core::routing_table::{Route, RoutingTable};
use crate::types::{Metric, RouterId};

/// Accès en lecture aux vecteurs de distance courants des autres routeurs
pub trait NeighbourTables {
    /// Meilleur coût connu par `router` vers `destination`
    fn best_metric(&self, router: RouterId, destination: RouterId) -> Metric;
}

/// Un routeur simulé : coûts vers ses voisins, table de distances et table de routage
///
/// Les tables sont de taille fixe et indexées par `RouterId`. La table de distances
/// est lue `distance_table[destination][via]`.
#[derive(Debug, Clone)]
pub struct Router {
    id: RouterId,
    name: String,
    neighbours: Vec<Option<u64>>,
    distance_table: Vec<Vec<Metric>>,
    routing_table: RoutingTable,
}

impl Router {
    pub fn new(id: RouterId, name: impl Into<String>, router_count: usize) -> Self {
        Router {
            id,
            name: name.into(),
            neighbours: vec![None; router_count],
            distance_table: vec![vec![Metric::Infinite; router_count]; router_count],
            routing_table: RoutingTable::new(router_count),
        }
    }

    pub fn id(&self) -> RouterId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn router_count(&self) -> usize {
        self.neighbours.len()
    }

    pub fn neighbour_cost(&self, neighbour: RouterId) -> Option<u64> {
        self.neighbours.get(neighbour.index()).copied().flatten()
    }

    /// Voisins actuels, par ordre croissant d'identifiant (donc de nom)
    pub fn neighbours(&self) -> impl Iterator<Item = (RouterId, u64)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .filter_map(|(i, cost)| cost.map(|c| (RouterId(i), c)))
    }

    pub fn set_neighbour(&mut self, neighbour: RouterId, cost: u64) {
        if let Some(slot) = self.neighbours.get_mut(neighbour.index()) {
            *slot = Some(cost);
        }
    }

    /// Retourne `false` si le lien n'existait pas
    pub fn remove_neighbour(&mut self, neighbour: RouterId) -> bool {
        self.neighbours
            .get_mut(neighbour.index())
            .and_then(Option::take)
            .is_some()
    }

    pub fn distance(&self, destination: RouterId, via: RouterId) -> Metric {
        self.distance_table
            .get(destination.index())
            .and_then(|row| row.get(via.index()))
            .copied()
            .unwrap_or(Metric::Infinite)
    }

    pub fn route(&self, destination: RouterId) -> Route {
        self.routing_table.get_route(destination)
    }

    pub fn routing_table(&self) -> &RoutingTable {
        &self.routing_table
    }

    /// Coût que ce routeur annonce vers `destination` : 0 vers lui-même,
    /// sinon le minimum de sa ligne de distances
    pub fn best_metric(&self, destination: RouterId) -> Metric {
        if destination == self.id {
            return Metric::Finite(0);
        }
        self.distance_table
            .get(destination.index())
            .and_then(|row| row.iter().copied().min())
            .unwrap_or(Metric::Infinite)
    }

    /// Oublie toute connaissance de route, sauf les liens directs
    pub fn initialize_table(&mut self) {
        for (dest, row) in self.distance_table.iter_mut().enumerate() {
            row.fill(Metric::Infinite);
            if dest == self.id.index() {
                continue;
            }
            if let Some(cost) = self.neighbours[dest] {
                row[dest] = Metric::Finite(cost);
            }
        }
    }

    pub fn clear_routing_table(&mut self) {
        self.routing_table.clear();
    }

    /// Recalcule next-hop et coût vers chaque destination à partir des tables courantes des voisins.
    ///
    /// À coût égal, le voisin au nom le plus petit l'emporte. Retourne `true` si au moins
    /// un coût total a changé ; un changement de next-hop à coût constant ne compte pas.
    pub fn update_table<T: NeighbourTables + ?Sized>(&mut self, peers: &T) -> bool {
        let mut updated = false;

        for dest in (0..self.router_count()).map(RouterId) {
            if dest == self.id {
                continue;
            }

            // parcours par nom croissant : l'inégalité stricte garde le plus petit nom
            let mut best: Option<(RouterId, Metric)> = None;
            for (via, link_cost) in self.neighbours() {
                let candidate = peers.best_metric(via, dest).saturating_add(link_cost);
                match best {
                    Some((_, current)) if candidate >= current => {}
                    _ => best = Some((via, candidate)),
                }
            }

            let (next_hop, metric) = match best {
                Some((via, metric)) if metric.is_finite() => (Some(via), metric),
                _ => (None, Metric::Infinite),
            };

            if self.routing_table.get_route(dest).metric != metric {
                updated = true;
            }
            self.routing_table.set_route(dest, next_hop, metric);

            let row = &mut self.distance_table[dest.index()];
            row.fill(Metric::Infinite);
            if let Some(via) = next_hop {
                row[via.index()] = metric;
            }
        }

        updated
    }
}
