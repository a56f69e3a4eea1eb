// Table de routage d'un routeur : next-hop et coût total pour chaque destination

use crate::types::{Metric, RouterId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub next_hop: Option<RouterId>,
    pub metric: Metric,
}

impl Route {
    pub const UNREACHABLE: Route = Route {
        next_hop: None,
        metric: Metric::Infinite,
    };

    pub fn is_reachable(&self) -> bool {
        self.next_hop.is_some() && self.metric.is_finite()
    }
}

/// Indexée par `RouterId` ; une destination jamais calculée vaut `Route::UNREACHABLE`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new(router_count: usize) -> Self {
        RoutingTable {
            routes: vec![Route::UNREACHABLE; router_count],
        }
    }

    pub fn set_route(&mut self, destination: RouterId, next_hop: Option<RouterId>, metric: Metric) {
        if let Some(route) = self.routes.get_mut(destination.index()) {
            route.next_hop = next_hop;
            route.metric = metric;
        }
    }

    pub fn get_route(&self, destination: RouterId) -> Route {
        self.routes
            .get(destination.index())
            .copied()
            .unwrap_or(Route::UNREACHABLE)
    }

    pub fn clear(&mut self) {
        self.routes.fill(Route::UNREACHABLE);
    }

    pub fn list_routes(&self) -> impl Iterator<Item = (RouterId, &Route)> {
        self.routes.iter().enumerate().map(|(i, route)| (RouterId(i), route))
    }
}
