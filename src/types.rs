// Définitions des structures et enums partagées

use serde::{Serialize, Deserialize};
use std::fmt;

/// Jeton affiché pour une distance infinie ou un next-hop inexistant
pub const INF_TOKEN: &str = "INF";

/// Index stable d'un routeur, attribué une fois au démarrage dans l'ordre alphabétique des noms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RouterId(pub usize);

impl RouterId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Coût d'un chemin : fini, ou infini (destination inaccessible)
///
/// L'ordre dérivé place toute valeur finie avant `Infinite`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Metric {
    Finite(u64),
    Infinite,
}

impl Metric {
    pub fn is_finite(self) -> bool {
        matches!(self, Metric::Finite(_))
    }

    /// Ajoute le coût d'un lien ; l'infini reste infini et un dépassement sature à l'infini
    pub fn saturating_add(self, link_cost: u64) -> Metric {
        match self {
            Metric::Finite(cost) => cost
                .checked_add(link_cost)
                .map(Metric::Finite)
                .unwrap_or(Metric::Infinite),
            Metric::Infinite => Metric::Infinite,
        }
    }

    pub fn value(self) -> Option<u64> {
        match self {
            Metric::Finite(cost) => Some(cost),
            Metric::Infinite => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Finite(cost) => write!(f, "{}", cost),
            Metric::Infinite => write!(f, "{}", INF_TOKEN),
        }
    }
}

/// Lien bidirectionnel de la topologie initiale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub a: String,
    pub b: String,
    pub cost: u64,
}

/// Effet d'une modification de topologie sur un lien
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkChange {
    /// Crée le lien ou remplace son coût
    Set(u64),
    /// Supprime le lien s'il existe (coût `-1` en entrée)
    Remove,
}

/// Modification de topologie appliquée après la première convergence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkEdit {
    pub a: String,
    pub b: String,
    pub change: LinkChange,
}
