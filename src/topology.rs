// Modèle statique de la topologie : routeurs, liens initiaux et modifications ultérieures

use std::collections::HashSet;
use crate::error::{AppError, Result};
use crate::types::{Link, LinkChange, LinkEdit};

/// Description complète d'une simulation, en lecture seule une fois validée
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    /// Noms des routeurs dans l'ordre de déclaration (ordre de mise à jour)
    pub routers: Vec<String>,
    pub links: Vec<Link>,
    pub edits: Vec<LinkEdit>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_router(&mut self, name: impl Into<String>) {
        self.routers.push(name.into());
    }

    pub fn add_link(&mut self, a: impl Into<String>, b: impl Into<String>, cost: u64) {
        self.links.push(Link { a: a.into(), b: b.into(), cost });
    }

    pub fn add_edit(&mut self, a: impl Into<String>, b: impl Into<String>, change: LinkChange) {
        self.edits.push(LinkEdit { a: a.into(), b: b.into(), change });
    }

    /// Noms triés, utilisés pour l'affichage
    pub fn sorted_routers(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routers.iter().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Vérifie l'unicité des noms et que chaque lien ou modification relie deux routeurs connus et distincts
    pub fn validate(&self) -> Result<()> {
        let mut known = HashSet::new();
        for name in &self.routers {
            if name.is_empty() {
                return Err(AppError::TopologyError("Empty router name".to_string()));
            }
            if !known.insert(name.as_str()) {
                return Err(AppError::TopologyError(format!("Duplicate router name: {}", name)));
            }
        }

        let endpoints = self.links.iter()
            .map(|link| ("link", &link.a, &link.b))
            .chain(self.edits.iter().map(|edit| ("edit", &edit.a, &edit.b)));

        for (kind, a, b) in endpoints {
            for name in [a, b] {
                if !known.contains(name.as_str()) {
                    return Err(AppError::TopologyError(format!(
                        "Unknown router {} in {} {} {}", name, kind, a, b
                    )));
                }
            }
            if a == b {
                return Err(AppError::TopologyError(format!(
                    "Self-link on router {} is not allowed", a
                )));
            }
        }
        Ok(())
    }
}
