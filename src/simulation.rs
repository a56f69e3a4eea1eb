// Pilote de la simulation : boucle de rounds, détection de convergence, puis second passage après modifications

use std::collections::BTreeMap;
use std::io::Write;
use log::{debug, info};
use serde::Serialize;
use crate::core::network::Network;
use crate::error::{AppError, Result};
use crate::read_config::SimulationConfig;
use crate::report::{self, RouteEntry};
use crate::topology::Topology;
use crate::types::LinkEdit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Topologie initiale
    Initial,
    /// Topologie après application des modifications
    AfterEdits,
}

/// Résultat d'une phase convergée
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhaseSummary {
    pub phase: Phase,
    /// Nombre de passes de mise à jour exécutées, la dernière sans changement
    pub rounds: u64,
    pub routing_tables: BTreeMap<String, Vec<RouteEntry>>,
}

pub struct Simulation {
    network: Network,
    edits: Vec<LinkEdit>,
    max_rounds: Option<u64>,
}

impl Simulation {
    pub fn new(topology: &Topology, config: &SimulationConfig) -> Result<Self> {
        Ok(Simulation {
            network: Network::from_topology(topology)?,
            edits: topology.edits.clone(),
            max_rounds: config.max_rounds,
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Boucle PRINT -> UPDATE jusqu'à ce qu'aucun coût ne change, puis affiche les tables de routage
    pub fn run_phase<W: Write>(&mut self, phase: Phase, out: &mut W) -> Result<PhaseSummary> {
        info!("Starting {:?} phase", phase);
        let mut t: u64 = 0;
        loop {
            for router in self.network.routers() {
                out.write_all(report::render_distance_table(&self.network, router.id(), t).as_bytes())?;
            }

            let updated = self.network.update_round();
            debug!("Round t={} updated={}", t, updated);
            if !updated {
                break;
            }
            if let Some(limit) = self.max_rounds {
                if t + 1 >= limit {
                    return Err(AppError::ConvergenceError(format!(
                        "{:?} phase did not converge within {} rounds", phase, limit
                    )));
                }
            }
            t += 1;
        }

        for router in self.network.routers() {
            out.write_all(report::render_routing_table(&self.network, router.id()).as_bytes())?;
        }

        let rounds = t + 1;
        info!("{:?} phase converged after {} rounds", phase, rounds);
        Ok(PhaseSummary {
            phase,
            rounds,
            routing_tables: report::routing_snapshot(&self.network),
        })
    }

    /// Applique les modifications dans l'ordre d'entrée puis réinitialise toutes les tables
    pub fn apply_edits(&mut self) -> Result<()> {
        for edit in &self.edits {
            self.network.apply_edit(edit)?;
        }
        self.network.reset_tables();
        info!("Applied {} topology edits", self.edits.len());
        Ok(())
    }

    /// Les deux phases complètes, dans l'ordre
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Vec<PhaseSummary>> {
        let initial = self.run_phase(Phase::Initial, out)?;
        self.apply_edits()?;
        let after_edits = self.run_phase(Phase::AfterEdits, out)?;
        out.flush()?;
        Ok(vec![initial, after_edits])
    }
}

/// Exécute une simulation complète et écrit les tables dans `out`
pub fn run_simulation<W: Write>(
    topology: &Topology,
    config: &SimulationConfig,
    out: &mut W,
) -> Result<Vec<PhaseSummary>> {
    let mut simulation = Simulation::new(topology, config)?;
    simulation.run(out)
}
