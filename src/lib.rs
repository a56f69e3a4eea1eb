// This file defines the library interface for the Distance Vector simulator, exporting the modules and types used by the `dv` binary and the tests.

pub mod core;
pub mod error;
pub mod init;
pub mod read_config;
pub mod read_topology;
pub mod report;
pub mod simulation;
pub mod topology;
pub mod types;

pub use error::{AppError, Result};
pub use read_config::SimulationConfig;
pub use simulation::{run_simulation, Phase, PhaseSummary, Simulation};
pub use topology::Topology;
