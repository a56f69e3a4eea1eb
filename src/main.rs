use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use log::{error, info};

use dv_simulator::error::Result;
use dv_simulator::read_config::{read_simulation_config, SimulationConfig};
use dv_simulator::read_topology::{read_topology, read_topology_file};
use dv_simulator::{init, report, run_simulation};

#[derive(Parser, Debug)]
#[command(name = "dv", about = "Distance Vector routing simulator", long_about = None)]
struct Args {
    /// Topology file; standard input is read when omitted.
    input: Option<PathBuf>,
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Abort a phase that has not converged after this many rounds.
    #[arg(long)]
    max_rounds: Option<u64>,
    /// Write the final routing tables of both phases as JSON.
    #[arg(long)]
    summary_json: Option<PathBuf>,
    /// Default log level when RUST_LOG is unset.
    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let config = match &args.config {
        Some(path) => read_simulation_config(path)?,
        None => SimulationConfig::default(),
    };
    config.with_overrides(args.max_rounds, args.summary_json.clone(), args.log_level.clone())
}

fn run(args: &Args, config: &SimulationConfig) -> Result<()> {
    let topology = match &args.input {
        Some(path) => read_topology_file(path)?,
        None => read_topology(io::stdin().lock())?,
    };
    info!("Loaded {} routers from {}", topology.routers.len(),
          args.input.as_ref().map_or("stdin".to_string(), |p| p.display().to_string()));

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summaries = run_simulation(&topology, config, &mut out)?;

    if let Some(path) = &config.summary_json {
        report::write_summary(path, &summaries)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dv: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init::init_logging_and_env(&config.log_level);

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("dv: {}", e);
            ExitCode::FAILURE
        }
    }
}
