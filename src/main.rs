use clap::Parser;
use facloc::locate::solver::SolverOptions;
use facloc::{solve_to_record, RunConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exact capacitated facility location over `.ntw` road networks.
///
/// Writes one JSON solution record per invocation. Infeasibility and solver
/// failures are captured in the record's `error` field and exit zero, so
/// parameter sweeps continue past individual failures.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Network file in `.ntw` format
    network: PathBuf,
    /// Service capacity per opened facility (uniform regime)
    capacity: u32,
    /// Exact number of facilities to open
    facilities: usize,
    /// Output path for the JSON solution record
    output: PathBuf,
    /// Candidate site file, one `<siteId> <capacity>` line per site
    facility_file: Option<PathBuf>,
    /// Distance cache artifact to reuse or create
    distance_cache: Option<PathBuf>,
    /// Fix locations under the uniform capacity, then re-optimize the
    /// assignments under the per-site capacities
    #[arg(long)]
    equalize: bool,
    /// Solver wall-clock limit in seconds
    #[arg(long)]
    time_limit: Option<f64>,
    /// Forward solver output to the console
    #[arg(long)]
    solver_log: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = RunConfig::new(cli.network, cli.capacity, cli.facilities);
    config.facility_file = cli.facility_file;
    config.distance_cache = cli.distance_cache;
    config.equalize = cli.equalize;
    config.solver = SolverOptions {
        time_limit: cli.time_limit,
        log_to_console: cli.solver_log,
    };

    let record = solve_to_record(&config);
    if let Some(error) = &record.error {
        log::error!("{}: {error}", config.network_file.display());
    }

    match record.write(&cli.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("cannot write {}: {err}", cli.output.display());
            ExitCode::FAILURE
        }
    }
}
