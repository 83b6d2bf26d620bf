/*!
 * rrsim - Main Entry Point
 *
 * Reads a batch description from the file named by the first argument, or
 * from stdin, runs it under round-robin scheduling and prints the
 * transcript to stdout.
 */

use std::io::{self, Write};
use tracing::{debug, info};

use rrsim::monitoring::{generate_run_id, simulation_span};
use rrsim::{init_tracing, read_batch, read_batch_from_path, report, SimConfig, SimError, Simulation};

fn main() -> miette::Result<()> {
    let config = SimConfig::from_env().map_err(SimError::from)?;
    // A subscriber can only be installed once per process; a second attempt is harmless
    let _ = init_tracing(&config);

    let run_id = generate_run_id();
    let span = simulation_span(&run_id);
    let _guard = span.enter();

    run(&config).map_err(Into::into)
}

fn run(config: &SimConfig) -> Result<(), SimError> {
    let batch = match std::env::args_os().nth(1) {
        Some(path) => {
            debug!(path = %path.to_string_lossy(), "Reading batch from file");
            read_batch_from_path(path)?
        }
        None => {
            debug!("Reading batch from stdin");
            read_batch(io::stdin().lock())?
        }
    };

    info!(
        quantum = batch.quantum.get(),
        processes = batch.processes.len(),
        total_work = batch.total_work(),
        "Batch accepted"
    );

    let mut events: Vec<rrsim::Event> = Vec::new();
    let stats = Simulation::new(&batch)?.run(&mut events)?;

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    report::render(config.output, &events, &mut out)?;
    out.flush()?;

    info!(
        dispatches = stats.dispatches,
        context_switches = stats.context_switches,
        preemptions = stats.preemptions,
        "Run complete"
    );
    Ok(())
}
