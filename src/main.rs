//! Runs both benchmark suites and prints their tables.
//!
//! The run is configured through the environment:
//!
//! - `BIGO_SIZE`: number of tokens in the corpus (default 1000)
//! - `BIGO_REPETITIONS`: repetitions per timed operation (default 1000)
//! - `BIGO_SEARCH_SIZE`: tokens looked up by the map lookup test (default 10)
//! - `RUST_LOG`: log filter (default `info`); logs go to stderr

use anyhow::Result;
use bigo::{Config, MapSuite, ResultsTable, SequenceSuite, Words};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    info!(
        size = config.size(),
        repetitions = config.repetitions(),
        search_size = config.search_size(),
        "starting"
    );

    let mut maps = ResultsTable::maps();
    MapSuite::new(config, Words::new()).run(&mut maps);

    let mut sequences = ResultsTable::sequences();
    SequenceSuite::new(config, Words::new()).run(&mut sequences);

    println!("{maps}\n");
    println!("{sequences}");
    Ok(())
}
