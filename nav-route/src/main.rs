#![deny(
    clippy::nursery,
    clippy::pedantic,
    missing_docs,
    clippy::missing_docs_in_private_items,
)]
//! `navroute` command line interface
//!
//! Reads a region file, finds a shortest route between two of its cities and prints it. On any
//! failure the single line `ERROR` is printed instead and the cause is logged to stderr.
//! See binary --help for more information.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use clap::Parser;
use nav_route::render::write_dot_file;
use nav_route::{
    read_region,
    region_dot,
    render_route,
    route,
    Adjacency,
    OutputFormat,
    Route,
    RouteError,
};
use tracing::{
    error,
    info,
};

/// Exit status when the cities exist but are not connected.
const NO_ROUTE_STATUS: u8 = 2;

/// Exit status for unreadable or invalid input and unknown cities.
const FAILURE_STATUS: u8 = 1;

/// navroute: shortest route between two cities of a region file
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Region file with a `cities` section followed by a `streets` section.
    #[arg(short, long, default_value = "input.txt")]
    input: PathBuf,

    /// Name of the city to start from.
    #[arg(short, long, default_value = "n0")]
    start: String,

    /// Name of the city to reach.
    #[arg(short, long, default_value = "n1")]
    target: String,

    /// How to print the route.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also write the region as a Graphviz DOT file, with the route highlighted.
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Logging filter (`trace`, `debug`, `info`, `warn`, `error`, or any `RUST_LOG`-style
    /// directive).
    #[arg(short, long, default_value = "warn")]
    verbosity: String,
}

/// Load the region and answer the query described by `args`.
fn run(args: &Cli) -> Result<Route> {
    let region =
        read_region(&args.input).with_context(|| format!("reading region from {}", args.input.display()))?;
    let adjacency = Adjacency::build(&region);

    let result = route(&args.start, &args.target, &adjacency);

    if let Some(path) = &args.dot {
        let dot = region_dot(&region, result.as_ref().ok());
        write_dot_file(path, &dot).with_context(|| format!("writing {}", path.display()))?;
        info!("region graph written to {}", path.display());
    }

    Ok(result?)
}

/// Process exit status for a failed run.
fn failure_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<RouteError>() {
        Some(RouteError::NoRoute { .. }) => NO_ROUTE_STATUS,
        _ => FAILURE_STATUS,
    }
}

/// The stdout line and exit status for the outcome of a run.
///
/// Failures are logged with their full cause chain and reported as the single line `ERROR`.
fn report(result: Result<String>) -> (String, u8) {
    match result {
        Ok(rendered) => (rendered, 0),
        Err(err) => {
            error!("{err:#}");
            ("ERROR".to_owned(), failure_status(&err))
        },
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();

    // Conform to crate-standard logging.
    nav_core::logging::setup(&args.verbosity);
    info!(start = %args.start, target = %args.target, "routing");

    let (line, status) = report(run(&args).and_then(|route| render_route(&route, args.format)));
    println!("{line}");
    ExitCode::from(status)
}
