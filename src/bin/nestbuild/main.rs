//! nestbuild CLI - Build order planning for nested solutions

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use nestbuild::ops::PlanError;
use nestbuild::util::diagnostic::emit;
use nestbuild::OrderError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("nestbuild=debug")
    } else {
        EnvFilter::new("nestbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let color = !cli.no_color;
    let session = match commands::Session::open(&cli) {
        Ok(session) => session,
        Err(e) => {
            report(&e, None, color);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&session, cli.command) {
        report(&e, Some(&session.manifest_path), color);
        std::process::exit(1);
    }
}

fn run(session: &commands::Session, command: Commands) -> Result<()> {
    // Execute command
    match command {
        Commands::Order(args) => commands::order::execute(session, args),
        Commands::Plan(args) => commands::plan::execute(session, args),
        Commands::Closure(args) => commands::closure::execute(session, args),
        Commands::Graph(args) => commands::graph::execute(session, args),
    }
}

/// Resolver failures get a full diagnostic, everything else a one-line error.
fn report(e: &anyhow::Error, manifest: Option<&Path>, color: bool) {
    let order = e.downcast_ref::<OrderError>().or_else(|| {
        match e.downcast_ref::<PlanError>() {
            Some(PlanError::Order(inner)) => Some(inner),
            _ => None,
        }
    });

    match order {
        Some(err) => {
            let mut diagnostic = err.to_diagnostic();
            if let Some(path) = manifest {
                diagnostic = diagnostic.with_location(path);
            }
            emit(&diagnostic, color);
        }
        None => eprintln!("error: {:#}", e),
    }
}
