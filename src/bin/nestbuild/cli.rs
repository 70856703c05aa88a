//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// nestbuild - Build order planning for nested solutions
#[derive(Parser)]
#[command(name = "nestbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to Solution.toml (defaults to searching upward from cwd)
    #[arg(long, global = true, env = "NESTBUILD_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the build order of the root solution's children
    Order(OrderArgs),

    /// Show the subdirectory plan of every solution
    Plan(PlanArgs),

    /// Show what a unit provides and requires
    Closure(ClosureArgs),

    /// Render the child dependency graph as Graphviz DOT
    Graph(GraphArgs),
}

#[derive(Args)]
pub struct OrderArgs {
    /// Only resolve this configuration
    #[arg(short, long = "config")]
    pub configuration: Option<String>,
}

#[derive(Args)]
pub struct PlanArgs {
    /// Only plan this solution (defaults to the whole tree)
    pub solution: Option<String>,
}

#[derive(Args)]
pub struct ClosureArgs {
    /// Unit to inspect
    pub unit: String,

    /// Configuration to inspect it under
    #[arg(short, long = "config")]
    pub configuration: String,
}

#[derive(Args)]
pub struct GraphArgs {
    /// Configuration to draw
    #[arg(short, long = "config")]
    pub configuration: String,

    /// Solution whose children to draw (defaults to the root)
    #[arg(long)]
    pub solution: Option<String>,
}
