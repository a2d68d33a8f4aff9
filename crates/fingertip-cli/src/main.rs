//! Fingertip CLI: scene replay, benchmarking, and validation.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "fingertip")]
#[command(version, about = "Fingertip: poke interaction resolution engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a scene file and print the resulting events.
    Replay {
        /// Path to scene file (JSON or TOML).
        path: String,

        /// Print events as JSON lines instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (single_press, recoil_double_press,
        /// stacked_buttons, scroll_drag, hover_jitter, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a scene file.
    Validate {
        /// Path to scene file.
        path: String,
    },

    /// Write a built-in scenario as a scene file.
    Export {
        /// Scenario name.
        scenario: String,

        /// Output path (JSON, or TOML by extension). Prints JSON to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay { path, json } => commands::replay(&path, json),
        Commands::Benchmark { scenario, output } => commands::benchmark(&scenario, output.as_deref()),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Export { scenario, output } => commands::export(&scenario, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
