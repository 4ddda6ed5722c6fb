//! msgbridge CLI - Binding generator for service definitions
//!
//! Commands:
//! - `msgbridge generate` - Generate Rust and C bindings from `.srv` files
//! - `msgbridge check` - Validate a msgbridge.toml and the services it lists
//! - `msgbridge inspect` - Print a parsed service definition as JSON

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod check;
mod generate;
mod inspect;
mod logging;
mod project;
mod verify;

#[derive(Parser)]
#[command(name = "msgbridge")]
#[command(author, version, about = "Binding generator for msgbridge services", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Rust and C bindings
    Generate {
        /// Path to msgbridge.toml (default: ./msgbridge.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory for generated code
        #[arg(short, long)]
        output: PathBuf,

        /// Additional .srv files to generate
        #[arg(long)]
        srv: Vec<PathBuf>,

        /// Package name (overrides the configuration file)
        #[arg(short, long)]
        package: Option<String>,

        /// Syntax-check the generated C with the system C compiler
        #[arg(long)]
        verify_c: bool,

        /// Include directories for --verify-c
        #[arg(short = 'I', long = "include")]
        include: Vec<PathBuf>,
    },

    /// Validate a msgbridge.toml and every service it lists
    Check {
        /// Path to msgbridge.toml (default: ./msgbridge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a parsed .srv file as JSON
    Inspect {
        /// Service definition to read
        #[arg(long)]
        srv: PathBuf,

        /// Package the service belongs to
        #[arg(short, long)]
        package: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Commands::Generate {
            config,
            output,
            srv,
            package,
            verify_c,
            include,
        } => {
            generate::run(generate::GenerateArgs {
                config,
                output,
                srv,
                package,
                verify_c,
                include,
            })?;
        }
        Commands::Check { config } => {
            check::run(config)?;
        }
        Commands::Inspect { srv, package } => {
            inspect::run(&srv, &package)?;
        }
    }

    Ok(())
}
