//! CLI frontend for the Blockwright add-on compiler.

mod commands;
mod manifest;
mod pack;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bw",
    about = "Blockwright: compile add-on manifests into behavior and resource packs",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new add-on directory with a template manifest
    Init {
        /// Name of the add-on; also used as its namespace
        name: String,
    },

    /// Compile every entity and item and report problems
    Check {
        /// Add-on manifest
        #[arg(default_value = "addon.json")]
        manifest: PathBuf,

        /// Reject duplicate declarations and dangling animation references
        #[arg(long)]
        strict: bool,
    },

    /// Compile the add-on and write the pack directories
    Build {
        /// Add-on manifest
        #[arg(default_value = "addon.json")]
        manifest: PathBuf,

        /// Output directory for behavior_pack/ and resource_pack/
        #[arg(short, long, default_value = "build")]
        out: PathBuf,

        /// Reject duplicate declarations and dangling animation references
        #[arg(long)]
        strict: bool,
    },

    /// List the entities and items in the manifest
    List {
        /// Add-on manifest
        #[arg(default_value = "addon.json")]
        manifest: PathBuf,
    },

    /// Print the compiled JSON of one entity or item
    Show {
        /// Identifier (`namespace:name`) or bare name
        identifier: String,

        /// Add-on manifest
        #[arg(short, long, default_value = "addon.json")]
        manifest: PathBuf,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bw=info,bw_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { name } => commands::init::run(&name),
        Commands::Check { manifest, strict } => commands::check::run(&manifest, strict),
        Commands::Build {
            manifest,
            out,
            strict,
        } => commands::build::run(&manifest, &out, strict),
        Commands::List { manifest } => commands::list::run(&manifest),
        Commands::Show {
            identifier,
            manifest,
        } => commands::show::run(&manifest, &identifier),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
