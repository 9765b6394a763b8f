//! cms CLI - Main entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cms_core::FallbackPolicy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "cms")]
#[command(version)]
#[command(about = "Load site content files into a page", long_about = None)]
struct Cli {
    /// Config file (defaults to ./cms.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a content file and print it as JSON
    Decode {
        /// Content file to decode
        file: PathBuf,
    },

    /// Print the patches the content would apply to a page, as JSON
    Patches {
        /// HTML page to patch
        #[arg(long)]
        page: PathBuf,

        /// Directory with the content files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Fallback policy (preserve-existing, defaults)
        #[arg(long)]
        fallback: Option<FallbackPolicy>,
    },

    /// Apply the content to a page and write the result
    Apply {
        /// HTML page to patch
        #[arg(long)]
        page: PathBuf,

        /// Directory with the content files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Fallback policy (preserve-existing, defaults)
        #[arg(long)]
        fallback: Option<FallbackPolicy>,

        /// Write output to FILE (use '--output -' for stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Report which content files exist and pass their checks
    Check {
        /// Directory with the content files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "cms=debug,cms_core=debug,cms_dom=debug"
    } else {
        "cms=info,cms_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let global = commands::GlobalArgs { config: cli.config };

    match cli.command {
        Commands::Decode { file } => commands::decode::execute(file),
        Commands::Patches {
            page,
            data_dir,
            fallback,
        } => commands::patches::execute(
            &global,
            commands::patches::PatchesArgs {
                page,
                data_dir,
                fallback,
            },
        ),
        Commands::Apply {
            page,
            data_dir,
            fallback,
            output,
        } => commands::apply::execute(
            &global,
            commands::apply::ApplyArgs {
                page,
                data_dir,
                fallback,
                output,
            },
        ),
        Commands::Check { data_dir, json } => {
            commands::check::execute(&global, commands::check::CheckArgs { data_dir, json })
        }
    }
}
