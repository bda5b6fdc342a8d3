//! ezdoc CLI - Documentation site generator.
//!
//! Provides commands for:
//! - `check`: Validate navigation descriptors, translations and page coverage
//! - `nav`: Print the resolved navigation tree of a locale
//! - `page`: Show the navigation context of one page
//! - `toc`: Print the table of contents of a Markdown file
//! - `new`: Scaffold a page in every locale

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, NavArgs, NewArgs, PageArgs, TocArgs};
use output::Output;

/// ezdoc - Documentation site generator.
#[derive(Parser)]
#[command(name = "ezdoc", version, about)]
struct Cli {
    /// Enable info-level logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check descriptors, translations and unreferenced pages.
    Check(CheckArgs),
    /// Print the navigation tree of a locale.
    Nav(NavArgs),
    /// Show title, breadcrumbs and neighbours of a page.
    Page(PageArgs),
    /// Print the table of contents of a Markdown file.
    Toc(TocArgs),
    /// Create a new page in every locale.
    New(NewArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Check(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
        Commands::Page(args) => args.execute(),
        Commands::Toc(args) => args.execute(),
        Commands::New(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
