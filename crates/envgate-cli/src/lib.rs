//! Command-line interface for the envgate environment directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use envgate_core::config::EnvgateConfig;
use envgate_core::logging::{init_logging, LogLevel};

pub mod commands;
pub mod opener;
pub mod output;
pub mod progress;

pub use commands::Context;
pub use opener::{PrintNavigator, SystemNavigator};

/// CLI arguments parser
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the signed-in user and the selected environment
    Whoami,

    /// List your environments
    List {
        /// Only show environments whose name or description contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Create an environment and open it in the builder
    Create {
        /// Display name of the new environment
        display_name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,

        /// Print the builder URL instead of opening it
        #[arg(long)]
        no_open: bool,
    },

    /// Rename an environment or change its description
    Edit {
        /// System name of the environment
        name: String,

        /// New display name
        #[arg(short = 'n', long)]
        display_name: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete an environment
    Delete {
        /// System name of the environment
        name: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Select an environment and open it in the builder
    Select {
        /// System name of the environment
        name: String,

        /// Print the builder URL instead of opening it
        #[arg(long)]
        no_open: bool,
    },

    /// Print the selected environment
    Current,

    /// Forget the selected environment
    Clear,

    /// Sign out and forget the selected environment
    Logout,

    /// Browse environments interactively
    Browse,
}

impl Commands {
    /// Whether URLs produced by this command go to the desktop opener
    fn opens_urls(&self) -> bool {
        match self {
            Commands::Create { no_open, .. } | Commands::Select { no_open, .. } => !no_open,
            _ => true,
        }
    }
}

/// Run the CLI application
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LogLevel::for_verbosity(cli.verbose), cli.verbose);
    output::init_colors();

    let config = EnvgateConfig::load(cli.config.as_deref())?;
    debug!("Using backend {}", config.backend_url);

    // Local selection commands need no session
    match &cli.command {
        Commands::Current => return Ok(commands::execute_current(&config)?),
        Commands::Clear => return Ok(commands::execute_clear(&config)?),
        _ => {}
    }

    let ctx = Context::new(config, cli.command.opens_urls())?;

    match cli.command {
        Commands::Whoami => commands::execute_whoami(&ctx).await?,
        Commands::List { search } => commands::execute_list(&ctx, search).await?,
        Commands::Create {
            display_name,
            description,
            ..
        } => commands::execute_create(&ctx, display_name, description).await?,
        Commands::Edit {
            name,
            display_name,
            description,
        } => commands::execute_edit(&ctx, name, display_name, description).await?,
        Commands::Delete { name, yes } => commands::execute_delete(&ctx, name, yes).await?,
        Commands::Select { name, .. } => commands::execute_select(&ctx, name).await?,
        Commands::Logout => commands::execute_logout(&ctx).await?,
        Commands::Browse => commands::execute_browse(&ctx).await?,
        Commands::Current | Commands::Clear => {}
    }

    Ok(())
}
