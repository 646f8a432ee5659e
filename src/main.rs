use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxboard::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fxboard::AppCommand {
    fn from(cmd: Commands) -> fxboard::AppCommand {
        match cmd {
            Commands::Convert { base, amount } => fxboard::AppCommand::Convert { base, amount },
            Commands::Session => fxboard::AppCommand::Session,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount into every listed currency once
    Convert {
        /// Currency held, defaults to the configured one
        #[arg(short, long)]
        base: Option<String>,
        /// Amount held, defaults to the configured one
        #[arg(short, long)]
        amount: Option<f64>,
    },
    /// Start an interactive session with swap and pin commands
    Session,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxboard::cli::setup::setup(),
        Some(cmd) => fxboard::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
