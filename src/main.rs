mod command;
mod error;
mod invoke;
mod signals;
mod utils;

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use command::build_command;
use error::LaunchError;
use invoke::execute_command;
use utils::{init_tracing, LaunchConfig, DEFAULT_CONFIG_PATH};

#[derive(Parser, Debug)]
#[command(
    name = "paraevo-launcher",
    version,
    about = "Starts the paraevo alarm panel daemon from its YAML configuration"
)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing("info") {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(&cli.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            e.exit_code()
        }
    }
}

async fn run(config_path: &Path) -> Result<(), LaunchError> {
    info!("Loading configuration from {}", config_path.display());
    let config = LaunchConfig::load_from_file(config_path)?;

    let command = build_command(&config)?;

    // paraevo's own exit status is reported but does not become ours
    let status = execute_command(&command).await?;
    if status.success() {
        info!("paraevo exited successfully");
    } else {
        warn!("paraevo exited with {}", status);
    }

    Ok(())
}
