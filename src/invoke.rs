use std::fs::{File, OpenOptions};
use std::path::Path;
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::{debug, info};

use crate::command::LaunchCommand;
use crate::error::LaunchError;
use crate::signals::SignalForwarder;

/// Runs the command directly (no shell) and blocks until it exits.
///
/// Streams are inherited unless a log file is configured, in which case the
/// child's stdout and stderr are both appended to it.
pub async fn execute_command(command: &LaunchCommand) -> Result<ExitStatus, LaunchError> {
    info!("Final command: {}", command);

    let mut process = prepare_process(command)?;

    // Handlers go in before spawning so an early SIGTERM is not lost
    let mut forwarder = SignalForwarder::new()?;

    let mut child = process.spawn().map_err(|source| LaunchError::Spawn {
        program: command.program.clone(),
        source,
    })?;
    debug!("paraevo started with pid {:?}", child.id());

    forwarder.wait_for_exit(&mut child).await
}

/// Builds the child process. It gets its own process group so a terminal
/// Ctrl+C reaches paraevo once, through the launcher's forwarder.
fn prepare_process(command: &LaunchCommand) -> Result<Command, LaunchError> {
    let mut process = Command::new(&command.program);
    process.args(&command.args).process_group(0);

    if let Some(log_file) = &command.log_file {
        let stdout = open_log_file(log_file)?;
        let stderr = stdout.try_clone().map_err(|source| LaunchError::LogFile {
            path: log_file.clone(),
            source,
        })?;
        debug!("Redirecting paraevo output to {}", log_file.display());
        process.stdout(stdout).stderr(stderr);
    }

    Ok(process)
}

fn open_log_file(path: &Path) -> Result<File, LaunchError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LaunchError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}
