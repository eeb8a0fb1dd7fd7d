use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

/// Status the launcher exits with on any failure of its own (-1 as seen by the OS).
pub const FAILURE_EXIT_STATUS: u8 = 255;

/// Configuration entries without which no command can be built
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequiredField {
    #[error("Device not present in config")]
    Device,

    #[error("No MQTT settings in config")]
    Mqtt,

    #[error("No area config")]
    Areas,

    #[error("Area config #{index} does not have \"num\"")]
    AreaNum { index: usize },

    #[error("Area config #{index} does not have \"zones\"")]
    AreaZones { index: usize },
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration error: {0}")]
    MissingField(#[from] RequiredField),

    #[error("Failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for child process: {0}")]
    Wait(#[source] io::Error),

    #[error("Failed to install signal handler: {0}")]
    Signal(#[source] io::Error),
}

impl LaunchError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(FAILURE_EXIT_STATUS)
    }
}
