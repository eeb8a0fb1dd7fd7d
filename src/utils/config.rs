use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/paraevo.yaml";
pub const DEFAULT_BINARY_PATH: &str = "/opt/paraevo/paraevo";

/// A YAML scalar that is passed through to the command line as text.
///
/// Numbers and booleans are accepted wherever a string is, and are rendered
/// in their canonical string form. Numbers keep the full `u64`/`i64` range and
/// floats keep their fractional part (`2.0` stays `2.0`).
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_yaml::Number),
    Text(String),
}

impl Scalar {
    pub fn is_true(&self) -> bool {
        matches!(self, Scalar::Bool(true))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(value) => write!(f, "{}", value),
            Scalar::Number(value) => write!(f, "{}", value),
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct MqttConfig {
    pub server: Option<Scalar>,
    pub port: Option<Scalar>,
    pub topic: Option<Scalar>,
    pub login: Option<Scalar>,
    pub password: Option<Scalar>,
    pub retain: Option<Scalar>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AreaConfig {
    pub num: Option<Scalar>,
    pub zones: Option<Vec<Scalar>>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LaunchConfig {
    pub binary_path: Option<PathBuf>,
    pub verbose: Option<Scalar>,
    pub daemon: Option<Scalar>,
    pub device: Option<Scalar>,
    pub mqtt: Option<MqttConfig>,
    pub areas: Option<Vec<AreaConfig>>,
    pub user_code: Option<Scalar>,
    pub status_period: Option<Scalar>,
    pub log_file: Option<PathBuf>,
}

impl LaunchConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, LaunchError> {
        let contents = fs::read_to_string(path).map_err(|source| LaunchError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_yaml::from_str(&contents).map_err(|source| LaunchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the paraevo binary, falling back to the standard install location
    pub fn binary_path(&self) -> &Path {
        self.binary_path
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_BINARY_PATH))
    }
}

/// True only when the switch is present and set to boolean `true`
pub fn is_enabled(switch: &Option<Scalar>) -> bool {
    switch.as_ref().is_some_and(Scalar::is_true)
}
