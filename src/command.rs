use std::fmt;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::{LaunchError, RequiredField};
use crate::utils::config::{is_enabled, AreaConfig, LaunchConfig, MqttConfig, Scalar};

/// A fully resolved invocation of the paraevo binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
    /// Both stdout and stderr of the child are appended here when set
    pub log_file: Option<PathBuf>,
}

impl fmt::Display for LaunchCommand {
    /// Renders the equivalent shell command line, redirection included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        if let Some(log_file) = &self.log_file {
            write!(f, " >> {} 2>&1", shell_quote(&log_file.to_string_lossy()))?;
        }
        Ok(())
    }
}

fn shell_quote(word: &str) -> String {
    let is_plain = |c: char| c.is_ascii_alphanumeric() || "_-./,=:@%+".contains(c);
    if !word.is_empty() && word.chars().all(is_plain) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Derives the paraevo command line from the configuration.
///
/// Flags are emitted in a fixed order. The first missing required field stops
/// the derivation; nothing is returned for a partially built command.
pub fn build_command(config: &LaunchConfig) -> Result<LaunchCommand, LaunchError> {
    let mut args = Vec::new();

    if is_enabled(&config.verbose) {
        args.push("-v".to_string());
    }

    if is_enabled(&config.daemon) {
        args.push("-D".to_string());
    }

    let device = config.device.as_ref().ok_or(RequiredField::Device)?;
    args.push("-d".to_string());
    args.push(device.to_string());

    let mqtt = config.mqtt.as_ref().ok_or(RequiredField::Mqtt)?;
    push_mqtt_args(mqtt, &mut args);

    let areas = config.areas.as_ref().ok_or(RequiredField::Areas)?;
    if areas.is_empty() {
        warn!("Area list is empty, paraevo will not report any area");
    }
    for (position, area) in areas.iter().enumerate() {
        push_area_args(position + 1, area, &mut args)?;
    }

    if let Some(user_code) = &config.user_code {
        let user_code = user_code.to_string();
        if user_code.is_empty() {
            debug!("User code is empty, disarming will not be available");
        } else {
            args.push("-u".to_string());
            args.push(user_code);
        }
    }

    if let Some(period) = &config.status_period {
        args.push("-S".to_string());
        args.push(period.to_string());
    }

    Ok(LaunchCommand {
        program: config.binary_path().to_path_buf(),
        args,
        log_file: config.log_file.clone(),
    })
}

fn push_mqtt_args(mqtt: &MqttConfig, args: &mut Vec<String>) {
    match &mqtt.server {
        Some(server) => args.push(format!("--mqtt_server={}", server)),
        None => warn!("No MQTT server in config!"),
    }

    let options: [(&str, &Option<Scalar>); 4] = [
        ("port", &mqtt.port),
        ("topic", &mqtt.topic),
        ("login", &mqtt.login),
        ("password", &mqtt.password),
    ];
    for (name, value) in options {
        match value {
            Some(value) => args.push(format!("--mqtt_{}={}", name, value)),
            None => debug!("No MQTT {} in config, using paraevo default", name),
        }
    }

    if is_enabled(&mqtt.retain) {
        args.push("-r".to_string());
    }
}

fn push_area_args(
    position: usize,
    area: &AreaConfig,
    args: &mut Vec<String>,
) -> Result<(), LaunchError> {
    let num = area
        .num
        .as_ref()
        .ok_or(RequiredField::AreaNum { index: position })?;
    args.push("-a".to_string());
    args.push(num.to_string());

    let zones = area
        .zones
        .as_ref()
        .ok_or(RequiredField::AreaZones { index: position })?;
    let zones = zones
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    args.push("-z".to_string());
    args.push(zones);

    Ok(())
}
