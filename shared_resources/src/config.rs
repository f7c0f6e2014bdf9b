use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use tracing::{info, warn};

use super::request::Floor;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

pub const DEFAULT_TOP_FLOOR: Floor = 10;
pub const DEFAULT_FLOOR_TRAVEL_MS: u64 = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("start floor {start_floor} is above top floor {top_floor}")]
    InvalidStartFloor { start_floor: Floor, top_floor: Floor },
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElevatorConfigFile {
    pub top_floor: Floor,
    pub start_floor: Floor,
    pub floor_travel_ms: u64,
}

impl Default for ElevatorConfigFile {
    fn default() -> Self {
        ElevatorConfigFile {
            top_floor: DEFAULT_TOP_FLOOR,
            start_floor: 0,
            floor_travel_ms: DEFAULT_FLOOR_TRAVEL_MS,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    pub elevator: ElevatorConfigFile,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElevatorConfig {
    pub top_floor: Floor,
    pub start_floor: Floor,
    pub floor_travel_time: Duration,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig::from_file(ElevatorConfigFile::default())
    }
}

impl ElevatorConfig {
    fn from_file(file: ElevatorConfigFile) -> Self {
        ElevatorConfig {
            top_floor: file.top_floor,
            start_floor: file.start_floor,
            floor_travel_time: Duration::from_millis(file.floor_travel_ms),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchConfig {
    pub elevator: ElevatorConfig,
}

fn read_config_file() -> Result<ConfigFile, ConfigError> {
    for file_path in [CONFIG_FILE_PATH, FALLBACK_CONFIG_FILE_PATH] {
        if Path::new(file_path).exists() {
            info!(file_path, "reading configuration");
            let config_contents = fs::read_to_string(file_path)?;
            return parse_config_file(&config_contents);
        }
    }
    info!("No configuration file provided, using default settings...");
    Ok(ConfigFile::default())
}

pub fn parse_config_file(contents: &str) -> Result<ConfigFile, ConfigError> {
    Ok(serde_json::from_str(contents)?)
}

/// Applies `--floortime`, `--startfloor` and `--topfloor` pairs on top of the file settings.
fn parse_args(args: &[String], mut settings: ElevatorConfigFile) -> ElevatorConfigFile {
    for arg_pair in args.chunks_exact(2) {
        match arg_pair[0].as_str() {
            "--floortime" => {
                settings.floor_travel_ms = match arg_pair[1].parse::<u64>() {
                    Ok(ms) => ms,
                    Err(_) => {
                        warn!("floortime {} is not a number, skipping...", arg_pair[1]);
                        settings.floor_travel_ms
                    },
                };
            },
            "--startfloor" => {
                settings.start_floor = match arg_pair[1].parse::<Floor>() {
                    Ok(floor) => floor,
                    Err(_) => {
                        warn!("startfloor {} is not a floor, skipping...", arg_pair[1]);
                        settings.start_floor
                    },
                };
            },
            "--topfloor" => {
                settings.top_floor = match arg_pair[1].parse::<Floor>() {
                    Ok(floor) => floor,
                    Err(_) => {
                        warn!("topfloor {} is not a floor, skipping...", arg_pair[1]);
                        settings.top_floor
                    },
                };
            },
            _ => warn!("illegal argument {}, skipping...", arg_pair[0]),
        }
    }
    settings
}

impl DispatchConfig {
    pub fn get() -> Result<Self, ConfigError> {
        let config_file = read_config_file()?;
        let args: Vec<String> = env::args().skip(1).collect();
        Self::from_parts(config_file, &args)
    }

    pub fn from_parts(config_file: ConfigFile, args: &[String]) -> Result<Self, ConfigError> {
        let settings = parse_args(args, config_file.elevator);
        if settings.start_floor > settings.top_floor {
            return Err(ConfigError::InvalidStartFloor {
                start_floor: settings.start_floor,
                top_floor: settings.top_floor,
            });
        }
        Ok(DispatchConfig {
            elevator: ElevatorConfig::from_file(settings),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let file = parse_config_file(r#"{ "elevator": { "top_floor": 6 } }"#).unwrap();
        let config = DispatchConfig::from_parts(file, &[]).unwrap();
        assert_eq!(config.elevator.top_floor, 6);
        assert_eq!(config.elevator.start_floor, 0);
        assert_eq!(config.elevator.floor_travel_time, Duration::from_millis(DEFAULT_FLOOR_TRAVEL_MS));
    }

    #[test]
    fn args_override_file_and_skip_garbage() {
        let config = DispatchConfig::from_parts(
            ConfigFile::default(),
            &args(&["--floortime", "0", "--startfloor", "abc", "--bogus", "1", "--topfloor", "4"]),
        )
        .unwrap();
        assert_eq!(config.elevator.floor_travel_time, Duration::ZERO);
        assert_eq!(config.elevator.start_floor, 0);
        assert_eq!(config.elevator.top_floor, 4);
    }

    #[test]
    fn start_floor_above_top_is_rejected() {
        let result = DispatchConfig::from_parts(ConfigFile::default(), &args(&["--startfloor", "11"]));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidStartFloor { start_floor: 11, top_floor: 10 })
        ));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(matches!(parse_config_file("{ not json"), Err(ConfigError::Parse(_))));
    }
}
