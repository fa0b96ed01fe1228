use crate::error::{Result, SkycastError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fallback coordinates when geolocation is unavailable (New York City).
pub const DEFAULT_LATITUDE: f64 = 40.7128;
pub const DEFAULT_LONGITUDE: f64 = -74.0060;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,
}

impl std::fmt::Debug for OpenWeatherMapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapConfig")
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationConfig {
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,
    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
    /// Attempt IP-based geolocation before falling back to the default.
    #[serde(default = "default_geolocate")]
    pub geolocate: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_latitude: DEFAULT_LATITUDE,
            default_longitude: DEFAULT_LONGITUDE,
            geolocate: true,
        }
    }
}

fn default_latitude() -> f64 {
    DEFAULT_LATITUDE
}

fn default_longitude() -> f64 {
    DEFAULT_LONGITUDE
}

fn default_geolocate() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Wall-clock refresh interval for the displayed time.
    #[serde(default = "default_clock_tick")]
    pub clock_tick_seconds: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clock_tick_seconds: default_clock_tick(),
        }
    }
}

fn default_clock_tick() -> u64 {
    5
}

impl Config {
    /// Load config from a file if one exists, otherwise build one from the
    /// OPENWEATHER_API_KEY environment variable.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => match Self::find_config_path() {
                Some(p) => p,
                None => return Self::from_env(),
            },
        };

        if !config_path.exists() {
            return Err(SkycastError::Config(format!(
                "Config file not found at {:?}",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| SkycastError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| SkycastError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENWEATHER_API_KEY").map_err(|_| {
            SkycastError::Config(
                "No config file found and OPENWEATHER_API_KEY is not set. \
                 Set the variable or create config/config.yaml."
                    .to_string(),
            )
        })?;

        let config = Config {
            openweathermap: OpenWeatherMapConfig { api_key },
            location: LocationConfig::default(),
            display: DisplayConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.openweathermap.api_key.trim().is_empty() {
            return Err(SkycastError::Config(
                "OpenWeatherMap API key is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Search for config.yaml in standard locations.
    fn find_config_path() -> Option<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("skycast").join("config.yaml");
            if xdg_config.exists() {
                return Some(xdg_config);
            }
        }

        None
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn default_coordinates(&self) -> crate::models::Coordinates {
        crate::models::Coordinates::new(
            self.location.default_latitude,
            self.location.default_longitude,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let yaml = "openweathermap:\n  api_key: abc123\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.openweathermap.api_key, "abc123");
        assert_eq!(config.location.default_latitude, DEFAULT_LATITUDE);
        assert_eq!(config.location.default_longitude, DEFAULT_LONGITUDE);
        assert!(config.location.geolocate);
        assert_eq!(config.display.clock_tick_seconds, 5);
    }

    #[test]
    fn parse_full_config() {
        let yaml = "\
openweathermap:
  api_key: abc123
location:
  default_latitude: 51.5074
  default_longitude: -0.1278
  geolocate: false
display:
  clock_tick_seconds: 10
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.location.default_latitude, 51.5074);
        assert!(!config.location.geolocate);
        assert_eq!(config.display.clock_tick_seconds, 10);
    }

    #[test]
    fn substitute_env_vars_replaces_known_vars() {
        std::env::set_var("SKYCAST_TEST_KEY", "from-env");
        let input = "api_key: ${SKYCAST_TEST_KEY}\nother: ${SKYCAST_UNSET_VAR}";
        let output = Config::substitute_env_vars(input);

        assert!(output.contains("api_key: from-env"));
        // Unknown variables stay as-is
        assert!(output.contains("${SKYCAST_UNSET_VAR}"));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let config = Config {
            openweathermap: OpenWeatherMapConfig {
                api_key: "  ".to_string(),
            },
            location: LocationConfig::default(),
            display: DisplayConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn redacted_debug_output() {
        let config = OpenWeatherMapConfig {
            api_key: "secret".to_string(),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("REDACTED"));
    }
}
