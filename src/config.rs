use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub sampling: SamplingSettings,
    #[serde(default)]
    pub builder: BuilderSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub trends: TrendsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "data/games_processed.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplingSettings {
    #[serde(default = "default_scatter_max_points")]
    pub scatter_max_points: usize,
    #[serde(default = "default_background_max_points")]
    pub background_max_points: usize,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        Self {
            scatter_max_points: default_scatter_max_points(),
            background_max_points: default_background_max_points(),
        }
    }
}

fn default_scatter_max_points() -> usize {
    15_000
}
fn default_background_max_points() -> usize {
    2_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuilderSettings {
    #[serde(default = "default_weight_tolerance")]
    pub weight_tolerance: f64,
    #[serde(default = "default_playtime_tolerance")]
    pub playtime_tolerance_min: u32,
    #[serde(default = "default_min_matches")]
    pub min_matches: usize,
}

impl Default for BuilderSettings {
    fn default() -> Self {
        Self {
            weight_tolerance: default_weight_tolerance(),
            playtime_tolerance_min: default_playtime_tolerance(),
            min_matches: default_min_matches(),
        }
    }
}

fn default_weight_tolerance() -> f64 {
    0.5
}
fn default_playtime_tolerance() -> u32 {
    30
}
fn default_min_matches() -> usize {
    5
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_weight_weight")]
    pub weight: f64,
    #[serde(default = "default_playtime_weight")]
    pub playtime: f64,
    #[serde(default = "default_mechanic_weight")]
    pub mechanic: f64,
    #[serde(default = "default_year_weight")]
    pub year: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            weight: default_weight_weight(),
            playtime: default_playtime_weight(),
            mechanic: default_mechanic_weight(),
            year: default_year_weight(),
        }
    }
}

fn default_weight_weight() -> f64 {
    40.0
}
fn default_playtime_weight() -> f64 {
    20.0
}
fn default_mechanic_weight() -> f64 {
    25.0
}
fn default_year_weight() -> f64 {
    15.0
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendsSettings {
    #[serde(default = "default_tracked_mechanics")]
    pub mechanics: Vec<String>,
}

impl Default for TrendsSettings {
    fn default() -> Self {
        Self {
            mechanics: default_tracked_mechanics(),
        }
    }
}

fn default_tracked_mechanics() -> Vec<String> {
    [
        "Dice Rolling",
        "Hand Management",
        "Cooperative Game",
        "Deck, Bag, and Pool Building",
        "Area Majority / Influence",
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with TABLETOP_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with TABLETOP_)
            // e.g., TABLETOP_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TABLETOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TABLETOP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the bare DATASET_PATH override used by the container entrypoint,
/// which predates the prefixed variable scheme.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("DATASET_PATH") {
        builder = builder.set_override("dataset.path", path)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.weight, 40.0);
        assert_eq!(weights.playtime, 20.0);
        assert_eq!(weights.mechanic, 25.0);
        assert_eq!(weights.year, 15.0);
    }

    #[test]
    fn test_default_builder_settings() {
        let builder = BuilderSettings::default();
        assert_eq!(builder.weight_tolerance, 0.5);
        assert_eq!(builder.playtime_tolerance_min, 30);
        assert_eq!(builder.min_matches, 5);
    }

    #[test]
    fn test_default_sampling_budgets() {
        let sampling = SamplingSettings::default();
        assert_eq!(sampling.scatter_max_points, 15_000);
        assert_eq!(sampling.background_max_points, 2_000);
    }

    #[test]
    fn test_default_tracked_mechanics() {
        let trends = TrendsSettings::default();
        assert_eq!(trends.mechanics.len(), 5);
        assert!(trends.mechanics.contains(&"Dice Rolling".to_string()));
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
