// Module de lecture de configuration de la simulation (TOML)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{AppError, Result};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Niveau de log par défaut quand RUST_LOG n'est pas défini
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Nombre maximal de passes de mise à jour par phase ; illimité si absent
    #[serde(default)]
    pub max_rounds: Option<u64>,
    /// Fichier JSON où écrire les tables de routage finales de chaque phase
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            log_level: default_log_level(),
            max_rounds: None,
            summary_json: None,
        }
    }
}

impl SimulationConfig {
    fn validate(self) -> Result<Self> {
        if self.max_rounds == Some(0) {
            return Err(AppError::ConfigError("max_rounds must be at least 1".to_string()));
        }
        Ok(self)
    }

    /// Les options de la ligne de commande remplacent celles du fichier
    pub fn with_overrides(
        mut self,
        max_rounds: Option<u64>,
        summary_json: Option<PathBuf>,
        log_level: Option<String>,
    ) -> Result<Self> {
        if max_rounds.is_some() {
            self.max_rounds = max_rounds;
        }
        if summary_json.is_some() {
            self.summary_json = summary_json;
        }
        if let Some(level) = log_level {
            self.log_level = level;
        }
        self.validate()
    }
}

pub fn parse_simulation_config(content: &str) -> Result<SimulationConfig> {
    let config: SimulationConfig = toml::from_str(content)
        .map_err(|e| AppError::ConfigError(format!("Failed to parse config: {}", e)))?;
    config.validate()
}

/// Lit la configuration depuis un fichier TOML
pub fn read_simulation_config<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
    let config_path = path.as_ref();
    if !config_path.exists() {
        return Err(AppError::ConfigError(format!(
            "Config file not found: {}",
            config_path.display()
        )));
    }

    let config_content = fs::read_to_string(config_path)
        .map_err(|e| AppError::ConfigError(format!("Failed to read config file {}: {}", config_path.display(), e)))?;

    let config = parse_simulation_config(&config_content)?;
    log::debug!("Config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        assert_eq!(parse_simulation_config("").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn test_full_config() {
        let config = parse_simulation_config(
            "log_level = \"debug\"\nmax_rounds = 50\nsummary_json = \"out/summary.json\"\n",
        ).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.max_rounds, Some(50));
        assert_eq!(config.summary_json, Some(PathBuf::from("out/summary.json")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            parse_simulation_config("max_round = 3\n"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_zero_rounds_rejected() {
        assert!(parse_simulation_config("max_rounds = 0\n").is_err());
        assert!(SimulationConfig::default().with_overrides(Some(0), None, None).is_err());
    }

    #[test]
    fn test_overrides_win() {
        let config = parse_simulation_config("max_rounds = 5\nlog_level = \"warn\"\n")
            .unwrap()
            .with_overrides(Some(9), None, Some("trace".to_string()))
            .unwrap();
        assert_eq!(config.max_rounds, Some(9));
        assert_eq!(config.log_level, "trace");
        assert_eq!(config.summary_json, None);
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_simulation_config("/nonexistent/dv.toml"),
            Err(AppError::ConfigError(_))
        ));
    }
}
