use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::diagnosis::AreaWeights;
use crate::error::{DiagnosticsError, Result};
use crate::simulation::{Channel, SimulationTables};
use crate::strategy::PriorityCutoffs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceMode {
    Mock,
    Http,
}

impl DataSourceMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "mock" => Some(DataSourceMode::Mock),
            "http" | "api" | "real" => Some(DataSourceMode::Http),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSourceConfig {
    pub mode: DataSourceMode,
    pub endpoint: String,
    pub timeout_ms: u64,
    pub seed: Option<u64>,
}

impl Default for DataSourceConfig {
    fn default() -> Self {
        Self {
            mode: DataSourceMode::Mock,
            endpoint: "http://localhost:8000".to_string(),
            timeout_ms: 5000,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsConfig {
    pub simulation: SimulationTables,
    pub diagnosis: AreaWeights,
    pub strategy: PriorityCutoffs,
    pub data_source: DataSourceConfig,
}

impl DiagnosticsConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>)> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents = std::fs::read_to_string(path).map_err(|err| {
                    DiagnosticsError::Config(format!("failed to read {}: {}", path.display(), err))
                })?;
                info!(path = %path.display(), "loaded diagnostics config");
                Self::from_toml(&contents)?
            }
            _ => {
                debug!("no config file found, using defaults");
                DiagnosticsConfig::default()
            }
        };

        config.apply_overrides(|key| env::var(key).ok());
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|err| DiagnosticsError::Config(format!("failed to parse config: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects tables the simulator and scorers cannot produce sane numbers from.
    pub fn validate(&self) -> Result<()> {
        for channel in Channel::ALL {
            let rates = self.simulation.channels.get(channel);
            let prefix = format!("simulation.channels.{}", channel.label());
            check_percent(&prefix, "ctr", rates.ctr)?;
            check_percent(&prefix, "cvr", rates.cvr)?;
            check_positive(&prefix, "cpc", rates.cpc)?;
            check_non_negative(&prefix, "avg_order_value", rates.avg_order_value)?;
        }

        let strategies = &self.simulation.strategies;
        for (name, multiplier) in [
            ("awareness", &strategies.awareness),
            ("consideration", &strategies.consideration),
            ("conversion", &strategies.conversion),
            ("retention", &strategies.retention),
        ] {
            let prefix = format!("simulation.strategies.{}", name);
            check_non_negative(&prefix, "ctr", multiplier.ctr)?;
            check_non_negative(&prefix, "cvr", multiplier.cvr)?;
        }

        let weights = &self.diagnosis;
        let area_weights = [
            ("seo", weights.seo),
            ("aeo", weights.aeo),
            ("engagement", weights.engagement),
            ("retargeting", weights.retargeting),
            ("pricing", weights.pricing),
            ("reviews", weights.reviews),
            ("social", weights.social),
            ("messaging", weights.messaging),
        ];
        for (name, weight) in area_weights {
            check_non_negative("diagnosis", name, weight)?;
        }
        if area_weights.iter().map(|(_, weight)| weight).sum::<f64>() <= 0.0 {
            return Err(DiagnosticsError::Config(
                "diagnosis weights must not all be zero".to_string(),
            ));
        }

        let cutoffs = &self.strategy;
        if cutoffs.critical_below > cutoffs.high_below
            || cutoffs.high_below > cutoffs.medium_below
            || cutoffs.medium_below > 100
        {
            return Err(DiagnosticsError::Config(format!(
                "strategy cutoffs must satisfy critical_below <= high_below <= medium_below <= 100 \
                 (got {}, {}, {})",
                cutoffs.critical_below, cutoffs.high_below, cutoffs.medium_below
            )));
        }

        if self.data_source.timeout_ms == 0 {
            return Err(DiagnosticsError::Config(
                "data_source.timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let payload = toml::to_string_pretty(self).map_err(|err| {
            DiagnosticsError::Config(format!("failed to serialize config: {}", err))
        })?;
        std::fs::write(path, payload)?;
        Ok(())
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup("DATA_SOURCE_MODE").and_then(|value| DataSourceMode::parse(&value))
        {
            self.data_source.mode = mode;
        }
        if let Some(endpoint) = lookup("NEXT_PUBLIC_API_URL") {
            if !endpoint.trim().is_empty() {
                self.data_source.endpoint = endpoint.trim().to_string();
            }
        }
        if let Some(timeout) = lookup("DATA_SOURCE_TIMEOUT_MS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.data_source.timeout_ms = value;
            }
        }
        if let Some(seed) = lookup("MOCK_SEED") {
            if let Ok(value) = seed.parse::<u64>() {
                self.data_source.seed = Some(value);
            }
        }
    }
}

fn check_non_negative(section: &str, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DiagnosticsError::Config(format!(
            "{}.{} must be a non-negative number (got {})",
            section, field, value
        )));
    }
    Ok(())
}

fn check_positive(section: &str, field: &str, value: f64) -> Result<()> {
    check_non_negative(section, field, value)?;
    if value == 0.0 {
        return Err(DiagnosticsError::Config(format!(
            "{}.{} must be greater than zero",
            section, field
        )));
    }
    Ok(())
}

fn check_percent(section: &str, field: &str, value: f64) -> Result<()> {
    check_non_negative(section, field, value)?;
    if value > 100.0 {
        return Err(DiagnosticsError::Config(format!(
            "{}.{} is a percentage and must not exceed 100 (got {})",
            section, field, value
        )));
    }
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    env::var("DIAGNOSTICS_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/diagnostics.toml")))
}
