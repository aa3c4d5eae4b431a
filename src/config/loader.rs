//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! settings from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, FrequencySettings, SolverSettings};

/// Loads and provides access to engine configuration.
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/engine.yaml")?;
/// println!("Solver tolerance: {}", loader.solver().tolerance);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] if the file cannot be read and
    /// [`EngineError::ConfigParseError`] if it is not valid YAML or holds
    /// values the engine cannot use (a non-positive tolerance, zero
    /// iterations, non-positive working time).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: EngineConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        Self::validate(&config).map_err(|message| EngineError::ConfigParseError {
            path: path_str,
            message,
        })?;

        Ok(Self { config })
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    fn validate(config: &EngineConfig) -> Result<(), String> {
        if config.solver.tolerance <= Decimal::ZERO {
            return Err("solver.tolerance must be positive".to_string());
        }
        if config.solver.max_iterations == 0 {
            return Err("solver.max_iterations must be at least 1".to_string());
        }
        if config.frequency.hours_per_week <= Decimal::ZERO {
            return Err("frequency.hours_per_week must be positive".to_string());
        }
        if config.frequency.working_days_per_year <= Decimal::ZERO {
            return Err("frequency.working_days_per_year must be positive".to_string());
        }
        Ok(())
    }

    /// Returns the full configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the net-to-gross solver settings.
    pub fn solver(&self) -> SolverSettings {
        self.config.solver
    }

    /// Returns the frequency converter settings.
    pub fn frequency(&self) -> FrequencySettings {
        self.config.frequency
    }
}
