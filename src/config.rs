use crate::core::data::Persona;
use crate::utils::error::{AppError, AppResult};
use crate::utils::search::SortField;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    #[serde(default)]
    pub latency: LatencyConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub default_persona: Persona,
    /// Directory holding replacement dataset files; bundled data when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub page_size: usize,
    pub color: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
}

/// Simulated response delay per operation, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub enabled: bool,
    pub dashboard_ms: u64,
    pub inventory_ms: u64,
    pub tool_ms: u64,
    pub recommendations_ms: u64,
    pub playbook_ms: u64,
    pub export_ms: u64,
    pub benchmarks_ms: u64,
    pub add_tool_ms: u64,
    pub update_tool_ms: u64,
    pub delete_tool_ms: u64,
    pub test_integration_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed seed for reproducible trends, ids and integration outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub integration_success_rate: f64,
}

/// Operations that carry an artificial delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Dashboard,
    Inventory,
    Tool,
    Recommendations,
    Playbook,
    Export,
    Benchmarks,
    AddTool,
    UpdateTool,
    DeleteTool,
    TestIntegration,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_persona: Persona::Enterprise,
            data_dir: None,
            page_size: 10,
            color: true,
            sort_by: None,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dashboard_ms: 300,
            inventory_ms: 200,
            tool_ms: 100,
            recommendations_ms: 200,
            playbook_ms: 500,
            export_ms: 1000,
            benchmarks_ms: 200,
            add_tool_ms: 500,
            update_tool_ms: 300,
            delete_tool_ms: 300,
            test_integration_ms: 1000,
        }
    }
}

impl LatencyConfig {
    /// No delay anywhere
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn delay_for(&self, operation: Operation) -> Duration {
        if !self.enabled {
            return Duration::ZERO;
        }
        let ms = match operation {
            Operation::Dashboard => self.dashboard_ms,
            Operation::Inventory => self.inventory_ms,
            Operation::Tool => self.tool_ms,
            Operation::Recommendations => self.recommendations_ms,
            Operation::Playbook => self.playbook_ms,
            Operation::Export => self.export_ms,
            Operation::Benchmarks => self.benchmarks_ms,
            Operation::AddTool => self.add_tool_ms,
            Operation::UpdateTool => self.update_tool_ms,
            Operation::DeleteTool => self.delete_tool_ms,
            Operation::TestIntegration => self.test_integration_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            integration_success_rate: 0.8,
        }
    }
}

impl Config {
    /// Load from `config_path`, writing defaults there first when it is missing
    pub fn load_custom(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            let default_config = Config::default();
            default_config.save_to(config_path)?;
            return Ok(default_config);
        }

        let content = std::fs::read_to_string(config_path)?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.general.page_size == 0 {
            return Err(AppError::Config(
                "Page size must be greater than zero".to_string(),
            ));
        }

        let rate = self.simulation.integration_success_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(AppError::Config(format!(
                "Integration success rate must be between 0 and 1, got {}",
                rate
            )));
        }

        if let Some(dir) = &self.general.data_dir {
            if !dir.is_dir() {
                return Err(AppError::Config(format!(
                    "Data directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> AppResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))
    }

    pub fn config_file_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tooldebt")
            .join("config.toml")
    }
}
