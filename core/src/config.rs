use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastConfig {
    /// Horizon for the goal searches run while committing an update.
    #[serde(default = "default_goal_limit_years")]
    pub goal_limit_years:    u32,
    /// Log a transaction record on both rows of every handled event.
    #[serde(default = "default_record_transactions")]
    pub record_transactions: bool,
}

fn default_goal_limit_years() -> u32 { 150 }
fn default_record_transactions() -> bool { true }

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            goal_limit_years:    default_goal_limit_years(),
            record_transactions: default_record_transactions(),
        }
    }
}

impl ForecastConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    /// In tests, use ForecastConfig::default_test().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ForecastConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;
        Ok(config)
    }

    pub fn default_test() -> Self {
        Self::default()
    }
}
