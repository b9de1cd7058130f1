use crate::{
    period::ReportPeriod,
    stats::{DEFAULT_DAILY_WINDOW, MAX_DAILY_WINDOW},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Dashboard reporting settings.
///
/// Every key is optional in the file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportConfig {
    /// Length of the daily revenue trend series. Capped at `MAX_DAILY_WINDOW`.
    pub daily_window_days: usize,
    /// Period used when the caller does not pick one.
    pub default_period: ReportPeriod,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            daily_window_days: DEFAULT_DAILY_WINDOW,
            default_period: ReportPeriod::Month,
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file.
    /// In tests, use ReportConfig::default().
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: ReportConfig = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid report config {}: {e}", path.display()))?;
        if config.daily_window_days > MAX_DAILY_WINDOW {
            log::warn!(
                "dailyWindowDays {} in {} exceeds {MAX_DAILY_WINDOW}, capping",
                config.daily_window_days,
                path.display()
            );
        }
        log::debug!("Loaded report config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// The daily series length to render, never above `MAX_DAILY_WINDOW`.
    pub fn daily_window(&self) -> usize {
        self.daily_window_days.min(MAX_DAILY_WINDOW)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let config: ReportConfig = serde_json::from_str(r#"{ "defaultPeriod": "week" }"#).unwrap();
        assert_eq!(config.default_period, ReportPeriod::Week);
        assert_eq!(config.daily_window_days, DEFAULT_DAILY_WINDOW);
    }

    #[test]
    fn oversized_window_is_capped() {
        let config: ReportConfig =
            serde_json::from_str(r#"{ "dailyWindowDays": 18446744073709551615 }"#).unwrap();
        assert_eq!(config.daily_window(), MAX_DAILY_WINDOW);
        assert_eq!(ReportConfig::default().daily_window(), DEFAULT_DAILY_WINDOW);
    }
}
