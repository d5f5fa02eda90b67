use crate::domain::aggregation::Granularity;
use crate::domain::dashboard::{DashboardSettings, DEFAULT_DAYLIGHT_HOURS};
use crate::domain::kpi::KpiFactors;
use serde::Deserialize;

const ENV_PREFIX: &str = "SOLAR";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
    pub dataset: DatasetSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatasetSettings {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub kpi: KpiFactors,
    #[serde(default)]
    pub charts: ChartSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartSettings {
    #[serde(default)]
    pub default_granularity: Granularity,
    #[serde(default = "default_daylight_hours")]
    pub daylight_hours: f64,
    #[serde(default = "default_stream_capacity")]
    pub stream_channel_capacity: usize,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            default_granularity: Granularity::default(),
            daylight_hours: DEFAULT_DAYLIGHT_HOURS,
            stream_channel_capacity: default_stream_capacity(),
        }
    }
}

impl DashboardConfig {
    pub fn settings(&self) -> DashboardSettings {
        DashboardSettings {
            kpi: self.kpi,
            daylight_hours: self.charts.daylight_hours,
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_daylight_hours() -> f64 {
    DEFAULT_DAYLIGHT_HOURS
}

fn default_stream_capacity() -> usize {
    100
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server"))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator(ENV_SEPARATOR))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_config_defaults() {
        let config: DashboardConfig = toml::from_str("").unwrap();
        let settings = config.settings();

        assert_eq!(settings.kpi.co2_tonnes_per_mwh, 0.2);
        assert_eq!(settings.kpi.household_mwh_per_year, 3.3);
        assert_eq!(settings.daylight_hours, 8.0);
        assert_eq!(config.charts.default_granularity, Granularity::Native);
        assert_eq!(config.charts.stream_channel_capacity, 100);
    }

    #[test]
    fn test_dashboard_config_overrides() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [kpi]
            co2_tonnes_per_mwh = 0.35

            [charts]
            default_granularity = "1h"
            daylight_hours = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.kpi.co2_tonnes_per_mwh, 0.35);
        assert_eq!(config.kpi.household_mwh_per_year, 3.3);
        assert_eq!(config.charts.default_granularity, Granularity::Hourly);
        assert_eq!(config.settings().daylight_hours, 10.0);
    }

    #[test]
    fn test_server_config() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [dataset]
            path = "data/farms.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.dataset.path, "data/farms.json");
    }
}
