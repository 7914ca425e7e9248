use anyhow::Context;
use chrono::FixedOffset;
use serde::Deserialize;

/// Single override for the backend base URL.
pub const BASE_URL_ENV: &str = "POWER_API_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: u64,
    pub history_limit: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplaySettings {
    pub utc_offset_hours: i32,
}

impl DisplaySettings {
    pub fn offset(&self) -> anyhow::Result<FixedOffset> {
        self.utc_offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("invalid display.utc_offset_hours: {}", self.utc_offset_hours))
    }
}

/// Defaults, then `config/dashboard.toml` if present, then `DASHBOARD__*`
/// variables, then `POWER_API_URL`.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let base_url_override = std::env::var(BASE_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty());

    build_config(
        config::File::with_name("config/dashboard").required(false),
        base_url_override,
    )
}

fn build_config<S>(file: S, base_url_override: Option<String>) -> anyhow::Result<DashboardConfig>
where
    S: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080_i64)?
        .set_default("backend.base_url", DEFAULT_BASE_URL)?
        .set_default("backend.timeout_secs", 30_i64)?
        .set_default("backend.history_limit", 100_i64)?
        .set_default("display.utc_offset_hours", -3_i64)?
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("DASHBOARD")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("backend.base_url", base_url_override)?
        .build()?;

    let config: DashboardConfig = settings.try_deserialize()?;
    config.display.offset()?;
    Ok(config)
}
