use log::LevelFilter;

/// Key under which the session token lives in local storage.
pub const TOKEN_STORAGE_KEY: &str = "token";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Prefix for relative API paths. `None` means same origin.
    pub api_base_url: Option<String>,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Reads the build-time environment. `DAILY_MANAGER_API_URL` points the
    /// frontend at a separately hosted API, `DAILY_MANAGER_LOG` sets the
    /// console log level.
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("DAILY_MANAGER_API_URL"),
            option_env!("DAILY_MANAGER_LOG"),
        )
    }

    pub fn from_values(api_url: Option<&str>, log_level: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .map(|url| url.to_string());

        let log_level = log_level
            .and_then(|level| level.trim().parse::<LevelFilter>().ok())
            .unwrap_or(DEFAULT_LOG_LEVEL);

        AppConfig {
            api_base_url,
            log_level,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}
