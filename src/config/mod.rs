use std::path::PathBuf;
use std::time::Duration;

pub mod loader;
pub mod validator;

pub use loader::{
    load_config, load_config_file, resolve_config, API_URL_ENV, CONFIG_ENV, DEFAULT_CONFIG_PATH,
};
pub use validator::validate_config;

/// Page sizes the dashboard lets the user pick from.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 25, 50, 100];

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub default_page_size: u32,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct UiConfig {
    pub search_debounce: Duration,
    pub tick_rate: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub pagination: PaginationConfig,
    pub exports: ExportConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn builtin() -> Self {
        Config {
            api: ApiConfig {
                base_url: "http://localhost:5000".to_string(),
                timeout: Duration::from_secs(30),
            },
            pagination: PaginationConfig {
                default_page_size: PAGE_SIZE_OPTIONS[0],
            },
            exports: ExportConfig {
                download_dir: PathBuf::from("downloads"),
            },
            ui: UiConfig {
                search_debounce: Duration::from_millis(300),
                tick_rate: Duration::from_millis(100),
            },
            logging: LoggingConfig {
                file: PathBuf::from("ledger-dash.log"),
                level: "info".to_string(),
            },
        }
    }

    /// Base URL without a trailing slash so endpoint paths can be appended verbatim.
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::builtin()
    }
}
