use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{debug, info};
use serde::Deserialize;

use crate::error::{AppError, Context, Result};

use super::{validator, Config};

/// Environment variable pointing at an alternative JSON config file.
pub const CONFIG_ENV: &str = "LEDGER_DASH_CONFIG";
/// Environment variable overriding `api.base_url` after the file is loaded.
pub const API_URL_ENV: &str = "LEDGER_DASH_API_URL";
/// Config file consulted when `LEDGER_DASH_CONFIG` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.json";

/// Resolve the effective configuration: file (if any), then environment overrides, then validation.
pub fn load_config() -> Result<Config> {
    let file = match std::env::var(CONFIG_ENV) {
        Ok(path) => Some(PathBuf::from(path)),
        Err(_) => {
            let default = Path::new(DEFAULT_CONFIG_PATH);
            default.exists().then(|| default.to_path_buf())
        }
    };
    let api_url = std::env::var(API_URL_ENV).ok();
    resolve_config(file.as_deref(), api_url.as_deref())
}

/// Build a config from an optional file and an optional base URL override, validating once at the end.
pub fn resolve_config(file: Option<&Path>, api_url: Option<&str>) -> Result<Config> {
    let api_url = api_url.map(str::trim).filter(|url| !url.is_empty());

    let mut config = match file {
        Some(path) => read_config_file(path, api_url.is_some())?,
        None => {
            debug!("No config file found, using built-in defaults");
            Config::builtin()
        }
    };

    if let Some(url) = api_url {
        info!("API base URL overridden from {}", API_URL_ENV);
        config.api.base_url = url.to_string();
    }

    validator::validate_config(&config)?;
    Ok(config)
}

/// Read and validate a JSON config file; absent keys fall back to the built-in defaults.
pub fn load_config_file(path: &Path) -> Result<Config> {
    let config = read_config_file(path, false)?;
    validator::validate_config(&config)?;
    Ok(config)
}

/// Parse a config file without validating it. When `skip_base_url` is set the file's
/// `api.base_url` is neither expanded nor kept.
fn read_config_file(path: &Path, skip_base_url: bool) -> Result<Config> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read config JSON at {}", path.display()))?;

    let mut raw: RawConfig = serde_json::from_str(&json)
        .with_context(|| format!("failed to parse config JSON at {}", path.display()))?;
    if skip_base_url {
        raw.api.base_url = None;
    }
    raw.into_config()
}

/// Replace `${NAME}` placeholders with the value of the named environment variable.
pub fn expand_env_vars(value: &str) -> Result<String> {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut name = String::new();
            let mut closed = false;
            while let Some(&next) = chars.peek() {
                chars.next();
                if next == '}' {
                    closed = true;
                    break;
                }
                name.push(next);
            }

            if !closed {
                return Err(AppError::message(format!(
                    "Unterminated environment placeholder in `{value}`"
                )));
            }

            if name.is_empty() {
                return Err(AppError::message(format!(
                    "Empty environment placeholder in `{value}`"
                )));
            }

            let resolved = std::env::var(&name).with_context(|| {
                format!("Environment variable {name} referenced by the config is not set")
            })?;
            result.push_str(&resolved);
        } else {
            result.push(ch);
        }
    }

    Ok(result)
}

#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    api: RawApi,
    #[serde(default)]
    pagination: RawPagination,
    #[serde(default)]
    exports: RawExports,
    #[serde(default)]
    ui: RawUi,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Debug, Deserialize, Default)]
struct RawApi {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct RawPagination {
    default_page_size: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct RawExports {
    download_dir: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct RawUi {
    search_debounce_ms: Option<u64>,
    tick_rate_ms: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct RawLogging {
    file: Option<String>,
    level: Option<String>,
}

impl RawConfig {
    fn into_config(self) -> Result<Config> {
        let mut config = Config::builtin();

        if let Some(url) = self.api.base_url {
            config.api.base_url = expand_env_vars(url.trim())?;
        }
        if let Some(secs) = self.api.timeout_secs {
            config.api.timeout = Duration::from_secs(secs);
        }
        if let Some(size) = self.pagination.default_page_size {
            config.pagination.default_page_size = size;
        }
        if let Some(dir) = self.exports.download_dir {
            config.exports.download_dir = PathBuf::from(expand_env_vars(&dir)?);
        }
        if let Some(ms) = self.ui.search_debounce_ms {
            config.ui.search_debounce = Duration::from_millis(ms);
        }
        if let Some(ms) = self.ui.tick_rate_ms {
            config.ui.tick_rate = Duration::from_millis(ms);
        }
        if let Some(file) = self.logging.file {
            config.logging.file = PathBuf::from(expand_env_vars(&file)?);
        }
        if let Some(level) = self.logging.level {
            config.logging.level = level;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn repo_config_path() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join(DEFAULT_CONFIG_PATH)
    }

    #[test]
    fn loads_repository_config() {
        let config = load_config_file(&repo_config_path()).expect("assets config loads");
        assert!(config.api.base_url.starts_with("http"));
        assert_eq!(config.pagination.default_page_size, 10);
        assert_eq!(config.ui.search_debounce, Duration::from_millis(300));
    }

    #[test]
    fn missing_sections_fall_back_to_builtin() {
        let raw: RawConfig =
            serde_json::from_str(r#"{ "api": { "base_url": "https://api.example.com/" } }"#)
                .expect("parse");
        let config = raw.into_config().expect("convert");
        let builtin = Config::builtin();

        assert_eq!(config.api_base(), "https://api.example.com");
        assert_eq!(config.api.timeout, builtin.api.timeout);
        assert_eq!(config.exports.download_dir, builtin.exports.download_dir);
    }

    fn write_config(dir: &TempDir, json: &str) -> PathBuf {
        let path = dir.path().join("config.json");
        fs::write(&path, json).expect("write config");
        path
    }

    #[test]
    fn url_override_replaces_invalid_file_url() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(&dir, r#"{ "api": { "base_url": "ftp://old.example" } }"#);

        let err = resolve_config(Some(&path), None).expect_err("file url alone is invalid");
        assert!(err.to_string().contains("http or https"), "unexpected: {err}");

        let config =
            resolve_config(Some(&path), Some(" http://good.example/ ")).expect("override wins");
        assert_eq!(config.api_base(), "http://good.example");
    }

    #[test]
    fn url_override_skips_unresolvable_placeholder() {
        let dir = TempDir::new().expect("temp dir");
        let path = write_config(
            &dir,
            r#"{ "api": { "base_url": "http://${LEDGER_DASH_TEST_NEVER_SET}" }, "pagination": { "default_page_size": 25 } }"#,
        );

        let config =
            resolve_config(Some(&path), Some("https://api.example.com")).expect("override wins");
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.pagination.default_page_size, 25);
    }

    #[test]
    fn blank_override_is_ignored() {
        let config = resolve_config(None, Some("   ")).expect("builtin config");
        assert_eq!(config.api.base_url, Config::builtin().api.base_url);
    }

    #[test]
    fn expands_environment_placeholders() {
        std::env::set_var("LEDGER_DASH_TEST_HOST", "api.internal:8080");
        let expanded =
            expand_env_vars("http://${LEDGER_DASH_TEST_HOST}/v1").expect("placeholder expands");
        assert_eq!(expanded, "http://api.internal:8080/v1");
    }

    #[test]
    fn rejects_unterminated_placeholder() {
        let err = expand_env_vars("http://${HOST").expect_err("should fail");
        assert!(err.to_string().contains("Unterminated"), "unexpected: {err}");
    }

    #[test]
    fn rejects_unset_variable() {
        let err = expand_env_vars("${LEDGER_DASH_TEST_DEFINITELY_UNSET}").expect_err("should fail");
        assert!(err.to_string().contains("not set"), "unexpected: {err}");
    }
}
