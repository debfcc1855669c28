use crate::error::{AppError, Result};

use super::{Config, PAGE_SIZE_OPTIONS};

/// Check every setting and report all problems at once.
pub fn validate_config(config: &Config) -> Result<()> {
    let mut issues = Vec::new();

    validate_base_url(&config.api.base_url, &mut issues);

    if config.api.timeout.is_zero() {
        issues.push("api.timeout_secs must be greater than zero".to_string());
    }

    if !PAGE_SIZE_OPTIONS.contains(&config.pagination.default_page_size) {
        issues.push(format!(
            "pagination.default_page_size must be one of {:?}, found {}",
            PAGE_SIZE_OPTIONS, config.pagination.default_page_size
        ));
    }

    if config.exports.download_dir.as_os_str().is_empty() {
        issues.push("exports.download_dir must not be empty".to_string());
    }

    if config.ui.search_debounce.is_zero() {
        issues.push("ui.search_debounce_ms must be greater than zero".to_string());
    }

    if config.ui.tick_rate.is_zero() {
        issues.push("ui.tick_rate_ms must be greater than zero".to_string());
    }

    if config.logging.level.trim().parse::<log::LevelFilter>().is_err() {
        issues.push(format!(
            "logging.level must be one of off, error, warn, info, debug, trace; found `{}`",
            config.logging.level
        ));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "Invalid configuration:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_base_url(base_url: &str, issues: &mut Vec<String>) {
    if base_url.trim().is_empty() {
        issues.push("api.base_url must not be empty".to_string());
        return;
    }

    match reqwest::Url::parse(base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            if url.query().is_some() {
                issues.push("api.base_url must not carry a query string".to_string());
            }
        }
        Ok(url) => issues.push(format!(
            "api.base_url must use http or https, found `{}`",
            url.scheme()
        )),
        Err(err) => issues.push(format!("api.base_url `{base_url}` is not a valid URL: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn accepts_builtin_config() {
        validate_config(&Config::builtin()).expect("builtin config should be valid");
    }

    #[test]
    fn rejects_unknown_page_size() {
        let mut config = Config::builtin();
        config.pagination.default_page_size = 30;

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(
            err.to_string().contains("default_page_size"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = Config::builtin();
        config.api.base_url = "ftp://files.example.com".to_string();

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(err.to_string().contains("http or https"), "unexpected: {err}");
    }

    #[test]
    fn reports_every_issue_together() {
        let mut config = Config::builtin();
        config.api.base_url = "not a url".to_string();
        config.api.timeout = Duration::ZERO;
        config.ui.tick_rate = Duration::ZERO;

        let message = validate_config(&config)
            .expect_err("validation should fail")
            .to_string();
        assert!(message.contains("not a valid URL"), "{message}");
        assert!(message.contains("timeout_secs"), "{message}");
        assert!(message.contains("tick_rate_ms"), "{message}");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = Config::builtin();
        config.logging.level = "verbose".to_string();

        let err = validate_config(&config).expect_err("validation should fail");
        assert!(err.to_string().contains("logging.level"), "unexpected: {err}");
    }
}
