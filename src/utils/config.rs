use std::env;
use std::path::PathBuf;

pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";
pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_UNIT_LABEL: &str = "шт.";

/// Filter directive for the log subscriber, chosen before `Config` is loaded
/// so config loading itself is logged.
pub fn log_directive(verbose: bool, log_level: Option<&str>) -> String {
    if verbose {
        return "debug".to_string();
    }
    match log_level.map(str::trim) {
        Some(level) if !level.is_empty() => level.to_string(),
        _ => "info".to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub currency: String,
    pub unit_label: String,
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            currency: DEFAULT_CURRENCY.to_string(),
            unit_label: DEFAULT_UNIT_LABEL.to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let config = Config {
            catalog_path: env::var("BASKET_CATALOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_CATALOG_PATH)),
            currency: env::var("BASKET_CURRENCY")
                .unwrap_or_else(|_| DEFAULT_CURRENCY.to_string()),
            unit_label: env::var("BASKET_UNIT_LABEL")
                .unwrap_or_else(|_| DEFAULT_UNIT_LABEL.to_string()),
            environment: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string()),
        };

        tracing::debug!("Config: loaded for {} environment", config.environment);
        config.validate()?;
        Ok(config)
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = path.into();
        self
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.catalog_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("BASKET_CATALOG must not be empty"));
        }

        if self.currency.trim().is_empty() {
            return Err(anyhow::anyhow!("BASKET_CURRENCY must not be empty"));
        }

        if self.unit_label.trim().is_empty() {
            return Err(anyhow::anyhow!("BASKET_UNIT_LABEL must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.currency, "$");
        assert_eq!(config.unit_label, "шт.");
    }

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(true, Some("warn")), "debug");
        assert_eq!(log_directive(false, Some("warn")), "warn");
        assert_eq!(log_directive(false, Some("  ")), "info");
        assert_eq!(log_directive(false, None), "info");
    }

    #[test]
    fn test_blank_currency_rejected() {
        let config = Config {
            currency: "  ".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_catalog_path_override() {
        let config = Config::default().with_catalog_path("other.json");
        assert_eq!(config.catalog_path, PathBuf::from("other.json"));
    }
}
