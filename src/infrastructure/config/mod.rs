use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Optional config file, looked up from the working directory upwards
pub const CONFIG_FILE: &str = "inventario.toml";

/// Environment overrides, nested keys split on `__` (e.g. `INVENTARIO_SERVER__PORT`)
pub const ENV_PREFIX: &str = "INVENTARIO_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Endpoint of the PDF table-extraction service
    pub url: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/table".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Download name offered for exported inventories
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: "inventario.xlsx".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            extraction: ExtractionConfig::default(),
            export: ExportConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// Defaults, then `inventario.toml`, then `INVENTARIO_*` variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: AppConfig = figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(AppError::ConfigError(
                "server.port must be non-zero".to_string(),
            ));
        }

        let url = url::Url::parse(&self.extraction.url).map_err(|e| {
            AppError::ConfigError(format!(
                "extraction.url '{}' is not a valid URL: {}",
                self.extraction.url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::ConfigError(format!(
                "extraction.url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if !self.export.file_name.to_lowercase().ends_with(".xlsx") {
            return Err(AppError::ConfigError(format!(
                "export.file_name '{}' must end in .xlsx",
                self.export.file_name
            )));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|_jail| {
            let config = AppConfig::load().unwrap();
            assert_eq!(config, AppConfig::default());
            assert_eq!(config.bind_address(), ("127.0.0.1".to_string(), 3000));
            assert_eq!(config.extraction.url, "http://localhost:8000/table");
            assert_eq!(config.export.file_name, "inventario.xlsx");
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                    log_level = "debug"

                    [server]
                    host = "0.0.0.0"
                    port = 8080

                    [extraction]
                    url = "http://tables.local:9000/table"
                "#,
            )?;
            jail.set_env("INVENTARIO_SERVER__PORT", "9090");

            let config = AppConfig::load().unwrap();

            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.extraction.url, "http://tables.local:9000/table");
            assert_eq!(config.log_level, "debug");
            assert_eq!(config.export.file_name, "inventario.xlsx");
            Ok(())
        });
    }

    #[test]
    fn test_rejects_bad_extraction_url() {
        Jail::expect_with(|jail| {
            jail.set_env("INVENTARIO_EXTRACTION__URL", "ftp://tables.local/table");
            let err = AppConfig::load().unwrap_err();
            assert!(matches!(err, AppError::ConfigError(_)));

            jail.set_env("INVENTARIO_EXTRACTION__URL", "not a url");
            assert!(AppConfig::load().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_rejects_zero_port_and_bad_export_name() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.export.file_name = "inventario.csv".to_string();
        assert!(config.validate().is_err());
    }
}
