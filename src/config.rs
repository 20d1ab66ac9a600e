//! Application settings
//!
//! Settings are resolved in three layers: built-in defaults, an optional
//! YAML file, then command-line flags.
//!
//! ```yaml
//! endpoint: https://xrplcluster.com/
//! page_size: 50
//! timeout_secs: 20
//! rate_limit:
//!   requests_per_second: 2
//!   burst_size: 2
//! headers:
//!   Authorization: Bearer 0123abcd
//! export:
//!   directory: ./exports
//!   filename: history.csv
//!   delimiter: ";"
//!   header: false
//! ```

use crate::error::{Error, Result};
use crate::export::{CsvWriterConfig, DEFAULT_EXPORT_FILENAME};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::ledger::DEFAULT_ENDPOINT;
use crate::types::PageSize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Settings
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// JSON-RPC endpoint of the ledger
    pub endpoint: String,

    /// Page size preselected for new searches
    pub page_size: PageSize,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,

    /// Request rate limit; `null` disables it
    pub rate_limit: Option<RateLimiterConfig>,

    /// Extra headers sent with every request (e.g. a node provider's API key)
    pub headers: HashMap<String, String>,

    /// Where downloads are written
    pub export: ExportSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: PageSize::default(),
            timeout_secs: 30,
            user_agent: format!("xrpl-history/{}", env!("CARGO_PKG_VERSION")),
            rate_limit: Some(RateLimiterConfig::default()),
            headers: HashMap::new(),
            export: ExportSettings::default(),
        }
    }
}

/// Export destination settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Directory the CSV file is written to
    pub directory: PathBuf,

    /// File name of the CSV file
    pub filename: String,

    /// Field delimiter; must be a single ASCII character
    pub delimiter: char,

    /// Whether the header row is written
    pub header: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
            delimiter: ',',
            header: true,
        }
    }
}

impl ExportSettings {
    /// Full path of the CSV file
    pub fn path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    /// CSV writer configuration for downloads
    pub fn writer_config(&self) -> Result<CsvWriterConfig> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::invalid_value(
                    "export.delimiter",
                    format!("'{}' is not an ASCII character", self.delimiter),
                )
            })?;

        Ok(CsvWriterConfig::new()
            .with_delimiter(delimiter)
            .with_headers(self.header))
    }
}

/// Values given on the command line, each overriding the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub page_size: Option<PageSize>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Parse settings from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_yaml::from_str(yaml)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read settings file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    /// Resolve settings from an optional file and command-line overrides
    pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    /// Apply command-line overrides
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint.clone_from(endpoint);
        }
        if let Some(page_size) = overrides.page_size {
            self.page_size = page_size;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::invalid_value("endpoint", "must not be empty"));
        }
        let url = url::Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be at least 1"));
        }
        if self.export.filename.trim().is_empty() {
            return Err(Error::invalid_value("export.filename", "must not be empty"));
        }
        self.export.writer_config()?;
        Ok(())
    }

    /// HTTP client configuration derived from these settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = self.headers.iter().fold(
            HttpClientConfig::builder()
                .timeout(Duration::from_secs(self.timeout_secs))
                .user_agent(&self.user_agent),
            |builder, (key, value)| builder.header(key, value),
        );

        match &self.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()).build(),
            None => builder.no_rate_limit().build(),
        }
    }
}
