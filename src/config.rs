//! Editor configuration passed from JavaScript at mount time.

use serde::Deserialize;

use crate::error::{CsvGridError, Result};

pub const DEFAULT_EXPORT_FILE_NAME: &str = "exported_data.csv";
pub const DEFAULT_CONTENT_TYPE: &str = "text/csv;charset=utf-8;";
pub const DEFAULT_TITLE: &str = "CSV File Manager";

/// Options for a mounted editor. Every field is optional on the JS side.
///
/// ```javascript
/// new CsvGridApp(root, { exportFileName: "people.csv", logLevel: "debug" });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// File name offered by the download.
    pub export_file_name: String,
    /// MIME type of the downloaded blob.
    pub content_type: String,
    /// Heading shown above the drop surface.
    pub title: String,
    /// Console log level: `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config; an empty string yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: EditorConfig =
            serde_json::from_str(json).map_err(|e| CsvGridError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the editor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.export_file_name.trim().is_empty() {
            return Err(CsvGridError::Config("exportFileName must not be empty".into()));
        }
        self.level()?;
        Ok(())
    }

    /// The configured log level.
    pub fn level(&self) -> Result<log::Level> {
        self.log_level
            .parse::<log::Level>()
            .map_err(|_| CsvGridError::Config(format!("unknown logLevel '{}'", self.log_level)))
    }
}
