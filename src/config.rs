// Import required dependencies
use crate::encoding::{resolve_encoding, resolve_target_encoding};
use crate::errors::{ConfigError, FileOpsError, FileOpsResult};
use crate::file_utils::ListOrder;
use dialoguer::{Confirm, Input}; // For interactive CLI prompts
use serde::{Deserialize, Serialize}; // For JSON serialization/deserialization
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

// Defaults that command-line arguments fall back to, serialized as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub suffix: Option<String>,        // Suffix filter used by recode
    pub from_encoding: Option<String>, // Source encoding used by recode
    pub to_encoding: Option<String>,   // Target encoding used by recode
    pub sort_entries: bool,            // Sort listings by name instead of file system order
    pub show_progress: bool,           // Draw a progress bar while a batch runs
}

impl Default for Config {
    fn default() -> Self {
        Self {
            suffix: None,
            from_encoding: None,
            to_encoding: None,
            sort_entries: false,
            show_progress: true,
        }
    }
}

impl Config {
    // Load configuration from a JSON file
    pub fn load(path: &Path) -> FileOpsResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                FileOpsError::Config(ConfigError::FileNotFound(path.to_path_buf()))
            } else {
                FileOpsError::io(path, e)
            }
        })?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    // Save configuration to a JSON file
    pub fn save(&self, path: &Path) -> FileOpsResult<()> {
        Self::check_writable(path)?;
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        fs::write(path, content).map_err(|e| FileOpsError::io(path, e))
    }

    // Create a default configuration template
    pub fn template() -> Self {
        Self {
            suffix: Some(".txt".to_string()),
            from_encoding: Some("GBK".to_string()),
            to_encoding: Some("UTF-8".to_string()),
            sort_entries: true,
            show_progress: true,
        }
    }

    /// Listing order implied by `sort_entries`
    pub fn list_order(&self) -> ListOrder {
        if self.sort_entries {
            ListOrder::Name
        } else {
            ListOrder::FileSystem
        }
    }

    // Interactive configuration setup using command-line prompts
    pub fn guided_setup() -> FileOpsResult<Self> {
        let template = Self::template();

        let suffix: String = Input::new()
            .with_prompt("Suffix of files to recode")
            .default(template.suffix.unwrap_or_default())
            .interact_text()
            .map_err(ConfigError::from)?;

        let from_encoding: String = Input::new()
            .with_prompt("Source encoding")
            .default(template.from_encoding.unwrap_or_default())
            .validate_with(|name: &String| {
                resolve_encoding(name)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(ConfigError::from)?;

        let to_encoding: String = Input::new()
            .with_prompt("Target encoding")
            .default(template.to_encoding.unwrap_or_default())
            .validate_with(|name: &String| {
                resolve_target_encoding(name)
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()
            .map_err(ConfigError::from)?;

        let sort_entries = Confirm::new()
            .with_prompt("Process entries sorted by name?")
            .default(true)
            .interact()
            .map_err(ConfigError::from)?;

        let show_progress = Confirm::new()
            .with_prompt("Show progress bars?")
            .default(true)
            .interact()
            .map_err(ConfigError::from)?;

        let config = Self {
            suffix: Some(suffix),
            from_encoding: Some(from_encoding),
            to_encoding: Some(to_encoding),
            sort_entries,
            show_progress,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured encoding name is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(name) = &self.from_encoding {
            if resolve_encoding(name).is_err() {
                return Err(ConfigError::InvalidEncoding {
                    field: "from_encoding",
                    name: name.clone(),
                });
            }
        }

        if let Some(name) = &self.to_encoding {
            if resolve_target_encoding(name).is_err() {
                return Err(ConfigError::InvalidEncoding {
                    field: "to_encoding",
                    name: name.clone(),
                });
            }
        }

        Ok(())
    }

    // Fail early when the directory a config is saved into cannot be written
    fn check_writable(path: &Path) -> Result<(), ConfigError> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        if !parent.is_dir() {
            return Err(ConfigError::OutputDirectoryNotWritable(parent.to_path_buf()));
        }

        // Check if directory is writable by attempting to create a temporary file
        match tempfile::Builder::new()
            .prefix(".test-write-")
            .tempfile_in(parent)
        {
            Ok(temp) => {
                let _ = temp.close();
                Ok(())
            }
            Err(_) => Err(ConfigError::OutputDirectoryNotWritable(parent.to_path_buf())),
        }
    }
}
