//! Configuration module for the preview extraction tool
//!
//! Supports loading configuration from a TOML file.
//! Configuration is stored in a standard location:
//! - Windows: %APPDATA%\indd_preview_tool\config.toml
//! - Linux/macOS: ~/.config/indd_preview_tool/config.toml

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application name used for config directory
const APP_NAME: &str = "indd_preview_tool";

/// Default config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the standard configuration directory for the application.
///
/// Returns:
/// - Windows: %APPDATA%\indd_preview_tool
/// - Linux/macOS: ~/.config/indd_preview_tool
pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_NAME))
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config").join(APP_NAME))
    }
}

/// Get the standard configuration file path.
pub fn get_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Ensure the configuration directory exists.
///
/// Creates the directory and all parent directories if they don't exist.
pub fn ensure_config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = get_config_dir().ok_or(ConfigError::ConfigDirNotFound)?;

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .map_err(|e| ConfigError::WriteError(config_dir.clone(), e.to_string()))?;
    }

    Ok(config_dir)
}

/// Initialize the configuration file if it doesn't exist.
///
/// Creates the config directory and writes the default config template.
/// Returns the path to the config file.
pub fn init_config() -> Result<PathBuf, ConfigError> {
    let config_dir = ensure_config_dir()?;
    let config_path = config_dir.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        let default_config = Config::generate_default_config();
        fs::write(&config_path, default_config)
            .map_err(|e| ConfigError::WriteError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Open the configuration file in the default application.
pub fn open_config_in_editor() -> Result<PathBuf, ConfigError> {
    // Ensure config exists first
    let config_path = init_config()?;

    // Open with default application
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", config_path.to_str().unwrap_or("")])
            .spawn()
            .map_err(|e| ConfigError::OpenError(config_path.clone(), e.to_string()))?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(&config_path)
            .spawn()
            .map_err(|e| ConfigError::OpenError(config_path.clone(), e.to_string()))?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(&config_path)
            .spawn()
            .map_err(|e| ConfigError::OpenError(config_path.clone(), e.to_string()))?;
    }

    Ok(config_path)
}

/// Errors that can occur while handling configuration files
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No standard configuration directory could be determined
    #[error("Could not determine the configuration directory")]
    ConfigDirNotFound,

    /// The config file could not be read
    #[error("Failed to read config file '{0}': {1}")]
    ReadError(PathBuf, String),

    /// The config file contents are not valid TOML
    #[error("Failed to parse config file '{0}': {1}")]
    ParseError(PathBuf, String),

    /// The config file or directory could not be written
    #[error("Failed to write '{0}': {1}")]
    WriteError(PathBuf, String),

    /// The config file could not be opened in an editor
    #[error("Failed to open '{0}': {1}")]
    OpenError(PathBuf, String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool settings
    pub tool: ToolConfig,

    /// Display settings
    pub display: DisplayConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// External tool settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Explicit path to the ExifTool executable, bypassing discovery
    pub path: Option<PathBuf>,

    /// Override for the install-directory discovery root
    pub install_dir: Option<PathBuf>,
}

/// Display settings for the preview panel
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Preferred panel width in display units
    pub preferred_width: f64,

    /// Preferred panel height in display units
    pub preferred_height: f64,

    /// Fraction of the preferred size the preview may fill
    pub fill_ratio: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preferred_width: 800.0,
            preferred_height: 600.0,
            fill_ratio: 0.9,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Whether to also log to a file
    pub log_to_file: bool,

    /// Log file path when file logging is enabled
    pub log_file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_to_file: false,
            log_file: PathBuf::from("indd_preview_tool.log"),
        }
    }
}

impl Config {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_path_buf(), e.to_string()))?;
        toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))
    }

    /// Load configuration from the standard location
    ///
    /// Returns the default configuration if no file exists yet.
    pub fn load_default() -> Result<Self, ConfigError> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Save configuration to a specific file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e.to_string()))?;
        fs::write(path, contents)
            .map_err(|e| ConfigError::WriteError(path.to_path_buf(), e.to_string()))?;
        Ok(())
    }

    /// Generate the commented default config file contents
    pub fn generate_default_config() -> String {
        r#"# InDesign Preview Tool configuration

[tool]
# Explicit path to the ExifTool executable. When set, discovery is skipped.
# path = "C:\\Tools\\exiftool-13.29_64\\exiftool(-k).exe"

# Override the install-directory discovery root. Defaults to the directory
# containing the running executable.
# install_dir = "C:\\Program Files\\indd-preview"

[display]
# Preferred preview panel size and the fraction of it the image may fill.
preferred_width = 800.0
preferred_height = 600.0
fill_ratio = 0.9

[logging]
# Log level: error, warn, info, debug, trace
level = "info"

# Also write log records to a file.
log_to_file = false
log_file = "indd_preview_tool.log"
"#
        .to_string()
    }
}
