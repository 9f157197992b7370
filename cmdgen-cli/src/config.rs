//! Configuration with builder pattern
//!
//! Every setting has a default, so the config file is optional. Lookup order
//! for the file: explicit path, then `$CMDGEN_CONFIG`, then
//! `~/.config/cmdgen/config.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable naming an alternative config file
pub const CONFIG_ENV_VAR: &str = "CMDGEN_CONFIG";

/// Name of the generated commands file
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "generated_commands.txt";

/// Upload size cap for staged inputs (16 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Settings for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the commands file is written. `None` means the system temp dir.
    pub output_dir: Option<PathBuf>,
    /// File name of the commands file
    pub output_file_name: String,
    /// Sheet to read. `None` means the first sheet.
    pub sheet: Option<String>,
    /// Largest upload accepted when staging an input
    pub max_input_bytes: u64,
    /// Echo generated commands to stdout
    pub print_commands: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            sheet: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            print_commands: true,
        }
    }
}

impl Config {
    /// Create a new builder for Config
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load configuration, falling back to defaults when no file exists.
    ///
    /// An explicitly named file (argument or environment) must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Self::from_file(Path::new(&path));
        }

        match default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                log::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        if config.output_file_name.trim().is_empty() {
            anyhow::bail!("output_file_name must not be empty");
        }
        Ok(config)
    }

    /// Directory the commands file is written to
    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    /// Full path of the commands file
    pub fn output_path(&self) -> PathBuf {
        self.resolved_output_dir().join(&self.output_file_name)
    }
}

/// Default config file location (~/.config/cmdgen/config.toml)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cmdgen").join("config.toml"))
}

/// Builder for [`Config`], used to layer command-line overrides
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the output directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    /// Set the output file name
    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_file_name = name.into();
        self
    }

    /// Point the output at a full path (directory and file name)
    pub fn output_path(mut self, path: &Path) -> Self {
        if let Some(name) = path.file_name() {
            self.config.output_file_name = name.to_string_lossy().into_owned();
        }
        let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
        self.config.output_dir = Some(parent.map(Path::to_path_buf).unwrap_or_else(|| ".".into()));
        self
    }

    /// Set the sheet to read
    pub fn sheet(mut self, sheet: impl Into<String>) -> Self {
        self.config.sheet = Some(sheet.into());
        self
    }

    /// Set the upload size cap
    pub fn max_input_bytes(mut self, max: u64) -> Self {
        self.config.max_input_bytes = max;
        self
    }

    /// Enable/disable echoing commands to stdout
    pub fn print_commands(mut self, enabled: bool) -> Self {
        self.config.print_commands = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.output_file_name, "generated_commands.txt");
        assert_eq!(config.max_input_bytes, 16 * 1024 * 1024);
        assert!(config.print_commands);
        assert!(config.sheet.is_none());
        assert_eq!(
            config.output_path(),
            std::env::temp_dir().join("generated_commands.txt")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
            output_dir = "/var/tmp/cmdgen"
            sheet = "BSC"
            "#,
        )
        .unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("/var/tmp/cmdgen")));
        assert_eq!(config.sheet.as_deref(), Some("BSC"));
        assert_eq!(config.output_file_name, DEFAULT_OUTPUT_FILE_NAME);
        assert_eq!(
            config.output_path(),
            PathBuf::from("/var/tmp/cmdgen/generated_commands.txt")
        );
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::from_toml("max_input_bytes = \"lots\"").is_err());
        assert!(Config::from_toml("output_file_name = \"  \"").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "print_commands = false\nmax_input_bytes = 1024\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.print_commands);
        assert_eq!(config.max_input_bytes, 1024);

        assert!(Config::load(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let config = Config::builder()
            .output_dir("/tmp/out")
            .output_file_name("bscex.txt")
            .sheet("Sheet2")
            .max_input_bytes(10)
            .print_commands(false)
            .build();

        assert_eq!(config.output_path(), PathBuf::from("/tmp/out/bscex.txt"));
        assert_eq!(config.sheet.as_deref(), Some("Sheet2"));
        assert_eq!(config.max_input_bytes, 10);
        assert!(!config.print_commands);
    }

    #[test]
    fn test_builder_output_path() {
        let config = ConfigBuilder::from_config(Config::default())
            .output_path(Path::new("/data/run1/cmds.txt"))
            .build();
        assert_eq!(config.output_path(), PathBuf::from("/data/run1/cmds.txt"));

        let config = Config::builder().output_path(Path::new("cmds.txt")).build();
        assert_eq!(config.output_path(), PathBuf::from("./cmds.txt"));
    }
}
