use std::fmt;
use std::fs;

use serde::Deserialize;

use crate::flags::Flags;

/// Merged emulator configuration. Values from a configuration file take
/// precedence over values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ShellConfig {
    pub vfs_path: Option<String>,
    pub startup_script: Option<String>,
    pub config_file: Option<String>,
}

/// The subset of settings a YAML configuration file may carry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub vfs_path: Option<String>,
    pub startup_script: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "{}", e),
            ConfigError::Parse(e) => write!(f, "{}", e),
        }
    }
}

fn read_config_file(path: &str) -> Result<ConfigFile, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Loads a YAML configuration file, reporting failures instead of
/// propagating them. A failed load leaves the command-line values in force.
pub fn load_config_file(path: &str) -> Option<ConfigFile> {
    match read_config_file(path) {
        Ok(data) => Some(data),
        Err(e) => {
            println!("Error reading configuration file: {}", e);
            None
        }
    }
}

impl ShellConfig {
    pub fn merge(flags: &Flags, file_data: Option<ConfigFile>) -> Self {
        let mut config = ShellConfig {
            vfs_path: flags.get_value("vfs-path").cloned(),
            startup_script: flags.get_value("startup-script").cloned(),
            config_file: flags.get_value("config-file").cloned(),
        };

        if let Some(file_data) = file_data {
            if file_data.vfs_path.is_some() {
                config.vfs_path = file_data.vfs_path;
            }
            if file_data.startup_script.is_some() {
                config.startup_script = file_data.startup_script;
            }
        }

        config
    }

    /// Prints each field as `key: value`, one per line. Unset fields are
    /// shown as `None`.
    pub fn dump(&self) {
        println!("vfs_path: {}", Self::field(&self.vfs_path));
        println!("startup_script: {}", Self::field(&self.startup_script));
        println!("config_file: {}", Self::field(&self.config_file));
    }

    pub fn debug_print(&self) {
        println!("=== Shell Emulator Configuration ===");
        self.dump();
        println!("====================================");
    }

    fn field(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("None")
    }
}
