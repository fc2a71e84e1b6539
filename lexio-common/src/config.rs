//! Configuration loading and data folder resolution

use crate::{Error, Result};
use std::path::PathBuf;

/// Data folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, env_var_name: &str) -> Result<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        return Ok(PathBuf::from(path));
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(folder) = config.get("data_folder").and_then(|v| v.as_str()) {
                    return Ok(PathBuf::from(folder));
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    Ok(default_data_folder())
}

/// Default database file path inside a data folder
pub fn database_path(data_folder: &std::path::Path) -> PathBuf {
    data_folder.join("lexio.db")
}

/// Get configuration file path for the platform
fn locate_config_file() -> Result<PathBuf> {
    if cfg!(target_os = "linux") {
        // Try ~/.config/lexio/config.toml first, then /etc/lexio/config.toml
        if let Some(path) = dirs::config_dir().map(|d| d.join("lexio").join("config.toml")) {
            if path.exists() {
                return Ok(path);
            }
        }
        let system_config = PathBuf::from("/etc/lexio/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
        Err(Error::Config("No config file found".to_string()))
    } else {
        let path = dirs::config_dir()
            .map(|d| d.join("lexio").join("config.toml"))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        if path.exists() {
            Ok(path)
        } else {
            Err(Error::Config(format!("Config file not found: {:?}", path)))
        }
    }
}

/// Get OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("lexio"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\lexio"))
    } else {
        // ~/.local/share/lexio on Linux, ~/Library/Application Support/lexio on macOS
        dirs::data_local_dir()
            .map(|d| d.join("lexio"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/lexio"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_argument_wins() {
        let folder = resolve_data_folder(Some("/tmp/lexio-test"), "LEXIO_TEST_UNSET").unwrap();
        assert_eq!(folder, PathBuf::from("/tmp/lexio-test"));
    }

    #[test]
    fn env_var_beats_default() {
        std::env::set_var("LEXIO_TEST_DATA_FOLDER", "/tmp/lexio-env");
        let folder = resolve_data_folder(None, "LEXIO_TEST_DATA_FOLDER").unwrap();
        std::env::remove_var("LEXIO_TEST_DATA_FOLDER");
        assert_eq!(folder, PathBuf::from("/tmp/lexio-env"));
    }

    #[test]
    fn database_path_is_inside_data_folder() {
        let path = database_path(std::path::Path::new("/tmp/lexio"));
        assert_eq!(path, PathBuf::from("/tmp/lexio/lexio.db"));
    }
}
