use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".intlxrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The shared locale dictionary JSON file. Remembered once chosen so
    /// later extractions do not need the flag again.
    #[serde(default)]
    pub locale_file: Option<PathBuf>,
    /// Extension of per-component definitions files.
    #[serde(default = "default_messages_extension")]
    pub messages_extension: String,
}

fn default_messages_extension() -> String {
    "ts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale_file: None,
            messages_extension: default_messages_extension(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config came from; `None` when using defaults.
    pub path: Option<PathBuf>,
}

impl ConfigLoadResult {
    /// The locale dictionary path, resolved relative to the config file's
    /// directory when it is relative.
    pub fn locale_file(&self) -> Option<PathBuf> {
        let locale_file = self.config.locale_file.as_ref()?;
        if locale_file.is_absolute() {
            return Some(locale_file.clone());
        }
        match self.path.as_ref().and_then(|path| path.parent()) {
            Some(config_dir) => Some(config_dir.join(locale_file)),
            None => Some(locale_file.clone()),
        }
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}

/// Write `config` back to `path` (pretty-printed, trailing newline).
pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    let content = serde_json::to_string_pretty(config).context("Failed to serialize config.")?;
    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}
