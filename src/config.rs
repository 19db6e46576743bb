// config.rs — Global configuration loader

use serde::Deserialize;

/// Structure of the optional global `config.toml`.
#[derive(Deserialize, Default, Debug)]
pub struct GlobalConfig {
    /// Extra directory names excluded from every scan.
    pub exclude_dirs: Option<Vec<String>>,
    /// Default for parallel file analysis; `--no-parallel` always wins.
    pub parallel: Option<bool>,
}

impl GlobalConfig {
    /// Load `<config dir>/codestat/config.toml`, falling back to defaults if
    /// the file is missing or malformed.
    pub fn load() -> Self {
        if let Some(mut path) = dirs::config_dir() {
            path.push("codestat");
            path.push("config.toml");

            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => eprintln!("[WARNING] Failed to parse {}: {}", path.display(), e),
                    }
                }
            }
        }
        Self::default()
    }
}
