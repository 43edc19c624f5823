use std::path::Path;

use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "kplc.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub log_level: String,
    pub dump_symbols: bool,
}

impl From<RawConfig> for Config {
    fn from(raw_config: RawConfig) -> Self {
        Self {
            log_level: raw_config.log_level.unwrap_or("warn".into()),
            dump_symbols: raw_config.dump_symbols.unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct RawConfig {
    log_level: Option<String>,
    dump_symbols: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".into(),
            dump_symbols: false,
        }
    }
}

fn load_config_file<P: AsRef<Path>>(config_path: P) -> Option<Config> {
    let config_path = config_path.as_ref();
    if !config_path.exists() {
        return None;
    };

    let config = std::fs::read_to_string(config_path).ok()?;

    convert_from_toml(&config)
}

fn convert_from_toml(config: &str) -> Option<Config> {
    let raw_config: RawConfig = toml::from_str(config).ok()?;
    Some(raw_config.into())
}

/// Reads the given config file, or `kplc.toml` in the working directory when
/// no path is given. Missing or malformed files yield the defaults.
pub fn load_config<P: AsRef<Path>>(config_path: Option<P>) -> Config {
    match config_path {
        Some(config_path) => load_config_file(config_path).unwrap_or_default(),
        None => load_config_file(CONFIG_FILE).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = convert_from_toml("dump_symbols = true").unwrap();

        insta::assert_yaml_snapshot!(config, @r###"
        ---
        log_level: warn
        dump_symbols: true
        "###);
    }

    #[test]
    fn test_all_fields() {
        let config = convert_from_toml("log_level = \"trace\"\ndump_symbols = false").unwrap();

        assert_eq!(config.log_level, "trace");
        assert!(!config.dump_symbols);
    }

    #[test]
    fn test_malformed_config_is_ignored() {
        assert!(convert_from_toml("dump_symbols = \"yes\"").is_none());
        assert!(convert_from_toml("log_level = ").is_none());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let path = std::env::temp_dir().join(format!("kplc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "log_level = \"debug\"").unwrap();

        let config = load_config(Some(&path));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.log_level, "debug");
        assert!(!config.dump_symbols);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_config(Some("does/not/exist/kplc.toml"));
        assert_eq!(config, Config::default());
    }
}
