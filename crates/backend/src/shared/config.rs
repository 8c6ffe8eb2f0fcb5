use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Path to the transactions CSV file.
    pub path: String,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[data]
path = "data/coffee_sales_sample.csv"
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Get the transactions file path from configuration.
///
/// Relative paths resolve against the executable directory first (so a
/// deployed bundle finds its data file), falling back to the working
/// directory so `cargo run` from the repository root works too.
pub fn get_data_path(config: &Config) -> anyhow::Result<PathBuf> {
    let data_path_str = &config.data.path;
    let data_path = Path::new(data_path_str);

    // If absolute path, use as is
    if data_path.is_absolute() {
        return Ok(data_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved_path = exe_dir.join(data_path);
            if resolved_path.exists() {
                return Ok(resolved_path);
            }
        }
    }

    // Fallback: relative to the current directory
    Ok(PathBuf::from(data_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.data.path, "data/coffee_sales_sample.csv");
    }
}
