use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[database]
path = "data/izin_kerja.db"

[server]
host = "0.0.0.0"
port = 3000
"#;

/// Load configuration from config.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Embedded default
///
/// `PORT` in the environment overrides `server.port`.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = read_config_file()?;
    if let Some(port) = port_override(std::env::var("PORT").ok().as_deref()) {
        config.server.port = port;
    }
    Ok(config)
}

fn read_config_file() -> anyhow::Result<Config> {
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

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn port_override(raw: Option<&str>) -> Option<u16> {
    let raw = raw?.trim();
    match raw.parse() {
        Ok(port) => Some(port),
        Err(_) => {
            tracing::warn!("Ignoring invalid PORT value: {}", raw);
            None
        }
    }
}

/// Database file path; relative paths resolve against the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.database.path, "data/izin_kerja.db");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_server_section_is_optional() {
        let config: Config = toml::from_str("[database]\npath = \"x.db\"\n").unwrap();
        assert_eq!(config.server.port, 3000);

        let config: Config =
            toml::from_str("[database]\npath = \"x.db\"\n[server]\nport = 8080\n").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_port_override() {
        assert_eq!(port_override(Some("8081")), Some(8081));
        assert_eq!(port_override(Some(" 80 ")), Some(80));
        assert_eq!(port_override(Some("abc")), None);
        assert_eq!(port_override(None), None);
    }
}
