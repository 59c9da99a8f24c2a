use std::fs;
use std::path::Path;

use super::error::ConfigError;
use super::types::ServerConfig;

/// Loads the server configuration.
///
/// A missing file is not an error and yields defaults. Model and region are
/// always overridden from the environment afterwards.
pub fn load_config(path: Option<&Path>) -> Result<ServerConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ServerConfig::default(),
    };
    config.agent = config.agent.with_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn read_config(path: &Path) -> Result<ServerConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            log::debug!("loaded config from {}", path.display());
            Ok(toml::from_str(&contents)?)
        }
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("config file {} not found, using defaults", path.display());
            Ok(ServerConfig::default())
        }
        Err(err) => Err(ConfigError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let contents = r#"
            port = 9000

            [logging]
            level = "debug"
        "#;
        let config: ServerConfig = toml::from_str(contents).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.cors_origins.len(), 2);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = read_config(Path::new("/nonexistent/bedrock-chat.toml")).unwrap();
        assert_eq!(config, ServerConfig::default());
    }
}
