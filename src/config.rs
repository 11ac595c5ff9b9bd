use anyhow::{anyhow, Result};
use config::Config;
use std::collections::HashMap;
use std::path::Path;

pub struct PathmetaConfig {
    /// Path to the directory holding pathmeta's data
    pub data_dir: String,

    /// Operator static info configuration used by `pathmeta extend`
    pub staticinfo_config: String,
}

const EMPTY_CONFIG: &str = r#"### pathmeta configuration file

### directory for data used by pathmeta
# data_dir = "~/.pathmeta"

### operator static info configuration (JSON)
### defaults to <data_dir>/staticinfo_config.json
# staticinfo_config = "/etc/scion/staticinfo_config.json"
"#;

const STATICINFO_CONFIG_FILE: &str = "staticinfo_config.json";

impl Default for PathmetaConfig {
    fn default() -> Self {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| ".".to_string());
        let data_dir = format!("{}/.pathmeta", home_dir);

        Self {
            staticinfo_config: format!("{}/{}", data_dir, STATICINFO_CONFIG_FILE),
            data_dir,
        }
    }
}

impl PathmetaConfig {
    /// Function to create and initialize a new configuration
    pub fn new(path: &Option<String>) -> Result<PathmetaConfig> {
        let mut builder = Config::builder();

        // By default use $HOME/.pathmeta/pathmeta.toml as the configuration file path
        let home_dir = dirs::home_dir()
            .ok_or_else(|| anyhow!("Could not find home directory"))?
            .to_str()
            .ok_or_else(|| anyhow!("Could not convert home directory path to string"))?
            .to_owned();

        let pathmeta_dir = format!("{}/.pathmeta", home_dir.as_str());

        // Add in toml configuration file
        match path {
            Some(p) => {
                let path = Path::new(p.as_str());
                if path.exists() {
                    let path_str = path
                        .to_str()
                        .ok_or_else(|| anyhow!("Could not convert path to string"))?;
                    builder = builder.add_source(config::File::with_name(path_str));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG)
                        .map_err(|e| anyhow!("Unable to create config file: {}", e))?;
                }
            }
            None => {
                std::fs::create_dir_all(pathmeta_dir.as_str())
                    .map_err(|e| anyhow!("Unable to create pathmeta directory: {}", e))?;
                let p = format!("{}/pathmeta.toml", pathmeta_dir.as_str());
                if Path::new(p.as_str()).exists() {
                    builder = builder.add_source(config::File::with_name(p.as_str()));
                } else {
                    std::fs::write(p.as_str(), EMPTY_CONFIG).map_err(|e| {
                        anyhow!("Unable to create config file {}: {}", p.as_str(), e)
                    })?;
                }
            }
        }

        // Add in settings from the environment (with a prefix of PATHMETA)
        // E.g., `PATHMETA_DATA_DIR=/tmp/pathmeta ./pathmeta` would set the data directory
        builder = builder.add_source(config::Environment::with_prefix("PATHMETA"));

        let settings = builder
            .build()
            .map_err(|e| anyhow!("Failed to build configuration: {}", e))?;

        let config = settings
            .try_deserialize::<HashMap<String, String>>()
            .map_err(|e| anyhow!("Failed to deserialize configuration: {}", e))?;

        Self::from_settings(&config, &pathmeta_dir)
    }

    /// Resolve the settings map, falling back to `default_dir` for the data directory
    fn from_settings(config: &HashMap<String, String>, default_dir: &str) -> Result<Self> {
        let data_dir = match config.get("data_dir") {
            Some(p) => p.trim_end_matches('/').to_string(),
            None => {
                std::fs::create_dir_all(default_dir)
                    .map_err(|e| anyhow!("Unable to create data directory: {}", e))?;
                default_dir.trim_end_matches('/').to_string()
            }
        };

        let staticinfo_config = config
            .get("staticinfo_config")
            .cloned()
            .unwrap_or_else(|| format!("{}/{}", data_dir, STATICINFO_CONFIG_FILE));

        Ok(PathmetaConfig {
            data_dir,
            staticinfo_config,
        })
    }

    /// Display configuration summary
    pub fn summary(&self) -> String {
        let status = if Path::new(&self.staticinfo_config).exists() {
            "found"
        } else {
            "missing"
        };
        [
            format!("Data Directory:     {}", self.data_dir),
            format!(
                "Static Info Config: {} ({})",
                self.staticinfo_config, status
            ),
        ]
        .join("\n")
    }

    /// Get the config file path
    pub fn config_file_path() -> String {
        let home_dir = dirs::home_dir()
            .map(|h| h.to_string_lossy().to_string())
            .unwrap_or_else(|| "~".to_string());
        format!("{}/.pathmeta/pathmeta.toml", home_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PathmetaConfig::default();
        assert!(config.data_dir.ends_with("/.pathmeta"));
        assert_eq!(
            config.staticinfo_config,
            format!("{}/staticinfo_config.json", config.data_dir)
        );
    }

    #[test]
    fn test_from_settings() {
        let dir = tempfile::tempdir().unwrap();
        let default_dir = dir.path().join("data");
        let default_dir = default_dir.to_str().unwrap();

        let config = PathmetaConfig::from_settings(&HashMap::new(), default_dir).unwrap();
        assert_eq!(config.data_dir, default_dir);
        assert!(Path::new(default_dir).exists());
        assert_eq!(
            config.staticinfo_config,
            format!("{}/staticinfo_config.json", default_dir)
        );

        let mut settings = HashMap::new();
        settings.insert("data_dir".to_string(), "/srv/pathmeta/".to_string());
        settings.insert(
            "staticinfo_config".to_string(),
            "/etc/scion/static.json".to_string(),
        );
        let config = PathmetaConfig::from_settings(&settings, default_dir).unwrap();
        assert_eq!(config.data_dir, "/srv/pathmeta");
        assert_eq!(config.staticinfo_config, "/etc/scion/static.json");
    }

    #[test]
    fn test_new_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let file = dir.path().join("pathmeta.toml");
        std::fs::write(
            &file,
            format!("data_dir = \"{}\"\n", data_dir.to_str().unwrap()),
        )
        .unwrap();

        let config = PathmetaConfig::new(&Some(file.to_str().unwrap().to_string())).unwrap();
        assert_eq!(config.data_dir, data_dir.to_str().unwrap());
        assert!(config.staticinfo_config.ends_with("/data/staticinfo_config.json"));
    }

    #[test]
    fn test_new_creates_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("new.toml");
        let _ = PathmetaConfig::new(&Some(file.to_str().unwrap().to_string()));
        let written = std::fs::read_to_string(&file).unwrap();
        assert!(written.starts_with("### pathmeta configuration file"));
    }

    #[test]
    fn test_summary() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_file = dir.path().join("staticinfo_config.json");
        std::fs::write(&cfg_file, "{}").unwrap();

        let config = PathmetaConfig {
            data_dir: dir.path().to_str().unwrap().to_string(),
            staticinfo_config: cfg_file.to_str().unwrap().to_string(),
        };
        let summary = config.summary();
        assert!(summary.contains("Data Directory:"));
        assert!(summary.contains("(found)"));

        let config = PathmetaConfig {
            staticinfo_config: "/nonexistent/static.json".to_string(),
            ..config
        };
        assert!(config.summary().contains("(missing)"));
    }
}
