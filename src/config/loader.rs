use super::Config;
use crate::error::ConfigError;
use directories::UserDirs;
use std::fs;
use std::path::Path;

impl Config {
    /// Load `~/.pitch-cleanup/config.toml`, writing defaults on first run.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .ok_or_else(|| ConfigError::Load("Could not find home directory".into()))?;
        let config_dir = home.join(".pitch-cleanup");
        let config_path = config_dir.join("config.toml");

        if config_path.exists() {
            return Self::load_from(&config_path);
        }

        fs::create_dir_all(&config_dir)?;
        let config = Self {
            config_path,
            ..Self::default()
        };
        config.save()?;
        tracing::debug!(path = %config.config_path.display(), "Wrote default config");
        Self::finish(config)
    }

    /// Load an explicit config file. Missing files are an error here.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        let mut config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
        config.config_path = path.to_path_buf();
        Self::finish(config)
    }

    fn finish(mut config: Self) -> Result<Self, ConfigError> {
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let toml_str = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Load(format!("Failed to serialize config: {e}")))?;
        fs::write(&self.config_path, toml_str)?;
        Ok(())
    }
}
