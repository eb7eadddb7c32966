//! Preset configuration loader.
//!
//! Loads [`SimulationConfig`] values from YAML files, so different court
//! feels (regulation, bouncy practice balls, ...) can be tried without
//! recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! presets/
//! ├── regulation.yaml
//! ├── bouncy.yaml
//! └── practice.yaml
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::{ConfigError, SimulationConfig};

/// Preset loader with configurable base directory.
pub struct PresetLoader {
    base_path: PathBuf,
}

impl PresetLoader {
    /// Create a new loader reading `<name>.yaml` files from `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load and validate a preset by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = PresetLoader::new("presets");
    /// let config = loader.load("regulation")?;
    /// let session = Session::with_config(config)?;
    /// ```
    pub fn load(&self, name: &str) -> Result<SimulationConfig, ConfigError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(ConfigError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let mut config = SimulationConfig::from_yaml_str(&contents)?;
        if config.name.is_empty() {
            config.name = name.to_string();
        }
        debug!(preset = name, path = %path.display(), "loaded simulation preset");
        Ok(config)
    }

    /// List all available presets, sorted by name.
    pub fn list(&self) -> Result<Vec<String>, ConfigError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".yaml") {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn get_presets_path() -> PathBuf {
        let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(manifest_dir).join("..").join("presets")
    }

    #[test]
    fn test_load_regulation_matches_defaults() {
        let loader = PresetLoader::new(get_presets_path());
        let result = loader.load("regulation");

        assert!(result.is_ok(), "Should load regulation: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.name, "Regulation");
        let defaults = SimulationConfig::default();
        assert_eq!(config.ground, defaults.ground);
        assert_eq!(config.hoops, defaults.hoops);
    }

    #[test]
    fn test_load_bouncy_overrides_ground() {
        let loader = PresetLoader::new(get_presets_path());
        let config = loader.load("bouncy").unwrap();

        assert!(config.ground.bounce_coefficient > 0.6);
        assert!(config.ground.bounce_coefficient <= 1.0);
    }

    #[test]
    fn test_load_nonexistent_preset() {
        let loader = PresetLoader::new(get_presets_path());
        let result = loader.load("nonexistent_preset_xyz");

        match result {
            Err(ConfigError::NotFound(name)) => {
                assert_eq!(name, "nonexistent_preset_xyz");
            }
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_list_presets() {
        let loader = PresetLoader::new(get_presets_path());
        let presets = loader.list().unwrap();

        assert!(presets.contains(&"regulation".to_string()));
        assert!(presets.contains(&"practice".to_string()));
        let mut sorted = presets.clone();
        sorted.sort();
        assert_eq!(presets, sorted);
    }

    #[test]
    fn test_list_missing_directory_is_empty() {
        let loader = PresetLoader::new(get_presets_path().join("does_not_exist"));
        assert!(loader.list().unwrap().is_empty());
    }
}
