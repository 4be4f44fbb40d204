//! Configuration system
//!
//! Scene configurations are plain serde structs. Any type implementing
//! [`Config`] can be read from and written to `.toml` or `.ron` files.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Format is picked from the extension
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{EmptySceneConfig, TraversableMapConfig};

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("sim_scene_{}_{}", std::process::id(), name))
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_toml_roundtrip_preserves_fields() {
        let path = temp_path("empty.toml");
        let config = EmptySceneConfig::default()
            .with_render_floor_plane(false)
            .with_sample_half_extent(2.5);

        config.save_to_file(&path).unwrap();
        let loaded = EmptySceneConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(!loaded.render_floor_plane);
        assert_eq!(loaded.sample_half_extent, 2.5);
    }

    #[test]
    fn test_ron_roundtrip() {
        let path = temp_path("trav.ron");
        let config = TraversableMapConfig::default().with_erosion(4).with_seed(7);

        config.save_to_file(&path).unwrap();
        let loaded = TraversableMapConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.erosion, 4);
        assert_eq!(loaded.seed, Some(7));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = EmptySceneConfig::load_from_file("scene.yaml");
        // Missing file is reported before the extension is inspected
        assert!(matches!(result, Err(ConfigError::Io(_))));

        let result = EmptySceneConfig::default().save_to_file("scene.yaml");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
