//! Engine configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_cache::cache_key;

use crate::error::AisleError;
use crate::money::Currency;

/// Page engine configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AisleConfig {
    /// Search debounce window in milliseconds (default: 120).
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Currency used for cart totals.
    #[serde(default)]
    pub currency: Currency,

    /// Name given to cart lines added without one.
    #[serde(default = "default_placeholder_name")]
    pub placeholder_name: String,

    /// Where the cart snapshot is stored.
    #[serde(default)]
    pub storage: StorageConfig,
}

fn default_debounce_ms() -> u64 {
    120
}

fn default_placeholder_name() -> String {
    "Item".to_string()
}

impl Default for AisleConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            currency: Currency::default(),
            placeholder_name: default_placeholder_name(),
            storage: StorageConfig::default(),
        }
    }
}

impl AisleConfig {
    /// Load config from a file. `.json` files are read as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AisleError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AisleError::ConfigError(format!("failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = if is_json(path) {
            serde_json::from_str(&content).map_err(|e| {
                AisleError::ConfigError(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            toml::from_str(&content)?
        };

        tracing::debug!(path = %path.display(), key = %config.cart_storage_key(), "config loaded");
        Ok(config)
    }

    /// Save config to a file, in the format its extension names.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AisleError> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self).map_err(|e| AisleError::ConfigError(e.to_string()))?
        };
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Search debounce window.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Full key the cart snapshot is stored under, e.g. `aisle:cart`.
    pub fn cart_storage_key(&self) -> String {
        cache_key!(&self.storage.namespace, &self.storage.cart_key)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Storage key layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_namespace() -> String {
    "aisle".to_string()
}

fn default_cart_key() -> String {
    "cart".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            cart_key: default_cart_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AisleConfig::default();
        assert_eq!(config.debounce(), Duration::from_millis(120));
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.placeholder_name, "Item");
        assert_eq!(config.cart_storage_key(), "aisle:cart");
    }

    #[test]
    fn test_load_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aisle.toml");
        std::fs::write(
            &path,
            "debounce_ms = 250\ncurrency = \"EUR\"\n\n[storage]\nnamespace = \"shop\"\n",
        )
        .unwrap();

        let config = AisleConfig::load(&path).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.currency, Currency::EUR);
        assert_eq!(config.placeholder_name, "Item");
        assert_eq!(config.cart_storage_key(), "shop:cart");
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("aisle.json");
        std::fs::write(&path, r#"{"placeholder_name": "Thing"}"#).unwrap();

        let config = AisleConfig::load(&path).unwrap();
        assert_eq!(config.placeholder_name, "Thing");
        assert_eq!(config.debounce_ms, 120);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = AisleConfig {
            debounce_ms: 50,
            ..AisleConfig::default()
        };

        for name in ["aisle.toml", "aisle.json"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(AisleConfig::load(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = AisleConfig::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(AisleError::ConfigError(_))));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "debounce_ms = \"soon\"").unwrap();
        assert!(matches!(AisleConfig::load(&bad), Err(AisleError::ConfigError(_))));

        let bad_json = dir.path().join("bad.json");
        std::fs::write(&bad_json, "{").unwrap();
        assert!(matches!(AisleConfig::load(&bad_json), Err(AisleError::ConfigError(_))));
    }
}
