//! Plugin settings.
//!
//! Every value has a default matching the shipped plugin, so an empty file
//! (or no file at all) yields a working configuration. A TOML file may
//! override any subset of fields:
//!
//! ```toml
//! version = "4.0.1"
//!
//! [urls]
//! admin_url = "https://shop.example/wp-admin/"
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings from {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings in {origin}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

fn default_plugin_file() -> String {
    "woocommerce-subscriptions/woocommerce-subscriptions.php".to_owned()
}

fn default_version() -> String {
    "4.0.0".to_owned()
}

fn default_text_domain() -> String {
    "woocommerce-subscriptions".to_owned()
}

fn default_option_prefix() -> String {
    "woocommerce_subscriptions".to_owned()
}

fn default_entity_type() -> String {
    "shop_subscription".to_owned()
}

fn default_admin_url() -> String {
    "/wp-admin/".to_owned()
}

fn default_docs_url() -> String {
    "http://docs.woocommerce.com/document/subscriptions/".to_owned()
}

fn default_support_url() -> String {
    "https://woocommerce.com/my-account/marketplace-ticket-form/".to_owned()
}

fn default_store_manager_guide_url() -> String {
    "http://docs.woocommerce.com/document/subscriptions/store-manager-guide/#section-3".to_owned()
}

fn default_version_two_guide_url() -> String {
    "http://docs.woocommerce.com/document/subscriptions/version-2/".to_owned()
}

/// Static configuration of the subscriptions plugin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PluginSettings {
    /// Main plugin file relative to the plugins directory (the basename).
    #[serde(default = "default_plugin_file")]
    pub plugin_file: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_text_domain")]
    pub text_domain: String,
    /// Prefix of every persisted option the plugin owns.
    #[serde(default = "default_option_prefix")]
    pub option_prefix: String,
    /// Key of the custom entity type.
    #[serde(default = "default_entity_type")]
    pub entity_type: String,
    #[serde(default)]
    pub urls: UrlSettings,
}

/// Links rendered into admin screens.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UrlSettings {
    #[serde(default = "default_admin_url")]
    pub admin_url: String,
    #[serde(default = "default_docs_url")]
    pub docs_url: String,
    #[serde(default = "default_support_url")]
    pub support_url: String,
    #[serde(default = "default_store_manager_guide_url")]
    pub store_manager_guide_url: String,
    #[serde(default = "default_version_two_guide_url")]
    pub version_two_guide_url: String,
}

impl Default for UrlSettings {
    fn default() -> Self {
        Self {
            admin_url: default_admin_url(),
            docs_url: default_docs_url(),
            support_url: default_support_url(),
            store_manager_guide_url: default_store_manager_guide_url(),
            version_two_guide_url: default_version_two_guide_url(),
        }
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            plugin_file: default_plugin_file(),
            version: default_version(),
            text_domain: default_text_domain(),
            option_prefix: default_option_prefix(),
            entity_type: default_entity_type(),
            urls: UrlSettings::default(),
        }
    }
}

impl PluginSettings {
    /// Environment variable naming a settings file that takes precedence over
    /// every candidate path.
    pub const ENV_CONFIG_PATH: &'static str = "SUBSCRIPTIONS_CONFIG";

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        toml::from_str(source).map_err(|source| ConfigError::Parse {
            origin: "inline settings".to_owned(),
            source,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            origin: path.display().to_string(),
            source,
        })
    }

    /// Loads settings, respecting the `SUBSCRIPTIONS_CONFIG` override, then
    /// the first existing candidate, then the defaults.
    pub fn load<P: AsRef<Path>>(candidates: &[P]) -> Result<Self, ConfigError> {
        Self::load_with(std::env::var(Self::ENV_CONFIG_PATH).ok(), candidates)
    }

    /// [`load`](Self::load) with the override value passed in explicitly.
    pub fn load_with<P: AsRef<Path>>(
        env_override: Option<String>,
        candidates: &[P],
    ) -> Result<Self, ConfigError> {
        if let Some(path) = env_override.filter(|p| !p.trim().is_empty()) {
            debug!(path = %path, "Loading settings from environment override");
            return Self::from_path(path);
        }
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if candidate.exists() {
                debug!(path = %candidate.display(), "Loading settings");
                return Self::from_path(candidate);
            }
        }
        debug!("No settings file found, using defaults");
        Ok(Self::default())
    }

    /// The plugin's directory name, i.e. the basename without the file.
    pub fn plugin_dir(&self) -> &str {
        self.plugin_file
            .rsplit_once('/')
            .map(|(dir, _)| dir)
            .unwrap_or(".")
    }

    pub fn is_active_option(&self) -> String {
        format!("{}_is_active", self.option_prefix)
    }

    pub fn early_renewal_option(&self) -> String {
        format!("{}_enable_early_renewal", self.option_prefix)
    }

    pub fn settings_tab_url(&self) -> String {
        format!("{}admin.php?page=wc-settings&tab=subscriptions", self.urls.admin_url)
    }

    pub fn add_subscription_url(&self) -> String {
        format!(
            "{}post-new.php?post_type=product&select_subscription=true",
            self.urls.admin_url
        )
    }

    pub fn installed_plugins_url(&self) -> String {
        format!("{}plugins.php", self.urls.admin_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings = PluginSettings::from_toml_str("").unwrap();
        assert_eq!(settings, PluginSettings::default());
        assert_eq!(settings.plugin_dir(), "woocommerce-subscriptions");
        assert_eq!(settings.is_active_option(), "woocommerce_subscriptions_is_active");
    }

    #[test]
    fn test_partial_override() {
        let settings = PluginSettings::from_toml_str(
            r#"
            version = "4.1.0"

            [urls]
            admin_url = "https://shop.example/wp-admin/"
            "#,
        )
        .unwrap();

        assert_eq!(settings.version, "4.1.0");
        assert_eq!(settings.text_domain, "woocommerce-subscriptions");
        assert_eq!(
            settings.installed_plugins_url(),
            "https://shop.example/wp-admin/plugins.php"
        );
        assert_eq!(settings.urls.docs_url, default_docs_url());
    }

    #[test]
    fn test_invalid_document_is_rejected() {
        let err = PluginSettings::from_toml_str("version = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_env_override_wins_over_candidates() {
        let mut preferred = tempfile::NamedTempFile::new().unwrap();
        writeln!(preferred, "version = \"9.9.9\"").unwrap();
        let mut candidate = tempfile::NamedTempFile::new().unwrap();
        writeln!(candidate, "version = \"1.0.0\"").unwrap();

        let env = Some(preferred.path().display().to_string());
        let settings = PluginSettings::load_with(env, &[candidate.path()]).unwrap();
        assert_eq!(settings.version, "9.9.9");

        let settings = PluginSettings::load_with(None, &[candidate.path()]).unwrap();
        assert_eq!(settings.version, "1.0.0");
    }

    #[test]
    fn test_missing_candidates_fall_back_to_defaults() {
        let settings =
            PluginSettings::load_with(Some("  ".into()), &["/nonexistent/subscriptions.toml"])
                .unwrap();
        assert_eq!(settings, PluginSettings::default());
    }

    #[test]
    fn test_missing_override_file_is_an_error() {
        let err = PluginSettings::load_with(
            Some("/nonexistent/subscriptions.toml".into()),
            &[] as &[&str],
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
