//! SiteChat configuration system.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SiteChatError};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteChatConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

impl SiteChatConfig {
    /// Load config from `SITECHAT_CONFIG` or `./sitechat.toml`, falling back to defaults.
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load config from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SiteChatError::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| SiteChatError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        std::env::var("SITECHAT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("sitechat.toml"))
    }

    /// Apply the `PORT` environment override, if set and valid.
    pub fn apply_env(&mut self) {
        if let Some(port) = std::env::var("PORT").ok().and_then(|p| p.trim().parse().ok()) {
            self.gateway.port = port;
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 3000 }
fn default_host() -> String { "127.0.0.1".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Site content configuration: where pages live and how they are indexed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Directory holding the static site. Tilde-expanded.
    #[serde(default = "default_root")]
    pub root: String,
    /// Landing document served for unknown paths.
    #[serde(default = "default_landing")]
    pub landing: String,
    /// CSS selector of the primary content container.
    #[serde(default = "default_content_selector")]
    pub content_selector: String,
    /// Context used when no indexed page matches a query.
    #[serde(default = "default_fallback_context")]
    pub fallback_context: String,
    #[serde(default = "default_pages")]
    pub pages: Vec<PageConfig>,
}

fn default_root() -> String { "public".into() }
fn default_landing() -> String { "index.html".into() }
fn default_content_selector() -> String { "main".into() }
fn default_fallback_context() -> String {
    "This is a website about F1 student visas, with pages for FAQs, student resources, and contact information.".into()
}
fn default_pages() -> Vec<PageConfig> {
    [
        ("/", "index.html"),
        ("/faqs", "faqs.html"),
        ("/f1-students", "f1-students.html"),
        ("/contact", "contact.html"),
    ]
    .into_iter()
    .map(|(url, path)| PageConfig { url: url.into(), path: path.into() })
    .collect()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            landing: default_landing(),
            content_selector: default_content_selector(),
            fallback_context: default_fallback_context(),
            pages: default_pages(),
        }
    }
}

impl SiteConfig {
    /// Site root with `~` expanded.
    pub fn root_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.root).to_string())
    }

    /// Resolve a page path against the site root. Absolute paths are kept.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let expanded = PathBuf::from(shellexpand::tilde(path).to_string());
        if expanded.is_absolute() {
            expanded
        } else {
            self.root_dir().join(expanded)
        }
    }

    pub fn landing_path(&self) -> PathBuf {
        self.resolve(&self.landing)
    }
}

/// One configured source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// URL path identifying the page, e.g. `/faqs`.
    pub url: String,
    /// File path, relative to the site root unless absolute.
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = SiteChatConfig::default();
        assert_eq!(cfg.gateway.port, 3000);
        assert_eq!(cfg.gateway.host, "127.0.0.1");
        assert_eq!(cfg.site.content_selector, "main");
        assert_eq!(cfg.site.pages.len(), 4);
        assert_eq!(cfg.site.pages[2].url, "/f1-students");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let cfg: SiteChatConfig = toml::from_str(
            r#"
            [gateway]
            port = 8080

            [site]
            root = "/srv/site"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.gateway.port, 8080);
        assert_eq!(cfg.gateway.host, "127.0.0.1");
        assert_eq!(cfg.site.root, "/srv/site");
        assert_eq!(cfg.site.pages.len(), 4);
    }

    #[test]
    fn test_explicit_pages_replace_defaults() {
        let cfg: SiteChatConfig = toml::from_str(
            r#"
            [[site.pages]]
            url = "/about"
            path = "about.html"
            "#,
        )
        .unwrap();
        assert_eq!(
            cfg.site.pages,
            vec![PageConfig { url: "/about".into(), path: "about.html".into() }]
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let site = SiteConfig { root: "/srv/site".into(), ..SiteConfig::default() };
        assert_eq!(site.resolve("faqs.html"), PathBuf::from("/srv/site/faqs.html"));
        assert_eq!(site.resolve("/tmp/x.html"), PathBuf::from("/tmp/x.html"));
        assert_eq!(site.landing_path(), PathBuf::from("/srv/site/index.html"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitechat.toml");
        std::fs::write(&path, "[gateway]\nhost = \"0.0.0.0\"\n").unwrap();
        let cfg = SiteChatConfig::load_from(&path).unwrap();
        assert_eq!(cfg.gateway.host, "0.0.0.0");
    }

    #[test]
    fn test_load_from_invalid_toml_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sitechat.toml");
        std::fs::write(&path, "[gateway\nport = ").unwrap();
        let err = SiteChatConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, SiteChatError::Config(_)));
    }
}
