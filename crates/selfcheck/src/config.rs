//! Configuration file structure (selfcheck.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use selfcheck_static::BuildConfig;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub bundle: BundleConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_content")]
    pub content: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    #[serde(default)]
    pub styles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BundleConfig {
    #[serde(default = "default_entry")]
    pub entry: String,
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            styles: Vec::new(),
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_content() -> String {
    "content".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_entry() -> String {
    "src/lib/app.mjs".to_string()
}
fn default_minify() -> bool {
    true
}

impl ConfigFile {
    /// Load configuration from `path` if it exists.
    /// Returns an error if the file exists but is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No {} found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn content_dir(&self) -> PathBuf {
        PathBuf::from(&self.site.content)
    }

    /// Builder configuration, with command-line overrides applied.
    pub fn build_config(self, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
        let entry = self.bundle.entry.trim();

        BuildConfig {
            content_dir: self.content_dir(),
            output_dir: output.unwrap_or_else(|| PathBuf::from(&self.site.output)),
            bundle_entry: (!entry.is_empty()).then(|| PathBuf::from(entry)),
            minify: minify.unwrap_or(self.build.minify),
            base_url: self.site.base_url,
            title: self.site.title,
            styles: self.site.styles,
        }
    }
}
