//! Manifest loading and validation.
//!
//! The manifest is the persisted record of a project's configuration choices.
//! It is read once per composition run and never mutated by the composer.

use std::path::Path;

use serde::Deserialize;

use crate::ids::{StylingId, ThemeId};

/// Serialization format of a manifest source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
    Yaml,
}

impl ManifestFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(ManifestFormat::Json),
            Some("toml") => Some(ManifestFormat::Toml),
            Some("yaml") | Some("yml") => Some(ManifestFormat::Yaml),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ManifestFormat::Json => "JSON",
            ManifestFormat::Toml => "TOML",
            ManifestFormat::Yaml => "YAML",
        }
    }
}

/// Static-adapter settings for the generated project's bundler config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    /// Output directory for prerendered pages
    pub pages: String,

    /// Output directory for static assets
    pub assets: String,

    /// Fallback page for SPA-style routing, if any (e.g. "200.html")
    pub fallback: Option<String>,

    /// Precompress emitted files with brotli/gzip
    pub precompress: bool,

    /// Fail the build on prerender errors
    pub strict: bool,
}

/// The root directories the generated project's path aliases resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathRoots {
    /// Site configuration directory
    pub config: String,

    /// Markdown content directory
    pub content: String,

    /// Library source directory
    pub lib: String,

    /// Installed themes directory
    pub themes: String,
}

impl PathRoots {
    /// All roots with their manifest field names, in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("paths.config", &self.config),
            ("paths.content", &self.content),
            ("paths.lib", &self.lib),
            ("paths.themes", &self.themes),
        ]
    }
}

/// A validated project manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Visual theme for the generated project
    pub theme: ThemeId,

    /// CSS-styling framework
    pub styling: StylingId,

    /// Static-adapter settings
    pub adapter: AdapterSettings,

    /// Alias root directories
    pub paths: PathRoots,

    /// Source-file extensions handled by the markdown preprocessor
    pub markdown_extensions: Vec<String>,
}

impl Manifest {
    /// Load and validate a manifest from source text in the given format.
    pub fn load(source: &str, format: ManifestFormat) -> Result<Self, MalformedManifest> {
        let raw: RawManifest = match format {
            ManifestFormat::Json => {
                serde_json::from_str(source).map_err(|e| MalformedManifest::syntax(format, e))?
            }
            ManifestFormat::Toml => {
                toml::from_str(source).map_err(|e| MalformedManifest::syntax(format, e))?
            }
            ManifestFormat::Yaml => {
                serde_yaml::from_str(source).map_err(|e| MalformedManifest::syntax(format, e))?
            }
        };
        raw.validate()
    }

    /// Load from a JSON source.
    pub fn from_json_str(source: &str) -> Result<Self, MalformedManifest> {
        Self::load(source, ManifestFormat::Json)
    }

    /// Load from a TOML source.
    pub fn from_toml_str(source: &str) -> Result<Self, MalformedManifest> {
        Self::load(source, ManifestFormat::Toml)
    }

    /// Load from a YAML source.
    pub fn from_yaml_str(source: &str) -> Result<Self, MalformedManifest> {
        Self::load(source, ManifestFormat::Yaml)
    }
}

/// Error for a manifest that cannot be turned into a valid [`Manifest`].
///
/// Carries the offending field name so the caller can point at it; the loader
/// never attempts partial recovery.
#[derive(Debug, thiserror::Error)]
pub enum MalformedManifest {
    #[error("manifest is not valid {format}: {message}")]
    Syntax { format: &'static str, message: String },

    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

impl MalformedManifest {
    fn syntax(format: ManifestFormat, err: impl std::fmt::Display) -> Self {
        MalformedManifest::Syntax {
            format: format.name(),
            message: err.to_string(),
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        MalformedManifest::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    /// The manifest field this error points at, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            MalformedManifest::Syntax { .. } => None,
            MalformedManifest::MissingField { field } => Some(field),
            MalformedManifest::InvalidField { field, .. } => Some(field),
        }
    }
}

/// Raw manifest as deserialized, before semantic validation.
#[derive(Debug, Deserialize)]
struct RawManifest {
    theme: Option<String>,
    styling: Option<String>,
    #[serde(default)]
    adapter: RawAdapter,
    #[serde(default)]
    paths: RawPaths,
    #[serde(default = "default_extensions", rename = "markdownExtensions")]
    markdown_extensions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawAdapter {
    #[serde(default = "default_build_dir")]
    pages: String,
    #[serde(default = "default_build_dir")]
    assets: String,
    #[serde(default)]
    fallback: Option<String>,
    #[serde(default)]
    precompress: bool,
    #[serde(default = "default_true")]
    strict: bool,
}

impl Default for RawAdapter {
    fn default() -> Self {
        Self {
            pages: default_build_dir(),
            assets: default_build_dir(),
            fallback: None,
            precompress: false,
            strict: true,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    #[serde(default = "default_config_dir")]
    config: String,
    #[serde(default = "default_content_dir")]
    content: String,
    #[serde(default = "default_lib_dir")]
    lib: String,
    #[serde(default = "default_themes_dir")]
    themes: String,
}

impl Default for RawPaths {
    fn default() -> Self {
        Self {
            config: default_config_dir(),
            content: default_content_dir(),
            lib: default_lib_dir(),
            themes: default_themes_dir(),
        }
    }
}

fn default_build_dir() -> String {
    "build".to_string()
}
fn default_config_dir() -> String {
    "config".to_string()
}
fn default_content_dir() -> String {
    "content".to_string()
}
fn default_lib_dir() -> String {
    "src/lib".to_string()
}
fn default_themes_dir() -> String {
    "themes".to_string()
}
fn default_true() -> bool {
    true
}
fn default_extensions() -> Vec<String> {
    vec![
        ".svelte.md".to_string(),
        ".md".to_string(),
        ".svx".to_string(),
    ]
}

impl RawManifest {
    fn validate(self) -> Result<Manifest, MalformedManifest> {
        let theme = self
            .theme
            .ok_or(MalformedManifest::MissingField { field: "theme" })?;
        let theme =
            ThemeId::new(theme).map_err(|e| MalformedManifest::invalid("theme", e.to_string()))?;

        let styling = self
            .styling
            .ok_or(MalformedManifest::MissingField { field: "styling" })?;
        let styling: StylingId = styling
            .parse()
            .map_err(|e: crate::ids::IdError| MalformedManifest::invalid("styling", e.to_string()))?;

        if self.adapter.pages.is_empty() {
            return Err(MalformedManifest::invalid(
                "adapter.pages",
                "output directory must not be empty",
            ));
        }
        if self.adapter.assets.is_empty() {
            return Err(MalformedManifest::invalid(
                "adapter.assets",
                "output directory must not be empty",
            ));
        }
        if let Some(fallback) = &self.adapter.fallback {
            if fallback.is_empty() {
                return Err(MalformedManifest::invalid(
                    "adapter.fallback",
                    "fallback page must not be empty; omit the field instead",
                ));
            }
        }

        let paths = PathRoots {
            config: self.paths.config,
            content: self.paths.content,
            lib: self.paths.lib,
            themes: self.paths.themes,
        };
        for (field, value) in paths.entries() {
            if value.is_empty() {
                return Err(MalformedManifest::invalid(field, "root must not be empty"));
            }
        }
        let entries = paths.entries();
        for (i, &(field, value)) in entries.iter().enumerate() {
            if entries[..i].iter().any(|&(_, other)| other == value) {
                return Err(MalformedManifest::invalid(
                    field,
                    format!("root `{value}` duplicates another alias root"),
                ));
            }
        }

        if self.markdown_extensions.is_empty() {
            return Err(MalformedManifest::invalid(
                "markdownExtensions",
                "at least one extension is required",
            ));
        }
        for ext in &self.markdown_extensions {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(MalformedManifest::invalid(
                    "markdownExtensions",
                    format!("extension `{ext}` must start with `.`"),
                ));
            }
        }

        Ok(Manifest {
            theme,
            styling,
            adapter: AdapterSettings {
                pages: self.adapter.pages,
                assets: self.adapter.assets,
                fallback: self.adapter.fallback,
                precompress: self.adapter.precompress,
                strict: self.adapter.strict,
            },
            paths,
            markdown_extensions: self.markdown_extensions,
        })
    }
}
