//! Template variant definitions.
//!
//! A variant is a data record tagged by artifact kind and applicability tier,
//! not a type hierarchy: the registry grows by adding records, never by
//! subclassing per theme or framework.

use std::fmt;

use trellis_manifest::{StylingId, ThemeId};

/// The kind of build-configuration artifact a variant produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Bundler/framework config (svelte.config.js)
    Bundler,
    /// CSS-pipeline config (postcss/tailwind/uno config)
    CssPipeline,
    /// Markdown-preprocessing config (mdsvex.config.js)
    Markdown,
}

impl ArtifactKind {
    /// Every artifact kind a composition run must produce.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::Bundler,
        ArtifactKind::CssPipeline,
        ArtifactKind::Markdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::Bundler => "bundler",
            ArtifactKind::CssPipeline => "css-pipeline",
            ArtifactKind::Markdown => "markdown",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which (theme, styling) cells a variant applies to.
///
/// Resolution walks the tiers most-specific first: an exact cell, then the
/// theme's default, then the shared (theme-independent) default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applicability {
    /// Applies to exactly one (theme, styling) pair
    Exact { theme: ThemeId, styling: StylingId },
    /// Applies to every styling under one theme
    ThemeDefault { theme: ThemeId },
    /// Theme-independent fallback
    Shared,
}

/// A preprocessing stage a variant declares in its pipeline, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessStage {
    /// Markdown-to-component preprocessing (mdsvex)
    Markdown,
    /// CSS preprocessing (postcss/scss)
    Css,
}

/// A placeholder slot a template body may reference.
///
/// Closed set by design: an unbound placeholder is a catalog defect that
/// tests can detect statically rather than a generation-time surprise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BindingKey {
    AdapterPages,
    AdapterAssets,
    AdapterFallback,
    AdapterPrecompress,
    AdapterStrict,
    AliasConfig,
    AliasContent,
    AliasLib,
    AliasThemes,
    MarkdownExtensions,
    /// Reserved slot for the shared markdown fragment
    MarkdownFragment,
}

impl BindingKey {
    pub const ALL: [BindingKey; 11] = [
        BindingKey::AdapterPages,
        BindingKey::AdapterAssets,
        BindingKey::AdapterFallback,
        BindingKey::AdapterPrecompress,
        BindingKey::AdapterStrict,
        BindingKey::AliasConfig,
        BindingKey::AliasContent,
        BindingKey::AliasLib,
        BindingKey::AliasThemes,
        BindingKey::MarkdownExtensions,
        BindingKey::MarkdownFragment,
    ];

    /// Canonical dotted name as written in template bodies.
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKey::AdapterPages => "adapter.pages",
            BindingKey::AdapterAssets => "adapter.assets",
            BindingKey::AdapterFallback => "adapter.fallback",
            BindingKey::AdapterPrecompress => "adapter.precompress",
            BindingKey::AdapterStrict => "adapter.strict",
            BindingKey::AliasConfig => "alias.config",
            BindingKey::AliasContent => "alias.content",
            BindingKey::AliasLib => "alias.lib",
            BindingKey::AliasThemes => "alias.themes",
            BindingKey::MarkdownExtensions => "markdown.extensions",
            BindingKey::MarkdownFragment => "markdown.fragment",
        }
    }

    /// Look up a key from its dotted name.
    pub fn from_name(name: &str) -> Option<BindingKey> {
        BindingKey::ALL.into_iter().find(|k| k.as_str() == name)
    }

    /// The alias this key declares in the generated project, if it is one.
    pub fn alias_name(&self) -> Option<&'static str> {
        match self {
            BindingKey::AliasConfig => Some("$config"),
            BindingKey::AliasContent => Some("$content"),
            BindingKey::AliasLib => Some("$lib"),
            BindingKey::AliasThemes => Some("$themes"),
            _ => None,
        }
    }
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable template for one artifact kind.
#[derive(Debug, Clone)]
pub struct TemplateVariant {
    /// Artifact kind this template produces
    pub kind: ArtifactKind,

    /// Which (theme, styling) cells it applies to
    pub applicability: Applicability,

    /// Placeholder slots the body references, in order of appearance
    pub slots: Vec<BindingKey>,

    /// Declared preprocessing chain, in execution order
    pub preprocess: Vec<PreprocessStage>,

    /// Raw template body with `{{ key }}` placeholders
    pub body: String,
}
