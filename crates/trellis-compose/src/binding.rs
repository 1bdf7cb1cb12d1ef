//! Binding table construction and value rendering.

use std::collections::BTreeMap;

use trellis_catalog::{BindingKey, SharedFragment};
use trellis_manifest::Manifest;

/// A value a placeholder slot can be filled with.
///
/// Values render to JavaScript-config source text, so a template slot always
/// stands in for a complete expression (`'build'`, `null`, `true`, a list).
#[derive(Debug, Clone, PartialEq)]
pub enum BindingValue {
    /// A quoted string
    Text(String),
    /// A bare boolean
    Flag(bool),
    /// A quoted string or `null`
    Nullable(Option<String>),
    /// A list of quoted strings
    List(Vec<String>),
    /// The shared markdown fragment, rendered in place
    Fragment(SharedFragment),
}

impl BindingValue {
    /// Render the value as it appears in the emitted artifact.
    pub fn render(&self) -> String {
        match self {
            BindingValue::Text(s) => quote_js(s),
            BindingValue::Flag(b) => b.to_string(),
            BindingValue::Nullable(None) => "null".to_string(),
            BindingValue::Nullable(Some(s)) => quote_js(s),
            BindingValue::List(items) => trellis_catalog::fragment::render_string_list(items),
            BindingValue::Fragment(fragment) => fragment.render(),
        }
    }

    /// The raw string behind a textual value, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BindingValue::Text(s) => Some(s),
            BindingValue::Nullable(Some(s)) => Some(s),
            _ => None,
        }
    }

    /// The shared fragment, if this value carries it.
    pub fn as_fragment(&self) -> Option<&SharedFragment> {
        match self {
            BindingValue::Fragment(fragment) => Some(fragment),
            _ => None,
        }
    }
}

fn quote_js(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Mapping from placeholder key to its value for one composition run.
///
/// Keys are unique by construction; iteration order is stable.
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: BTreeMap<BindingKey, BindingValue>,
}

impl BindingTable {
    /// An empty table. Mostly useful in tests; real runs use
    /// [`BindingTable::from_manifest`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full table for a run from the manifest and the run's
    /// shared fragment.
    pub fn from_manifest(manifest: &Manifest, fragment: &SharedFragment) -> Self {
        let mut table = Self::new();
        table.insert(
            BindingKey::AdapterPages,
            BindingValue::Text(manifest.adapter.pages.clone()),
        );
        table.insert(
            BindingKey::AdapterAssets,
            BindingValue::Text(manifest.adapter.assets.clone()),
        );
        table.insert(
            BindingKey::AdapterFallback,
            BindingValue::Nullable(manifest.adapter.fallback.clone()),
        );
        table.insert(
            BindingKey::AdapterPrecompress,
            BindingValue::Flag(manifest.adapter.precompress),
        );
        table.insert(
            BindingKey::AdapterStrict,
            BindingValue::Flag(manifest.adapter.strict),
        );
        table.insert(
            BindingKey::AliasConfig,
            BindingValue::Text(manifest.paths.config.clone()),
        );
        table.insert(
            BindingKey::AliasContent,
            BindingValue::Text(manifest.paths.content.clone()),
        );
        table.insert(
            BindingKey::AliasLib,
            BindingValue::Text(manifest.paths.lib.clone()),
        );
        table.insert(
            BindingKey::AliasThemes,
            BindingValue::Text(manifest.paths.themes.clone()),
        );
        table.insert(
            BindingKey::MarkdownExtensions,
            BindingValue::List(manifest.markdown_extensions.clone()),
        );
        table.insert(
            BindingKey::MarkdownFragment,
            BindingValue::Fragment(fragment.clone()),
        );
        table
    }

    /// Insert or replace a binding.
    pub fn insert(&mut self, key: BindingKey, value: BindingValue) {
        self.entries.insert(key, value);
    }

    /// Remove a binding, returning it if present.
    pub fn remove(&mut self, key: BindingKey) -> Option<BindingValue> {
        self.entries.remove(&key)
    }

    /// Look up a binding.
    pub fn get(&self, key: BindingKey) -> Option<&BindingValue> {
        self.entries.get(&key)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
