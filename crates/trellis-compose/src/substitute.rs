//! Placeholder substitution.
//!
//! Fills a variant's declared slots from the binding table and records the
//! structured summary the validator works from. Purely textual/structural:
//! values are pre-validated by the manifest model, nothing is evaluated.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use trellis_catalog::{ArtifactKind, BindingKey, PreprocessStage, TemplateVariant, TransformStage};

use crate::binding::BindingTable;

/// Role of an output directory declared by an artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRole {
    /// Prerendered pages directory
    Pages,
    /// Static assets directory
    Assets,
}

impl PathRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathRole::Pages => "pages",
            PathRole::Assets => "assets",
        }
    }
}

/// Structured facts an artifact declares, extracted during substitution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactSummary {
    /// Output directories declared through adapter slots
    pub output_paths: Vec<(PathRole, String)>,

    /// Alias name to target root, for every alias slot the body fills
    pub aliases: BTreeMap<String, String>,

    /// Declared preprocessing chain, in execution order
    pub preprocess: Vec<PreprocessStage>,

    /// Markdown transform stage order, for fragment-embedding artifacts
    pub transforms: Vec<TransformStage>,
}

/// The fully substituted form of one variant for one project.
#[derive(Debug, Clone)]
pub struct ComposedArtifact {
    /// Artifact kind
    pub kind: ArtifactKind,

    /// Final artifact text
    pub text: String,

    /// Summary used by the consistency validator
    pub summary: ArtifactSummary,
}

/// A template referenced a binding that does not exist.
///
/// This is a catalog defect, not a user error: composition aborts rather
/// than emitting partial output.
#[derive(Debug, thiserror::Error)]
#[error("template for `{kind}` references unbound placeholder `{name}`")]
pub struct UnboundPlaceholder {
    /// Artifact kind whose template is defective
    pub kind: ArtifactKind,
    /// Dotted placeholder name
    pub name: String,
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9._-]+)\s*\}\}").expect("valid pattern"))
}

/// Substitute a variant's slots from the binding table.
///
/// Every declared slot must bind; after substitution any residual
/// `{{ ... }}` token means the body references a slot the variant never
/// declared, which is reported the same way. Deterministic for identical
/// inputs.
pub fn substitute(
    variant: &TemplateVariant,
    table: &BindingTable,
) -> Result<ComposedArtifact, UnboundPlaceholder> {
    let mut text = variant.body.clone();
    let mut summary = ArtifactSummary {
        preprocess: variant.preprocess.clone(),
        ..ArtifactSummary::default()
    };

    for slot in &variant.slots {
        let value = table.get(*slot).ok_or_else(|| UnboundPlaceholder {
            kind: variant.kind,
            name: slot.as_str().to_string(),
        })?;

        let token = format!("{{{{ {} }}}}", slot.as_str());
        text = text.replace(&token, &value.render());

        match slot {
            BindingKey::AdapterPages => {
                if let Some(raw) = value.as_text() {
                    summary.output_paths.push((PathRole::Pages, raw.to_string()));
                }
            }
            BindingKey::AdapterAssets => {
                if let Some(raw) = value.as_text() {
                    summary.output_paths.push((PathRole::Assets, raw.to_string()));
                }
            }
            BindingKey::MarkdownFragment => {
                if let Some(fragment) = value.as_fragment() {
                    summary.transforms = fragment.stages().to_vec();
                }
            }
            _ => {
                if let (Some(alias), Some(raw)) = (slot.alias_name(), value.as_text()) {
                    summary.aliases.insert(alias.to_string(), raw.to_string());
                }
            }
        }
    }

    if let Some(found) = token_pattern().captures(&text) {
        return Err(UnboundPlaceholder {
            kind: variant.kind,
            name: found[1].to_string(),
        });
    }

    tracing::debug!(kind = %variant.kind, bytes = text.len(), "substituted variant");

    Ok(ComposedArtifact {
        kind: variant.kind,
        text,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingValue;
    use pretty_assertions::assert_eq;
    use trellis_catalog::{Applicability, SharedFragment};

    fn bundler_variant(body: &str, slots: Vec<BindingKey>) -> TemplateVariant {
        TemplateVariant {
            kind: ArtifactKind::Bundler,
            applicability: Applicability::Shared,
            slots,
            preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
            body: body.to_string(),
        }
    }

    fn table() -> BindingTable {
        let mut table = BindingTable::new();
        table.insert(BindingKey::AdapterPages, BindingValue::Text("build".into()));
        table.insert(BindingKey::AdapterAssets, BindingValue::Text("build".into()));
        table.insert(BindingKey::AliasLib, BindingValue::Text("src/lib".into()));
        table
    }

    #[test]
    fn fills_slots_and_records_the_summary() {
        let variant = bundler_variant(
            "pages: {{ adapter.pages }}, assets: {{ adapter.assets }}, $lib: {{ alias.lib }}",
            vec![
                BindingKey::AdapterPages,
                BindingKey::AdapterAssets,
                BindingKey::AliasLib,
            ],
        );

        let artifact = substitute(&variant, &table()).unwrap();

        assert_eq!(
            artifact.text,
            "pages: 'build', assets: 'build', $lib: 'src/lib'"
        );
        assert_eq!(
            artifact.summary.output_paths,
            vec![
                (PathRole::Pages, "build".to_string()),
                (PathRole::Assets, "build".to_string()),
            ]
        );
        assert_eq!(artifact.summary.aliases["$lib"], "src/lib");
        assert_eq!(
            artifact.summary.preprocess,
            vec![PreprocessStage::Markdown, PreprocessStage::Css]
        );
    }

    #[test]
    fn missing_binding_fails_with_the_slot_name() {
        let variant = bundler_variant(
            "pages: {{ adapter.pages }}",
            vec![BindingKey::AdapterPages],
        );

        let err = substitute(&variant, &BindingTable::new()).unwrap_err();
        assert_eq!(err.name, "adapter.pages");
        assert_eq!(err.kind, ArtifactKind::Bundler);
    }

    #[test]
    fn undeclared_token_in_the_body_is_a_catalog_defect() {
        let variant = bundler_variant(
            "pages: {{ adapter.pages }}, fallback: {{ adapter.fallback }}",
            vec![BindingKey::AdapterPages],
        );

        let err = substitute(&variant, &table()).unwrap_err();
        assert_eq!(err.name, "adapter.fallback");
    }

    #[test]
    fn fragment_slot_records_the_transform_order() {
        let fragment = SharedFragment::default();
        let mut table = BindingTable::new();
        table.insert(
            BindingKey::MarkdownFragment,
            BindingValue::Fragment(fragment.clone()),
        );

        let variant = TemplateVariant {
            kind: ArtifactKind::Markdown,
            applicability: Applicability::Shared,
            slots: vec![BindingKey::MarkdownFragment],
            preprocess: vec![PreprocessStage::Markdown],
            body: "config({\n{{ markdown.fragment }}\n})".to_string(),
        };

        let artifact = substitute(&variant, &table).unwrap();
        assert_eq!(artifact.summary.transforms, fragment.stages());
        assert!(artifact.text.contains("remarkPlugins"));
    }

    #[test]
    fn substitution_is_deterministic() {
        let variant = bundler_variant(
            "pages: {{ adapter.pages }}",
            vec![BindingKey::AdapterPages],
        );

        let first = substitute(&variant, &table()).unwrap();
        let second = substitute(&variant, &table()).unwrap();
        assert_eq!(first.text, second.text);
    }
}
