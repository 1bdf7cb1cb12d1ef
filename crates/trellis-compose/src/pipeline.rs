//! The composition pipeline.
//!
//! One synchronous pass per project-generation request: resolve variants,
//! build bindings, substitute, validate, emit. Every stage fails fast and
//! propagates the first error unchanged; a partially composed configuration
//! is worse than none.

use trellis_catalog::{ArtifactKind, NoVariant, SharedFragment, VariantRegistry};
use trellis_manifest::{MalformedManifest, Manifest, ManifestFormat};

use crate::binding::BindingTable;
use crate::emit::{emit, EmittedArtifact};
use crate::substitute::{substitute, UnboundPlaceholder};
use crate::validate::{validate, ConsistencyError};

/// Any error a composition run can surface.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error(transparent)]
    Manifest(#[from] MalformedManifest),

    #[error(transparent)]
    Resolve(#[from] NoVariant),

    #[error(transparent)]
    Substitute(#[from] UnboundPlaceholder),

    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}

/// Compose the full artifact set for a loaded manifest.
///
/// The registry and base fragment are passed in explicitly; both are
/// read-only, so concurrent runs can share them freely. The fragment is
/// specialized with the manifest's extension list before any substitution,
/// which keeps every markdown-capable artifact on the same fragment value.
pub fn compose(
    registry: &VariantRegistry,
    fragment: &SharedFragment,
    manifest: &Manifest,
) -> Result<Vec<EmittedArtifact>, ComposeError> {
    let fragment = fragment
        .clone()
        .with_extensions(manifest.markdown_extensions.clone());
    let table = BindingTable::from_manifest(manifest, &fragment);

    let mut artifacts = Vec::with_capacity(ArtifactKind::ALL.len());
    for kind in ArtifactKind::ALL {
        let variant = registry.resolve(&manifest.theme, manifest.styling, kind)?;
        artifacts.push(substitute(variant, &table)?);
    }

    validate(manifest, &artifacts)?;

    tracing::info!(
        theme = %manifest.theme,
        styling = %manifest.styling,
        count = artifacts.len(),
        "composed artifact set"
    );

    Ok(emit(artifacts))
}

/// Load a manifest from raw source text and compose its artifact set.
pub fn compose_source(
    registry: &VariantRegistry,
    fragment: &SharedFragment,
    source: &str,
    format: ManifestFormat,
) -> Result<Vec<EmittedArtifact>, ComposeError> {
    let manifest = Manifest::load(source, format)?;
    compose(registry, fragment, &manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trellis_catalog::TransformStage;

    const SCENARIO: &str = r#"{
        "theme": "sveltin",
        "styling": "tailwindcss",
        "adapter": {"pages": "build", "assets": "build"},
        "paths": {"lib": "src/lib"}
    }"#;

    fn builtin() -> (VariantRegistry, SharedFragment) {
        (VariantRegistry::builtin(), SharedFragment::default())
    }

    #[test]
    fn composes_the_default_scenario() {
        let (registry, fragment) = builtin();
        let manifest = Manifest::from_json_str(SCENARIO).unwrap();

        let artifacts = compose(&registry, &fragment, &manifest).unwrap();

        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].kind, ArtifactKind::Bundler);
        assert_eq!(artifacts[1].kind, ArtifactKind::CssPipeline);
        assert_eq!(artifacts[2].kind, ArtifactKind::Markdown);

        let bundler = &artifacts[0].text;
        assert!(bundler.contains("pages: 'build'"));
        assert!(bundler.contains("assets: 'build'"));
        assert!(bundler.contains("$lib: path.resolve('src/lib')"));
        assert!(bundler.contains("fallback: null"));

        assert!(artifacts[1].text.contains("tailwindcss"));
        assert!(artifacts[2].text.contains("remarkPlugins"));
    }

    #[test]
    fn composition_is_deterministic() {
        let (registry, fragment) = builtin();
        let manifest = Manifest::from_json_str(SCENARIO).unwrap();

        let first = compose(&registry, &fragment, &manifest).unwrap();
        let second = compose(&registry, &fragment, &manifest).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_theme_composes_from_shared_defaults() {
        let (registry, fragment) = builtin();
        let manifest = Manifest::from_json_str(
            r#"{"theme": "unknown-theme", "styling": "tailwindcss"}"#,
        )
        .unwrap();

        let artifacts = compose(&registry, &fragment, &manifest).unwrap();
        assert_eq!(artifacts.len(), 3);
        assert!(artifacts[0].text.contains("pages: 'build'"));
    }

    #[test]
    fn fragment_reorder_propagates_to_the_markdown_artifact() {
        let registry = VariantRegistry::builtin();
        let manifest = Manifest::from_json_str(SCENARIO).unwrap();

        let default_order = compose(&registry, &SharedFragment::default(), &manifest).unwrap();

        let reordered = SharedFragment::new(
            vec![
                TransformStage::EmojiExpansion,
                TransformStage::SlugAssignment,
                TransformStage::ReadingTime,
                TransformStage::RelativeImages,
                TransformStage::HeadingAutolink,
                TransformStage::ExternalLinks,
            ],
            vec![],
        );
        let swapped = compose(&registry, &reordered, &manifest).unwrap();

        let markdown_default = &default_order[2].text;
        let markdown_swapped = &swapped[2].text;
        assert!(markdown_default.contains("[remarkSlug, emoji,"));
        assert!(markdown_swapped.contains("[emoji, remarkSlug,"));
    }

    #[test]
    fn manifest_extensions_reach_the_markdown_artifact() {
        let (registry, fragment) = builtin();
        let manifest = Manifest::from_json_str(
            r#"{
                "theme": "sveltin",
                "styling": "tailwindcss",
                "markdownExtensions": [".markdown"]
            }"#,
        )
        .unwrap();

        let artifacts = compose(&registry, &fragment, &manifest).unwrap();
        assert!(artifacts[2].text.contains("extensions: ['.markdown']"));
    }

    #[test]
    fn missing_variant_tier_surfaces_no_variant() {
        let registry = VariantRegistry::new(vec![]);
        let manifest = Manifest::from_json_str(SCENARIO).unwrap();

        let err = compose(&registry, &SharedFragment::default(), &manifest).unwrap_err();
        assert!(matches!(err, ComposeError::Resolve(_)));
    }

    #[test]
    fn compose_source_rejects_malformed_manifests() {
        let (registry, fragment) = builtin();

        let err = compose_source(
            &registry,
            &fragment,
            r#"{"styling": "tailwindcss"}"#,
            ManifestFormat::Json,
        )
        .unwrap_err();

        match err {
            ComposeError::Manifest(inner) => assert_eq!(inner.field(), Some("theme")),
            other => panic!("expected a manifest error, got {other}"),
        }
    }

    #[test]
    fn blank_theme_inlines_the_extension_list() {
        let (registry, fragment) = builtin();
        let manifest =
            Manifest::from_json_str(r#"{"theme": "blank", "styling": "vanillacss"}"#).unwrap();

        let artifacts = compose(&registry, &fragment, &manifest).unwrap();
        assert!(artifacts[0]
            .text
            .contains("...['.svelte.md', '.md', '.svx']"));
    }
}
