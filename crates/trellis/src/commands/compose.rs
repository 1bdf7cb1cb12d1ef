//! Compose and write the artifact set.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use trellis_catalog::{ArtifactKind, SharedFragment, VariantRegistry};
use trellis_compose::compose;
use trellis_manifest::StylingId;

use super::load_manifest;

/// Run the compose command.
pub fn run(manifest_path: &Path, output: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;

    let registry = VariantRegistry::builtin();
    let fragment = SharedFragment::default();

    let artifacts = compose(&registry, &fragment, &manifest)
        .with_context(|| format!("Failed to compose configuration for theme `{}`", manifest.theme))?;

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory {}", output.display()))?;

    for artifact in &artifacts {
        let file_name = artifact_file_name(artifact.kind, manifest.styling);
        let path = output.join(file_name);
        fs::write(&path, &artifact.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {}", path.display());
    }

    tracing::info!(
        "Composed {} artifacts for theme `{}` with `{}`",
        artifacts.len(),
        manifest.theme,
        manifest.styling
    );

    Ok(())
}

/// Conventional file name for an artifact in the generated project tree.
///
/// This mapping belongs to the file writer, not the composition core: the
/// core only guarantees kinds and text.
pub(crate) fn artifact_file_name(kind: ArtifactKind, styling: StylingId) -> &'static str {
    match kind {
        ArtifactKind::Bundler => "svelte.config.js",
        ArtifactKind::Markdown => "mdsvex.config.js",
        ArtifactKind::CssPipeline => match styling {
            StylingId::TailwindCss => "tailwind.config.cjs",
            StylingId::UnoCss => "uno.config.ts",
            _ => "postcss.config.cjs",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_the_three_artifacts() {
        let temp = tempdir().unwrap();
        let manifest_path = temp.path().join("trellis.json");
        fs::write(
            &manifest_path,
            r#"{"theme": "sveltin", "styling": "tailwindcss"}"#,
        )
        .unwrap();

        let output = temp.path().join("out");
        run(&manifest_path, &output).unwrap();

        assert!(output.join("svelte.config.js").exists());
        assert!(output.join("tailwind.config.cjs").exists());
        assert!(output.join("mdsvex.config.js").exists());

        let bundler = fs::read_to_string(output.join("svelte.config.js")).unwrap();
        assert!(bundler.contains("pages: 'build'"));
    }

    #[test]
    fn css_pipeline_file_name_follows_the_styling() {
        assert_eq!(
            artifact_file_name(ArtifactKind::CssPipeline, StylingId::UnoCss),
            "uno.config.ts"
        );
        assert_eq!(
            artifact_file_name(ArtifactKind::CssPipeline, StylingId::Scss),
            "postcss.config.cjs"
        );
    }

    #[test]
    fn toml_manifests_load_by_extension() {
        let temp = tempdir().unwrap();
        let manifest_path = temp.path().join("trellis.toml");
        fs::write(&manifest_path, "theme = \"blank\"\nstyling = \"scss\"\n").unwrap();

        let output = temp.path().join("out");
        run(&manifest_path, &output).unwrap();
        assert!(output.join("postcss.config.cjs").exists());
    }
}
