//! Compose without writing, reporting any inconsistency.

use std::path::Path;

use anyhow::Result;
use trellis_catalog::{SharedFragment, VariantRegistry};
use trellis_compose::{compose, ComposeError};

use super::load_manifest;

/// Run the check command.
pub fn run(manifest_path: &Path) -> Result<()> {
    let manifest = load_manifest(manifest_path)?;

    let registry = VariantRegistry::builtin();
    let fragment = SharedFragment::default();

    match compose(&registry, &fragment, &manifest) {
        Ok(artifacts) => {
            for artifact in &artifacts {
                tracing::info!("{}: ok ({} bytes)", artifact.kind, artifact.text.len());
            }
            tracing::info!(
                "Configuration for theme `{}` with `{}` is consistent",
                manifest.theme,
                manifest.styling
            );
            Ok(())
        }
        Err(err) => {
            let hint = hint_for(&err);
            Err(anyhow::anyhow!(err).context(hint))
        }
    }
}

fn hint_for(err: &ComposeError) -> &'static str {
    match err {
        ComposeError::Manifest(_) => "Fix the project manifest and run check again",
        ComposeError::Resolve(_) => {
            "The requested theme/styling pair has no catalog coverage at any fallback tier"
        }
        ComposeError::Substitute(_) => {
            "A catalog template references an unknown binding; this is a trellis defect"
        }
        ComposeError::Consistency(_) => {
            "The selected variants produce a conflicting configuration; adjust the manifest"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn passes_for_a_valid_manifest() {
        let temp = tempdir().unwrap();
        let manifest_path = temp.path().join("trellis.json");
        fs::write(
            &manifest_path,
            r#"{"theme": "sveltin", "styling": "unocss"}"#,
        )
        .unwrap();

        run(&manifest_path).unwrap();
    }

    #[test]
    fn fails_for_a_malformed_manifest() {
        let temp = tempdir().unwrap();
        let manifest_path = temp.path().join("trellis.json");
        fs::write(&manifest_path, r#"{"styling": "unocss"}"#).unwrap();

        assert!(run(&manifest_path).is_err());
    }
}
