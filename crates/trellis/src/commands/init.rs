//! Initialize a project manifest.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(dir: &Path, yes: bool) -> Result<()> {
    let manifest_path = dir.join("trellis.json");

    if manifest_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            manifest_path.display()
        );
        return Ok(());
    }

    fs::write(&manifest_path, DEFAULT_MANIFEST).context("Failed to write trellis.json")?;
    tracing::info!("Created {}", manifest_path.display());
    tracing::info!("Run 'trellis compose' to generate the build configuration.");

    Ok(())
}

const DEFAULT_MANIFEST: &str = r#"{
	"theme": "sveltin",
	"styling": "tailwindcss",
	"adapter": {
		"pages": "build",
		"assets": "build",
		"fallback": null,
		"precompress": false,
		"strict": true
	},
	"paths": {
		"config": "config",
		"content": "content",
		"lib": "src/lib",
		"themes": "themes"
	},
	"markdownExtensions": [".svelte.md", ".md", ".svx"]
}
"#;
