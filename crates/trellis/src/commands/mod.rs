//! CLI subcommands.

pub mod check;
pub mod compose;
pub mod init;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use trellis_manifest::{Manifest, ManifestFormat};

/// Read and load the project manifest, picking the format from the extension.
pub(crate) fn load_manifest(path: &Path) -> Result<Manifest> {
    let format = ManifestFormat::from_path(path).with_context(|| {
        format!(
            "Cannot tell the manifest format of {}; expected .json, .toml, .yaml or .yml",
            path.display()
        )
    })?;

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;

    Manifest::load(&source, format)
        .with_context(|| format!("Failed to load manifest {}", path.display()))
}
