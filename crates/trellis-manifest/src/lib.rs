//! Project manifest model for trellis.
//!
//! This crate provides the typed representation of a project's persisted
//! configuration choices (theme, styling framework, adapter settings, alias
//! roots) and loaders for the JSON/TOML/YAML sources it is stored in.

pub mod ids;
pub mod manifest;

pub use ids::{IdError, StylingId, ThemeId};
pub use manifest::{AdapterSettings, MalformedManifest, Manifest, ManifestFormat, PathRoots};
