//! Template variant catalog for trellis.
//!
//! This crate holds the catalog of build-configuration templates (one per
//! theme/styling/artifact-kind cell, with tiered fallbacks), the shared
//! markdown-preprocessing fragment every variant embeds, and the registry
//! that resolves a manifest's choices to concrete templates.

pub mod builtin;
pub mod fragment;
pub mod registry;
pub mod variant;

pub use fragment::{SharedFragment, StagePhase, TransformStage};
pub use registry::{NoVariant, VariantRegistry};
pub use variant::{Applicability, ArtifactKind, BindingKey, PreprocessStage, TemplateVariant};
