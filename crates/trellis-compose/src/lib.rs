//! Variant composition and consistency validation for trellis.
//!
//! Takes a loaded manifest plus the variant registry and shared fragment,
//! substitutes manifest-derived values into the selected templates, checks
//! the resulting artifact set for structural conflicts, and orders it for
//! writing.

pub mod binding;
pub mod emit;
pub mod pipeline;
pub mod substitute;
pub mod validate;

pub use binding::{BindingTable, BindingValue};
pub use emit::{emit, EmittedArtifact};
pub use pipeline::{compose, compose_source, ComposeError};
pub use substitute::{
    substitute, ArtifactSummary, ComposedArtifact, PathRole, UnboundPlaceholder,
};
pub use validate::{validate, ConsistencyError};
