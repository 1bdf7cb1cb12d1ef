//! Artifact emission.
//!
//! Pure formatting/ordering step. By contract it only ever receives a
//! validated set.

use trellis_catalog::ArtifactKind;

use crate::substitute::ComposedArtifact;

/// One emitted configuration unit, ready for the file-writer collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedArtifact {
    /// Artifact kind
    pub kind: ArtifactKind,

    /// Final text
    pub text: String,
}

fn rank(kind: ArtifactKind) -> usize {
    match kind {
        ArtifactKind::Bundler => 0,
        ArtifactKind::CssPipeline => 1,
        ArtifactKind::Markdown => 2,
    }
}

/// Order a validated artifact set for writing.
///
/// Bundler config first, then CSS pipeline, then markdown preprocessing;
/// artifacts of the same kind keep their relative order. Stable across runs
/// so downstream file writing is reproducible.
pub fn emit(artifacts: Vec<ComposedArtifact>) -> Vec<EmittedArtifact> {
    let mut ordered: Vec<ComposedArtifact> = artifacts;
    ordered.sort_by_key(|a| rank(a.kind));
    ordered
        .into_iter()
        .map(|a| EmittedArtifact {
            kind: a.kind,
            text: a.text,
        })
        .collect()
}
