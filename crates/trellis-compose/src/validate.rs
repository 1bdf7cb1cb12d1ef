//! Cross-artifact consistency validation.
//!
//! The only guard against silent drift between independently edited template
//! variants. Runs after every substitution, never skipped; conflicts are
//! surfaced, never patched.

use trellis_catalog::{ArtifactKind, PreprocessStage};
use trellis_manifest::Manifest;

use crate::substitute::{ComposedArtifact, PathRole};

/// A structural conflict in a fully substituted artifact set.
#[derive(Debug, thiserror::Error)]
pub enum ConsistencyError {
    #[error("output directory `{inner}` is nested inside `{outer}` and would be overwritten")]
    NestedOutputPaths { outer: String, inner: String },

    #[error("artifacts disagree on the {role} output directory: `{first}` vs `{second}`")]
    OutputPathMismatch {
        role: &'static str,
        first: String,
        second: String,
    },

    #[error("alias `{alias}` points at `{target}`, which is not a declared root directory")]
    UnresolvedAlias { alias: String, target: String },

    #[error("alias `{alias}` is declared twice with different targets: `{first}` vs `{second}`")]
    AliasConflict {
        alias: String,
        first: String,
        second: String,
    },

    #[error("`{kind}` artifact runs a CSS stage before the markdown stage")]
    StageOrder { kind: ArtifactKind },

    #[error("more than one CSS-pipeline artifact selected for a single run")]
    MultipleStylingPipelines,

    #[error("no CSS-pipeline artifact selected for this run")]
    MissingStylingPipeline,
}

/// Validate a substituted artifact set against the manifest it came from.
pub fn validate(
    manifest: &Manifest,
    artifacts: &[ComposedArtifact],
) -> Result<(), ConsistencyError> {
    check_styling_exclusivity(artifacts)?;
    check_path_agreement(artifacts)?;
    check_alias_resolvability(manifest, artifacts)?;
    check_stage_order(artifacts)?;

    tracing::debug!(count = artifacts.len(), "artifact set is consistent");
    Ok(())
}

fn check_styling_exclusivity(artifacts: &[ComposedArtifact]) -> Result<(), ConsistencyError> {
    let pipelines = artifacts
        .iter()
        .filter(|a| a.kind == ArtifactKind::CssPipeline)
        .count();
    match pipelines {
        0 => Err(ConsistencyError::MissingStylingPipeline),
        1 => Ok(()),
        _ => Err(ConsistencyError::MultipleStylingPipelines),
    }
}

fn check_path_agreement(artifacts: &[ComposedArtifact]) -> Result<(), ConsistencyError> {
    let mut pages: Option<&str> = None;
    let mut assets: Option<&str> = None;

    for artifact in artifacts {
        for (role, path) in &artifact.summary.output_paths {
            let seen = match role {
                PathRole::Pages => &mut pages,
                PathRole::Assets => &mut assets,
            };
            match seen {
                Some(first) if *first != path => {
                    return Err(ConsistencyError::OutputPathMismatch {
                        role: role.as_str(),
                        first: first.to_string(),
                        second: path.clone(),
                    });
                }
                Some(_) => {}
                None => *seen = Some(path),
            }
        }
    }

    if let (Some(pages), Some(assets)) = (pages, assets) {
        // Equal directories are the adapter default; only strict nesting
        // makes one output clobber the other.
        if is_nested_inside(pages, assets) {
            return Err(ConsistencyError::NestedOutputPaths {
                outer: pages.to_string(),
                inner: assets.to_string(),
            });
        }
        if is_nested_inside(assets, pages) {
            return Err(ConsistencyError::NestedOutputPaths {
                outer: assets.to_string(),
                inner: pages.to_string(),
            });
        }
    }

    Ok(())
}

/// Whether `inner` is a strict path-component descendant of `outer`.
fn is_nested_inside(outer: &str, inner: &str) -> bool {
    let outer = outer.trim_end_matches('/');
    let inner = inner.trim_end_matches('/');
    inner.len() > outer.len()
        && inner.starts_with(outer)
        && inner.as_bytes()[outer.len()] == b'/'
}

fn check_alias_resolvability(
    manifest: &Manifest,
    artifacts: &[ComposedArtifact],
) -> Result<(), ConsistencyError> {
    let roots: Vec<&str> = manifest
        .paths
        .entries()
        .iter()
        .map(|(_, root)| *root)
        .collect();

    let mut seen: std::collections::BTreeMap<&str, &str> = std::collections::BTreeMap::new();

    for artifact in artifacts {
        for (alias, target) in &artifact.summary.aliases {
            if !roots.contains(&target.as_str()) {
                return Err(ConsistencyError::UnresolvedAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
            match seen.get(alias.as_str()) {
                Some(first) if *first != target => {
                    return Err(ConsistencyError::AliasConflict {
                        alias: alias.clone(),
                        first: first.to_string(),
                        second: target.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    seen.insert(alias, target);
                }
            }
        }
    }

    Ok(())
}

fn check_stage_order(artifacts: &[ComposedArtifact]) -> Result<(), ConsistencyError> {
    for artifact in artifacts {
        let mut css_seen = false;
        for stage in &artifact.summary.preprocess {
            match stage {
                PreprocessStage::Css => css_seen = true,
                // Markdown output can introduce CSS-relevant markup, so the
                // CSS stage has to see it.
                PreprocessStage::Markdown if css_seen => {
                    return Err(ConsistencyError::StageOrder {
                        kind: artifact.kind,
                    });
                }
                PreprocessStage::Markdown => {}
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substitute::ArtifactSummary;
    use trellis_manifest::Manifest;

    fn manifest() -> Manifest {
        Manifest::from_json_str(r#"{"theme": "sveltin", "styling": "tailwindcss"}"#).unwrap()
    }

    fn artifact(kind: ArtifactKind, summary: ArtifactSummary) -> ComposedArtifact {
        ComposedArtifact {
            kind,
            text: String::new(),
            summary,
        }
    }

    fn css_artifact() -> ComposedArtifact {
        artifact(
            ArtifactKind::CssPipeline,
            ArtifactSummary {
                preprocess: vec![PreprocessStage::Css],
                ..ArtifactSummary::default()
            },
        )
    }

    #[test]
    fn accepts_a_consistent_set() {
        let bundler = artifact(
            ArtifactKind::Bundler,
            ArtifactSummary {
                output_paths: vec![
                    (PathRole::Pages, "build".to_string()),
                    (PathRole::Assets, "build".to_string()),
                ],
                aliases: [("$lib".to_string(), "src/lib".to_string())].into(),
                preprocess: vec![PreprocessStage::Markdown, PreprocessStage::Css],
                transforms: vec![],
            },
        );

        validate(&manifest(), &[bundler, css_artifact()]).unwrap();
    }

    #[test]
    fn rejects_two_css_pipelines() {
        let err = validate(&manifest(), &[css_artifact(), css_artifact()]).unwrap_err();
        assert!(matches!(err, ConsistencyError::MultipleStylingPipelines));
    }

    #[test]
    fn rejects_a_set_without_a_css_pipeline() {
        let bundler = artifact(ArtifactKind::Bundler, ArtifactSummary::default());
        let err = validate(&manifest(), &[bundler]).unwrap_err();
        assert!(matches!(err, ConsistencyError::MissingStylingPipeline));
    }

    #[test]
    fn rejects_nested_output_directories() {
        let bundler = artifact(
            ArtifactKind::Bundler,
            ArtifactSummary {
                output_paths: vec![
                    (PathRole::Pages, "build".to_string()),
                    (PathRole::Assets, "build/assets".to_string()),
                ],
                ..ArtifactSummary::default()
            },
        );

        let err = validate(&manifest(), &[bundler, css_artifact()]).unwrap_err();
        assert!(matches!(err, ConsistencyError::NestedOutputPaths { .. }));
    }

    #[test]
    fn sibling_directories_with_a_common_prefix_are_fine() {
        assert!(!is_nested_inside("build", "build-assets"));
        assert!(is_nested_inside("build", "build/assets"));
        assert!(!is_nested_inside("build", "build"));
    }

    #[test]
    fn rejects_disagreeing_duplicate_path_declarations() {
        let first = artifact(
            ArtifactKind::Bundler,
            ArtifactSummary {
                output_paths: vec![(PathRole::Pages, "build".to_string())],
                ..ArtifactSummary::default()
            },
        );
        let second = artifact(
            ArtifactKind::Markdown,
            ArtifactSummary {
                output_paths: vec![(PathRole::Pages, "dist".to_string())],
                ..ArtifactSummary::default()
            },
        );

        let err = validate(&manifest(), &[first, second, css_artifact()]).unwrap_err();
        assert!(matches!(err, ConsistencyError::OutputPathMismatch { .. }));
    }

    #[test]
    fn rejects_an_alias_outside_the_declared_roots() {
        let bundler = artifact(
            ArtifactKind::Bundler,
            ArtifactSummary {
                aliases: [("$lib".to_string(), "vendor/lib".to_string())].into(),
                ..ArtifactSummary::default()
            },
        );

        let err = validate(&manifest(), &[bundler, css_artifact()]).unwrap_err();
        assert!(matches!(err, ConsistencyError::UnresolvedAlias { .. }));
    }

    #[test]
    fn rejects_the_same_alias_with_different_targets() {
        let first = artifact(
            ArtifactKind::Bundler,
            ArtifactSummary {
                aliases: [("$content".to_string(), "content".to_string())].into(),
                ..ArtifactSummary::default()
            },
        );
        let second = artifact(
            ArtifactKind::CssPipeline,
            ArtifactSummary {
                aliases: [("$content".to_string(), "config".to_string())].into(),
                preprocess: vec![PreprocessStage::Css],
                ..ArtifactSummary::default()
            },
        );

        let err = validate(&manifest(), &[first, second]).unwrap_err();
        assert!(matches!(err, ConsistencyError::AliasConflict { .. }));
    }

    #[test]
    fn rejects_css_preprocessing_ahead_of_markdown() {
        let bundler = artifact(
            ArtifactKind::Bundler,
            ArtifactSummary {
                preprocess: vec![PreprocessStage::Css, PreprocessStage::Markdown],
                ..ArtifactSummary::default()
            },
        );

        let err = validate(&manifest(), &[bundler, css_artifact()]).unwrap_err();
        assert!(matches!(
            err,
            ConsistencyError::StageOrder {
                kind: ArtifactKind::Bundler
            }
        ));
    }
}
