//! Variant registry with tiered fallback resolution.

use trellis_manifest::{StylingId, ThemeId};

use crate::variant::{Applicability, ArtifactKind, TemplateVariant};

/// An immutable catalog of template variants.
///
/// Constructed once before any composition run and passed in explicitly, so
/// concurrent runs share it without coordination and tests can build their
/// own catalogs.
#[derive(Debug, Clone)]
pub struct VariantRegistry {
    variants: Vec<TemplateVariant>,
}

impl VariantRegistry {
    /// Build a registry from an explicit variant list.
    pub fn new(variants: Vec<TemplateVariant>) -> Self {
        Self { variants }
    }

    /// The registry shipped with trellis.
    pub fn builtin() -> Self {
        Self::new(crate::builtin::variants())
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Resolve the variant for a (theme, styling, kind) request.
    ///
    /// Falls back tier by tier: the exact (theme, styling) cell, then the
    /// theme default, then the shared default. Only a miss at every tier is
    /// an error, which lets the matrix grow without populating every cell.
    pub fn resolve(
        &self,
        theme: &ThemeId,
        styling: StylingId,
        kind: ArtifactKind,
    ) -> Result<&TemplateVariant, NoVariant> {
        let exact = self.variants.iter().find(|v| {
            v.kind == kind
                && matches!(&v.applicability, Applicability::Exact { theme: t, styling: s }
                    if t == theme && *s == styling)
        });
        if let Some(variant) = exact {
            tracing::debug!(%theme, %styling, %kind, tier = "exact", "resolved variant");
            return Ok(variant);
        }

        let theme_default = self.variants.iter().find(|v| {
            v.kind == kind
                && matches!(&v.applicability, Applicability::ThemeDefault { theme: t } if t == theme)
        });
        if let Some(variant) = theme_default {
            tracing::debug!(%theme, %styling, %kind, tier = "theme-default", "resolved variant");
            return Ok(variant);
        }

        let shared = self
            .variants
            .iter()
            .find(|v| v.kind == kind && v.applicability == Applicability::Shared);
        if let Some(variant) = shared {
            tracing::debug!(%theme, %styling, %kind, tier = "shared", "resolved variant");
            return Ok(variant);
        }

        Err(NoVariant {
            theme: theme.clone(),
            styling,
            kind,
        })
    }
}

/// No variant exists at any fallback tier for the requested key.
#[derive(Debug, thiserror::Error)]
#[error("no template variant for theme `{theme}`, styling `{styling}`, artifact `{kind}`")]
pub struct NoVariant {
    /// Requested theme
    pub theme: ThemeId,
    /// Requested styling framework
    pub styling: StylingId,
    /// Requested artifact kind
    pub kind: ArtifactKind,
}
