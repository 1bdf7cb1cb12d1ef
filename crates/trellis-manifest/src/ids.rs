//! Theme and styling-framework identifiers.

use std::fmt;
use std::str::FromStr;

/// A theme identifier.
///
/// Themes are an open set: the catalog ships `sveltin` and `blank`, but a
/// manifest may name any well-formed identifier and rely on the registry's
/// fallback tiers. Identifiers are lowercase ASCII alphanumerics plus
/// `-`, `_` and `.`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ThemeId(String);

impl ThemeId {
    /// Create a theme identifier, rejecting malformed names.
    pub fn new(name: impl Into<String>) -> Result<Self, IdError> {
        let name = name.into();
        if name.is_empty() {
            return Err(IdError::EmptyTheme);
        }
        let well_formed = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));
        if !well_formed {
            return Err(IdError::MalformedTheme(name));
        }
        Ok(Self(name))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The CSS-styling framework chosen for a project.
///
/// Unlike themes this is a closed set: each variant must map to concrete
/// CSS-pipeline catalog content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StylingId {
    /// Tailwind CSS utility classes
    TailwindCss,
    /// UnoCSS atomic engine
    UnoCss,
    /// Plain CSS, no framework
    VanillaCss,
    /// SCSS preprocessing
    Scss,
    /// Bulma (SCSS-based)
    Bulma,
    /// Bootstrap (SCSS-based)
    Bootstrap,
}

impl StylingId {
    /// All known styling frameworks.
    pub const ALL: [StylingId; 6] = [
        StylingId::TailwindCss,
        StylingId::UnoCss,
        StylingId::VanillaCss,
        StylingId::Scss,
        StylingId::Bulma,
        StylingId::Bootstrap,
    ];

    /// Canonical identifier as it appears in manifests.
    pub fn as_str(&self) -> &'static str {
        match self {
            StylingId::TailwindCss => "tailwindcss",
            StylingId::UnoCss => "unocss",
            StylingId::VanillaCss => "vanillacss",
            StylingId::Scss => "scss",
            StylingId::Bulma => "bulma",
            StylingId::Bootstrap => "bootstrap",
        }
    }
}

impl fmt::Display for StylingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StylingId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StylingId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| IdError::UnknownStyling(s.to_string()))
    }
}

/// Errors from parsing identifiers.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    #[error("theme identifier is empty")]
    EmptyTheme,

    #[error("theme identifier `{0}` contains characters outside [a-z0-9._-]")]
    MalformedTheme(String),

    #[error("unknown styling framework `{0}`")]
    UnknownStyling(String),
}
