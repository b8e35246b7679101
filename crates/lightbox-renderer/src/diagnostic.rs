//! Build diagnostics.

use std::fmt;
use std::path::PathBuf;

/// Category of a build diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// Malformed directive input; the directive was skipped.
    Validation,
    /// The image reference escapes the source tree; nothing was rendered.
    PathTraversal,
    /// The referenced image does not exist.
    ImageNotFound,
    /// Image dimensions were unknown; a 1:1 ratio was used.
    ImageDimensions,
    /// A percentage above 100 was accepted as written.
    OversizedPercentage,
}

impl DiagnosticKind {
    /// Short identifier used in log output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::PathTraversal => "path_traversal",
            Self::ImageNotFound => "image_not_found",
            Self::ImageDimensions => "image_dimensions",
            Self::OversizedPercentage => "oversized_percentage",
        }
    }

    /// Whether the directive's output was dropped.
    #[must_use]
    pub fn is_error(self) -> bool {
        matches!(self, Self::Validation | Self::PathTraversal)
    }
}

/// Where a directive was written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceLocation {
    /// Document name relative to the source root, without extension.
    pub docname: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.docname, self.line)
    }
}

/// A warning or error attached to one directive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    /// Category.
    pub kind: DiagnosticKind,
    /// Directive location.
    pub location: SourceLocation,
    /// Human-readable message naming the offending value.
    pub message: String,
    /// Resolved filesystem path, when one is involved.
    pub path: Option<PathBuf>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, location: SourceLocation, message: String) -> Self {
        Self {
            kind,
            location,
            message,
            path: None,
        }
    }

    pub(crate) fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Forward the diagnostic to the log.
    pub(crate) fn emit(&self) {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        if self.kind.is_error() {
            tracing::error!(
                location = %self.location,
                kind = self.kind.as_str(),
                path = %path,
                "{}",
                self.message
            );
        } else {
            tracing::warn!(
                location = %self.location,
                kind = self.kind.as_str(),
                path = %path,
                "{}",
                self.message
            );
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [lightbox.{}]",
            self.location,
            self.message,
            self.kind.as_str()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::new(
            DiagnosticKind::ImageNotFound,
            SourceLocation {
                docname: "guide/setup".to_owned(),
                line: 12,
            },
            "Lightbox image not found: /src/a.png".to_owned(),
        );
        assert_eq!(
            diagnostic.to_string(),
            "guide/setup:12: Lightbox image not found: /src/a.png [lightbox.image_not_found]"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(DiagnosticKind::PathTraversal.is_error());
        assert!(DiagnosticKind::Validation.is_error());
        assert!(!DiagnosticKind::ImageNotFound.is_error());
        assert!(!DiagnosticKind::ImageDimensions.is_error());
    }
}
