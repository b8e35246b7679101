//! Error types for lightbox directives.

use std::fmt;
use std::path::PathBuf;

use crate::node::NodeKind;

/// Malformed directive input.
///
/// The directive is skipped with a diagnostic; the document build continues.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ValidationError {
    /// The image reference argument is missing or blank.
    #[error("missing image reference argument")]
    MissingReference,

    /// An option the directive does not recognize.
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    /// `percentage` is not one or two positive integers.
    #[error("invalid percentage '{value}': {reason}")]
    InvalidPercentage {
        /// Raw option value.
        value: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// `latex-width` is not a number in (0, 1].
    #[error("invalid latex-width '{value}': expected a number in (0, 1]")]
    InvalidPrintWidth {
        /// Raw option value.
        value: String,
    },
}

/// An image reference resolving outside the source tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("image path traverses outside source directory: {reference}")]
pub struct SecurityError {
    /// Reference as written in the directive.
    pub reference: String,
    /// Where the reference resolved to.
    pub resolved: PathBuf,
}

/// Error produced while reading a directive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectiveError {
    /// Malformed input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Sandbox violation.
    #[error(transparent)]
    Security(#[from] SecurityError),
}

/// Error produced while rendering a node tree.
///
/// Always a programming defect, never caused by directive input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A required computed field is missing.
    #[error("internal error: {node} node rendered without required field '{field}'")]
    InternalInvariant {
        /// Kind of the offending node.
        node: NodeKind,
        /// Name of the missing field.
        field: &'static str,
    },

    /// Writing to the output buffer failed.
    #[error("failed to write rendered output")]
    Write(#[from] fmt::Error),
}
