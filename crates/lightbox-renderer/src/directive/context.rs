//! Directive processing context and image path sandbox.
//!
//! Resolves a directive's image reference against the source tree and
//! guarantees the result stays inside it.

use std::path::{Path, PathBuf};

use crate::assets::ImageSizeProvider;
use crate::diagnostic::{Diagnostic, DiagnosticKind, SourceLocation};
use crate::error::SecurityError;
use crate::sizing::FALLBACK_ASPECT_RATIO;
use crate::util::{docname_dir, normalize_lexically, to_slash};

/// Context of one directive: where it was written and how to inspect images.
///
/// # Example
///
/// ```
/// use lightbox_renderer::ImageHeaderSize;
/// use lightbox_renderer::directive::DirectiveContext;
///
/// let dir = tempfile::tempdir().unwrap();
/// let ctx = DirectiveContext {
///     source_root: dir.path(),
///     docname: "guide/setup",
///     line: 3,
///     size_provider: &ImageHeaderSize,
/// };
///
/// let mut diagnostics = Vec::new();
/// assert!(ctx.resolve_asset("../../etc/passwd", &mut diagnostics).is_err());
/// ```
pub struct DirectiveContext<'a> {
    /// Source tree root. Nothing outside it may be referenced.
    pub source_root: &'a Path,
    /// Name of the document containing the directive (`guide/setup`).
    pub docname: &'a str,
    /// Line number where the directive appears (1-indexed).
    pub line: usize,
    /// Reads natural image dimensions.
    pub size_provider: &'a dyn ImageSizeProvider,
}

/// Sandboxed location of a referenced image.
///
/// Only [`DirectiveContext::resolve_asset`] creates values of this type, so
/// every `AssetPath` lies inside the source tree.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPath {
    source_relative_path: String,
    absolute_path: PathBuf,
    exists: bool,
    natural_aspect_ratio: f64,
}

impl AssetPath {
    /// Forward-slash path relative to the source root (`images/a.png`).
    #[must_use]
    pub fn source_relative_path(&self) -> &str {
        &self.source_relative_path
    }

    /// Resolved filesystem location.
    #[must_use]
    pub fn absolute_path(&self) -> &Path {
        &self.absolute_path
    }

    /// Whether the file existed at resolution time.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Width / height, or [`FALLBACK_ASPECT_RATIO`] when unknown.
    #[must_use]
    pub fn natural_aspect_ratio(&self) -> f64 {
        self.natural_aspect_ratio
    }

    /// Root-absolute URI carried by the asset collector (`/images/a.png`).
    #[must_use]
    pub fn collector_uri(&self) -> String {
        format!("/{}", self.source_relative_path)
    }

    #[cfg(test)]
    pub(crate) fn for_tests(source_relative_path: &str, natural_aspect_ratio: f64) -> Self {
        Self {
            source_relative_path: source_relative_path.to_owned(),
            absolute_path: PathBuf::from("/src").join(source_relative_path),
            exists: true,
            natural_aspect_ratio,
        }
    }
}

/// Whether a reference points at a remote image.
///
/// Remote images bypass the sandbox and render as a plain image everywhere.
#[must_use]
pub fn is_external_reference(reference: &str) -> bool {
    reference.starts_with("http://") || reference.starts_with("https://")
}

impl DirectiveContext<'_> {
    /// Location used in diagnostics.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        SourceLocation {
            docname: self.docname.to_owned(),
            line: self.line,
        }
    }

    /// Resolve an image reference to a sandboxed [`AssetPath`].
    ///
    /// References starting with `/` resolve against the source root; all
    /// others resolve against the directory of the current document.
    /// Missing files and unreadable dimensions are reported as warnings in
    /// `diagnostics` without failing.
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError`] if the reference resolves outside the source
    /// root, including through symlinks.
    pub fn resolve_asset(
        &self,
        reference: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<AssetPath, SecurityError> {
        let root = resolve_symlinks(self.source_root);
        let joined = match reference.strip_prefix('/') {
            Some(root_relative) => root.join(root_relative),
            None => root.join(docname_dir(self.docname)).join(reference),
        };
        let resolved = resolve_symlinks(&joined);

        let Ok(relative) = resolved.strip_prefix(&root) else {
            return Err(SecurityError {
                reference: reference.to_owned(),
                resolved,
            });
        };
        let source_relative_path = to_slash(relative);

        let exists = resolved.is_file();
        let natural_aspect_ratio = if exists {
            self.aspect_ratio(reference, &resolved, diagnostics)
        } else {
            diagnostics.push(
                Diagnostic::new(
                    DiagnosticKind::ImageNotFound,
                    self.location(),
                    format!("Lightbox image not found: {}", resolved.display()),
                )
                .with_path(&resolved),
            );
            FALLBACK_ASPECT_RATIO
        };

        Ok(AssetPath {
            source_relative_path,
            absolute_path: resolved,
            exists,
            natural_aspect_ratio,
        })
    }

    fn aspect_ratio(
        &self,
        reference: &str,
        path: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> f64 {
        match self.size_provider.dimensions(path) {
            Some((width, height)) if width > 0 && height > 0 => {
                f64::from(width) / f64::from(height)
            }
            _ => {
                diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::ImageDimensions,
                        self.location(),
                        format!(
                            "Could not calculate image dimensions for '{reference}'. \
                             Falling back to 1:1 aspect ratio."
                        ),
                    )
                    .with_path(path),
                );
                FALLBACK_ASPECT_RATIO
            }
        }
    }
}

/// Canonicalize the longest existing ancestor of `path` and re-append the
/// rest.
///
/// `.` and `..` are resolved lexically first, so the result never contains
/// them even when the file does not exist.
fn resolve_symlinks(path: &Path) -> PathBuf {
    let normalized = normalize_lexically(path);
    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, name| acc.join(name));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return normalized.clone(),
        }
    }
}
