//! Source tree discovery and document reading.

use std::path::{Path, PathBuf};

use lightbox_renderer::Diagnostic;
use lightbox_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig, Document};

use crate::error::CliError;

/// Extension of source documents.
const SOURCE_EXTENSION: &str = "md";

/// A document read from the source tree.
pub(crate) struct SourceDocument {
    pub document: Document,
    pub diagnostics: Vec<Diagnostic>,
}

/// Document name of `path`: relative to `source_dir`, forward slashes, no
/// extension.
pub(crate) fn docname_for(source_dir: &Path, path: &Path) -> Result<String, CliError> {
    let relative = path.strip_prefix(source_dir).map_err(|_| {
        CliError::Validation(format!(
            "{} is outside the source directory {}",
            path.display(),
            source_dir.display()
        ))
    })?;
    let stem = relative.with_extension("");
    let parts: Vec<_> = stem
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Ok(parts.join("/"))
}

/// All source documents under `source_dir`, sorted.
pub(crate) fn discover(source_dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    if !source_dir.is_dir() {
        return Err(CliError::Validation(format!(
            "Source directory not found: {}",
            source_dir.display()
        )));
    }
    let mut found = Vec::new();
    walk(source_dir, &mut found)?;
    found.sort();
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), CliError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .is_some_and(|n| n.to_string_lossy().starts_with(['.', '_']));
        if hidden {
            continue;
        }
        if path.is_dir() {
            walk(&path, found)?;
        } else if path.extension().is_some_and(|e| e == SOURCE_EXTENSION) {
            found.push(path);
        }
    }
    Ok(())
}

/// Resolve a document argument: absolute, relative to the working directory,
/// or relative to the source directory.
pub(crate) fn resolve_document(source_dir: &Path, arg: &Path) -> Result<PathBuf, CliError> {
    let candidates = [
        arg.to_path_buf(),
        source_dir.join(arg),
        source_dir.join(arg).with_extension(SOURCE_EXTENSION),
    ];
    let found = candidates
        .into_iter()
        .find(|p| p.is_file())
        .ok_or_else(|| CliError::Validation(format!("Document not found: {}", arg.display())))?;
    Ok(std::fs::canonicalize(found)?)
}

/// Read one document and its directives.
pub(crate) fn read_document(source_dir: &Path, path: &Path) -> Result<SourceDocument, CliError> {
    let docname = docname_for(source_dir, path)?;
    let input = std::fs::read_to_string(path)?;

    let mut processor = DirectiveProcessor::new(DirectiveProcessorConfig::new(source_dir, docname));
    let document = processor.read(&input);
    tracing::debug!(
        docname = document.docname(),
        directives = document.blocks().count(),
        "Read document"
    );

    Ok(SourceDocument {
        document,
        diagnostics: processor.take_diagnostics(),
    })
}
