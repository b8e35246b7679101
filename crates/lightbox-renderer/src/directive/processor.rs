//! Document processor for `::lightbox` directives.
//!
//! Processing has three phases, mirroring a multi-target build:
//!
//! 1. [`DirectiveProcessor::read`] turns each directive into a [`Block`]
//!    (validation, sandboxing, node tree construction, diagnostics).
//! 2. [`Document::collect_assets`] registers every referenced image.
//! 3. [`Document::render`] emits the document for one target.

use std::path::PathBuf;
use std::sync::Arc;

use crate::assets::{AssetCollector, ImageHeaderSize, ImageSizeProvider};
use crate::backend::RenderContext;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::dispatch::{collect_assets, render_block};
use crate::error::{DirectiveError, RenderError};
use crate::node::{Block, Container, checkbox_id};
use crate::sizing::SizingResult;
use crate::target::Target;

use super::context::is_external_reference;
use super::fence::FenceTracker;
use super::parser::parse_leaf_line;
use super::{DirectiveContext, DirectiveSpec, RawOptions};

/// Name of the directive in documents (`::lightbox[...]{...}`).
pub const DIRECTIVE_NAME: &str = "lightbox";

/// Configuration for one document's processor.
pub struct DirectiveProcessorConfig {
    /// Source tree root; image references may not leave it.
    pub source_root: PathBuf,
    /// Document name relative to the source root, without extension.
    pub docname: String,
    /// Reads natural image dimensions.
    ///
    /// Default: [`ImageHeaderSize`]
    pub size_provider: Arc<dyn ImageSizeProvider>,
}

impl DirectiveProcessorConfig {
    /// Create a configuration for `docname` under `source_root`.
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, docname: impl Into<String>) -> Self {
        Self {
            source_root: source_root.into(),
            docname: docname.into(),
            size_provider: Arc::new(ImageHeaderSize),
        }
    }

    /// Set the image dimension provider.
    #[must_use]
    pub fn with_size_provider<P: ImageSizeProvider + 'static>(mut self, provider: P) -> Self {
        self.size_provider = Arc::new(provider);
        self
    }

    fn create_context(&self, line: usize) -> DirectiveContext<'_> {
        DirectiveContext {
            source_root: &self.source_root,
            docname: &self.docname,
            line,
            size_provider: self.size_provider.as_ref(),
        }
    }
}

/// Reads `::lightbox` directives of one document.
///
/// Owns the document's checkbox serial counter, so processors for different
/// documents never share mutable state and can run in parallel.
///
/// # Example
///
/// ```
/// use lightbox_renderer::{ImageRegistry, Target};
/// use lightbox_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig};
///
/// let dir = tempfile::tempdir().unwrap();
/// std::fs::create_dir(dir.path().join("images")).unwrap();
/// std::fs::write(dir.path().join("images/a.png"), b"not a real png").unwrap();
///
/// let config = DirectiveProcessorConfig::new(dir.path(), "index");
/// let mut processor = DirectiveProcessor::new(config);
/// let document = processor.read("# Title\n\n::lightbox[/images/a.png]{alt=\"A\"}\n");
///
/// let mut registry = ImageRegistry::new();
/// document.collect_assets(&mut registry);
///
/// let html = document.render(Target::Html, &registry, "_images").unwrap();
/// assert!(html.contains(r#"<label for="lightbox-index-1""#));
/// assert!(html.contains(r#"src="_images/a.png""#));
/// ```
pub struct DirectiveProcessor {
    config: DirectiveProcessorConfig,
    fence: FenceTracker,
    serial: u32,
    diagnostics: Vec<Diagnostic>,
}

impl DirectiveProcessor {
    /// Create a processor for one document.
    #[must_use]
    pub fn new(config: DirectiveProcessorConfig) -> Self {
        Self {
            config,
            fence: FenceTracker::new(),
            serial: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Read a document, replacing each `::lightbox` line with a [`Block`].
    ///
    /// Directive lines inside fenced code blocks and other directives stay
    /// text.
    pub fn read(&mut self, input: &str) -> Document {
        let mut segments = Vec::new();
        let mut directives = 0usize;

        for (idx, line) in input.lines().enumerate() {
            self.fence.update(line);
            if self.fence.in_fence() {
                segments.push(Segment::Text(line.to_owned()));
                continue;
            }

            match parse_leaf_line(line) {
                Some(leaf) if leaf.name == DIRECTIVE_NAME => {
                    let (argument, options) = leaf.args.into_options();
                    let argument = (!argument.is_empty()).then_some(argument.as_str());
                    let block = self.read_directive(argument, &options, idx + 1);
                    segments.push(Segment::Directive(block));
                    directives += 1;
                }
                _ => segments.push(Segment::Text(line.to_owned())),
            }
        }

        tracing::debug!(
            docname = %self.config.docname,
            directives,
            "Read lightbox directives"
        );

        Document {
            docname: self.config.docname.clone(),
            segments,
            trailing_newline: input.ends_with('\n'),
        }
    }

    /// Turn one already-tokenized directive into a [`Block`].
    ///
    /// Invalid or unsafe directives become [`Block::Rejected`] with an error
    /// diagnostic; the caller keeps going.
    pub fn read_directive(
        &mut self,
        argument: Option<&str>,
        options: &RawOptions,
        line: usize,
    ) -> Block {
        match self.try_read_directive(argument, options, line) {
            Ok(block) => block,
            Err(DirectiveError::Validation(e)) => {
                self.report(Diagnostic::new(
                    DiagnosticKind::Validation,
                    self.config.create_context(line).location(),
                    format!("Invalid lightbox directive: {e}"),
                ));
                Block::Rejected
            }
            Err(DirectiveError::Security(e)) => {
                let location = self.config.create_context(line).location();
                let resolved = e.resolved.clone();
                self.report(
                    Diagnostic::new(
                        DiagnosticKind::PathTraversal,
                        location,
                        format!("Lightbox {e}"),
                    )
                    .with_path(resolved),
                );
                Block::Rejected
            }
        }
    }

    fn try_read_directive(
        &mut self,
        argument: Option<&str>,
        options: &RawOptions,
        line: usize,
    ) -> Result<Block, DirectiveError> {
        let spec = DirectiveSpec::parse(argument, options)?;

        if is_external_reference(&spec.image_reference) {
            return Ok(Block::ExternalImage {
                uri: spec.image_reference,
                alt: spec.alt_text,
            });
        }

        let mut warnings = Vec::new();
        let ctx = self.config.create_context(line);
        for percentage in spec.oversized_percentages() {
            warnings.push(Diagnostic::new(
                DiagnosticKind::OversizedPercentage,
                ctx.location(),
                format!("Lightbox percentage {percentage} exceeds 100; using it as written"),
            ));
        }
        let resolved = ctx.resolve_asset(&spec.image_reference, &mut warnings);
        for warning in warnings {
            self.report(warning);
        }
        let asset = resolved?;

        self.serial += 1;
        let sizing = SizingResult::compute(&spec.size_policy_input, spec.print_width_override);
        let tree = Container::build(
            &spec,
            asset,
            &sizing,
            checkbox_id(&self.config.docname, self.serial),
        );
        Ok(Block::Lightbox(Box::new(tree)))
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    /// Diagnostics reported so far, in source order.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take the diagnostics, leaving none behind.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Whether any directive was dropped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.kind.is_error())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Directive(Block),
}

/// A document after reading: text lines interleaved with directive blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    docname: String,
    segments: Vec<Segment>,
    trailing_newline: bool,
}

impl Document {
    /// Document name.
    #[must_use]
    pub fn docname(&self) -> &str {
        &self.docname
    }

    /// Directive blocks in document order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Directive(block) => Some(block),
            Segment::Text(_) => None,
        })
    }

    /// Register every collected image with `collector`.
    pub fn collect_assets(&self, collector: &mut dyn AssetCollector) {
        collect_assets(&self.docname, self.blocks(), collector);
    }

    /// Render the document for `target`.
    ///
    /// Text lines pass through unchanged; rejected directives disappear.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] when a node tree violates an internal
    /// invariant. Such an error is a defect and aborts the document.
    pub fn render(
        &self,
        target: Target,
        images: &dyn AssetCollector,
        images_dir: &str,
    ) -> Result<String, RenderError> {
        let ctx = RenderContext {
            docname: &self.docname,
            target,
            images,
            images_dir,
        };

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(line) => {
                    out.push_str(line);
                    out.push('\n');
                }
                Segment::Directive(block) => out.push_str(&render_block(block, &ctx)?),
            }
        }
        if !self.trailing_newline && out.ends_with('\n') {
            out.pop();
        }
        Ok(out)
    }
}
