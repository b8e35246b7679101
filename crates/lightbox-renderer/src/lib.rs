//! Enlargeable image directive rendered per output target.
//!
//! One `::lightbox` directive becomes a small node tree
//! ([`Container`] → [`Trigger`], [`Overlay`], [`Collector`]) which is rendered
//! differently for each [`Target`]:
//!
//! - interactive targets (`html`, `singlehtml`, `dirhtml`): a thumbnail and a
//!   checkbox-driven overlay that works without script
//! - typeset target (`latex`): one captioned figure bounded by the print width
//! - fallback targets (`text`, `man`, `texinfo`, `epub`): a single plain image
//!
//! Image references are sandboxed to the source tree before anything is
//! rendered.
//!
//! # Example
//!
//! ```
//! use lightbox_renderer::{ImageRegistry, Target};
//! use lightbox_renderer::directive::{DirectiveProcessor, DirectiveProcessorConfig};
//!
//! let dir = tempfile::tempdir().unwrap();
//! std::fs::create_dir(dir.path().join("images")).unwrap();
//! std::fs::write(dir.path().join("images/plan.png"), b"png").unwrap();
//!
//! let mut processor =
//!     DirectiveProcessor::new(DirectiveProcessorConfig::new(dir.path(), "index"));
//! let document = processor.read(r#"::lightbox[/images/plan.png]{caption="Floor plan"}"#);
//!
//! let mut registry = ImageRegistry::new();
//! document.collect_assets(&mut registry);
//!
//! let latex = document.render(Target::Latex, &registry, "_images").unwrap();
//! assert!(latex.contains(r"\includegraphics{plan.png}"));
//! assert!(latex.contains(r"\caption{Floor plan}"));
//! ```

mod assets;
mod backend;
mod diagnostic;
pub mod directive;
mod dispatch;
mod error;
mod escape;
mod extension;
mod node;
mod sizing;
mod target;
mod util;

pub use assets::{AssetCollector, ImageHeaderSize, ImageRegistry, ImageSizeProvider};
pub use backend::{DEFAULT_IMAGES_DIR, RenderContext};
pub use diagnostic::{Diagnostic, DiagnosticKind, SourceLocation};
pub use dispatch::{Empty, Visit, collect_assets, depart, render, render_block, visit};
pub use error::{DirectiveError, RenderError, SecurityError, ValidationError};
pub use escape::{escape_html, escape_latex, escape_texinfo};
pub use extension::{
    DepartFn, Extension, NodeRegistration, SCRIPT, STYLESHEET, TargetHandler, VisitFn,
};
pub use node::{Block, Collector, Container, Node, NodeKind, Overlay, Trigger, checkbox_id};
pub use sizing::{
    DEFAULT_OVERLAY_PERCENTAGE, DEFAULT_THUMBNAIL_PERCENTAGE, FALLBACK_ASPECT_RATIO, PrintWidth,
    SizingResult,
};
pub use target::{Target, TargetFamily, UnknownTarget};
pub use util::relative_path;
