//! The `::lightbox` directive.
//!
//! # Syntax
//!
//! ```text
//! ::lightbox[/images/diagram.png]{alt="Diagram" caption="Overview" percentage="60 90" .wide}
//! ```
//!
//! The bracketed argument is the image reference: root-absolute (`/images/a.png`)
//! or relative to the current document. Options:
//!
//! | Option | Effect |
//! |---|---|
//! | `alt` | alternative text |
//! | `caption` | caption below the enlarged image and the printed figure |
//! | `class` | extra CSS classes (also `.name` shorthand) |
//! | `percentage` | thumbnail width and overlay extent, e.g. `"60 90"` |
//! | `latex-width` | print width as a fraction in (0, 1] |
//!
//! # Pipeline
//!
//! [`DirectiveArgs`] → [`DirectiveSpec`] → [`AssetPath`] → node tree, driven by
//! [`DirectiveProcessor`].

mod args;
mod context;
mod fence;
mod parser;
mod processor;
mod spec;

pub use args::{DirectiveArgs, RawOptions};
pub use context::{AssetPath, DirectiveContext, is_external_reference};
pub use processor::{DIRECTIVE_NAME, DirectiveProcessor, DirectiveProcessorConfig, Document};
pub use spec::{DirectiveSpec, OPTION_NAMES};
