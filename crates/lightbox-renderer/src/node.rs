//! Renderable node tree of one lightbox directive.
//!
//! A directive becomes a [`Container`] owning, in order, a [`Trigger`], an
//! [`Overlay`] and exactly one [`Collector`]. Fields the builder computes are
//! `Option`s: a hand-assembled node may lack them, and rendering it is an
//! internal error rather than a silent default.

use std::fmt;
use std::sync::Arc;

use crate::directive::{AssetPath, DirectiveSpec};
use crate::error::RenderError;
use crate::sizing::{PrintWidth, SizingResult};

/// Kind of a lightbox node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Outer grouping node.
    Container,
    /// Always-visible thumbnail control.
    Trigger,
    /// Enlarged image, caption and close control.
    Overlay,
    /// Invisible asset discovery node.
    Collector,
}

impl NodeKind {
    /// All node kinds in document order.
    pub const ALL: [Self; 4] = [Self::Container, Self::Trigger, Self::Overlay, Self::Collector];

    /// Registered node name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "lightbox_container",
            Self::Trigger => "lightbox_trigger",
            Self::Overlay => "lightbox_overlay",
            Self::Collector => "lightbox_collector",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outer node. Owns the other three and carries the print-target fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    /// Resolved image, shared with the children.
    pub asset: Arc<AssetPath>,
    /// Alternative text; empty when not given.
    pub alt: String,
    /// Figure caption, `None` when absent or empty.
    pub caption: Option<String>,
    /// Fraction of the line width for print targets.
    pub print_width: Option<PrintWidth>,
    /// First child.
    pub trigger: Trigger,
    /// Second child.
    pub overlay: Overlay,
    /// Last child; exactly one per container.
    pub collector: Collector,
}

/// Thumbnail linked to the overlay's toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    /// Image shown as the thumbnail.
    pub asset: Arc<AssetPath>,
    /// Alternative text, also used in the button label.
    pub alt: String,
    /// CSS width, e.g. `60%`.
    pub thumbnail_width: Option<String>,
    /// Extra classes on the thumbnail, in first-seen order.
    pub classes: Vec<String>,
    /// Id of the toggle this thumbnail opens.
    pub checkbox_id: Option<String>,
}

/// Enlarged presentation with caption, close control and backdrop.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    /// Image shown enlarged.
    pub asset: Arc<AssetPath>,
    /// Alternative text and dialog label.
    pub alt: String,
    /// Caption under the enlarged image.
    pub caption: Option<String>,
    /// CSS `width`/`height` declarations fitting the viewport.
    pub size_style: Option<String>,
    /// Extra classes on the enlarged image.
    pub classes: Vec<String>,
    /// Id of the toggle that shows this overlay.
    pub checkbox_id: Option<String>,
}

/// Carries the asset reference for the registration pass and nothing else.
#[derive(Debug, Clone, PartialEq)]
pub struct Collector {
    /// Image to register for copying.
    pub asset: Arc<AssetPath>,
}

impl Collector {
    /// Root-absolute URI of the collected image.
    #[must_use]
    pub fn uri(&self) -> String {
        self.asset.collector_uri()
    }
}

/// Borrowed view of any node, used by the dispatcher.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Container(&'a Container),
    Trigger(&'a Trigger),
    Overlay(&'a Overlay),
    Collector(&'a Collector),
}

impl Node<'_> {
    /// Kind of the viewed node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Container(_) => NodeKind::Container,
            Self::Trigger(_) => NodeKind::Trigger,
            Self::Overlay(_) => NodeKind::Overlay,
            Self::Collector(_) => NodeKind::Collector,
        }
    }
}

/// Checkbox id tying a trigger, overlay and close controls together.
///
/// ```
/// use lightbox_renderer::checkbox_id;
///
/// assert_eq!(checkbox_id("guide/setup", 2), "lightbox-guide-setup-2");
/// ```
#[must_use]
pub fn checkbox_id(docname: &str, serial: u32) -> String {
    format!("lightbox-{}-{serial}", docname.replace('/', "-"))
}

impl Container {
    /// Build the node tree of one directive.
    ///
    /// An empty caption is treated like an absent one.
    #[must_use]
    pub fn build(
        spec: &DirectiveSpec,
        asset: AssetPath,
        sizing: &SizingResult,
        checkbox_id: String,
    ) -> Self {
        let asset = Arc::new(asset);
        let caption = spec.caption.clone().filter(|c| !c.is_empty());

        Self {
            asset: Arc::clone(&asset),
            alt: spec.alt_text.clone(),
            caption: caption.clone(),
            print_width: Some(sizing.print_width),
            trigger: Trigger {
                asset: Arc::clone(&asset),
                alt: spec.alt_text.clone(),
                thumbnail_width: Some(sizing.thumbnail_width()),
                classes: spec.extra_classes.clone(),
                checkbox_id: Some(checkbox_id.clone()),
            },
            overlay: Overlay {
                asset: Arc::clone(&asset),
                alt: spec.alt_text.clone(),
                caption,
                size_style: Some(sizing.overlay_size_style(asset.natural_aspect_ratio())),
                classes: spec.extra_classes.clone(),
                checkbox_id: Some(checkbox_id),
            },
            collector: Collector { asset },
        }
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> [Node<'_>; 3] {
        [
            Node::Trigger(&self.trigger),
            Node::Overlay(&self.overlay),
            Node::Collector(&self.collector),
        ]
    }

    /// All four nodes in document order, container first.
    pub fn walk(&self) -> impl Iterator<Item = Node<'_>> {
        std::iter::once(Node::Container(self)).chain(self.children())
    }
}

/// Output of one directive after reading.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A sandboxed local image with full lightbox behavior.
    Lightbox(Box<Container>),
    /// A remote image; every target renders a plain image.
    ExternalImage {
        /// Remote URL.
        uri: String,
        /// Alternative text.
        alt: String,
    },
    /// Rejected by validation or the sandbox; renders nothing.
    Rejected,
}

/// Borrow a computed field or fail with an internal invariant error.
pub(crate) fn required<'a, T>(
    value: &'a Option<T>,
    node: NodeKind,
    field: &'static str,
) -> Result<&'a T, RenderError> {
    value
        .as_ref()
        .ok_or(RenderError::InternalInvariant { node, field })
}
