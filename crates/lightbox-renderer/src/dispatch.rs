//! Per-target visitor dispatch.
//!
//! Each target family has its own visitor pair ([`visit_interactive`],
//! [`visit_typeset`], [`visit_fallback`]), each matching every node kind;
//! adding a node kind or target without a handler does not compile.

use crate::assets::AssetCollector;
use crate::backend::{RenderContext, fallback, html, latex};
use crate::error::RenderError;
use crate::node::{Block, Collector, Container, Node};
use crate::target::{Target, TargetFamily};

/// What the walker does after visiting a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Visit the node's children next.
    Continue,
    /// The node rendered its children itself.
    SkipChildren,
}

/// Output of the collector visitor. Carries nothing, so a collector cannot
/// contribute markup to any target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

fn visit_collector(_node: &Collector) -> Empty {
    Empty
}

/// Visit one node for `ctx.target`, appending its fragment to `out`.
pub fn visit(
    node: Node<'_>,
    ctx: &RenderContext<'_>,
    out: &mut String,
) -> Result<Visit, RenderError> {
    match ctx.target.family() {
        TargetFamily::Interactive => visit_interactive(node, ctx, out),
        TargetFamily::Typeset => visit_typeset(node, ctx, out),
        TargetFamily::Fallback => visit_fallback(node, ctx, out),
    }
}

/// Leave a node after its children.
pub fn depart(node: Node<'_>, ctx: &RenderContext<'_>, out: &mut String) {
    match ctx.target.family() {
        TargetFamily::Interactive => depart_interactive(node, ctx, out),
        TargetFamily::Typeset | TargetFamily::Fallback => depart_leaf(node, ctx, out),
    }
}

/// Html, singlehtml and dirhtml: every node renders, the container wraps its
/// children.
pub fn visit_interactive(
    node: Node<'_>,
    ctx: &RenderContext<'_>,
    out: &mut String,
) -> Result<Visit, RenderError> {
    match node {
        Node::Container(_) => html::container_open(out),
        Node::Trigger(trigger) => html::trigger(trigger, &ctx.image_url(&trigger.asset), out)?,
        Node::Overlay(overlay) => html::overlay(overlay, &ctx.image_url(&overlay.asset), out)?,
        Node::Collector(collector) => {
            let Empty = visit_collector(collector);
            return Ok(Visit::SkipChildren);
        }
    }
    Ok(Visit::Continue)
}

/// Close the container wrapper.
pub fn depart_interactive(node: Node<'_>, _ctx: &RenderContext<'_>, out: &mut String) {
    if let Node::Container(_) = node {
        html::container_close(out);
    }
}

/// Latex: the container emits the figure, children are skipped.
pub fn visit_typeset(
    node: Node<'_>,
    ctx: &RenderContext<'_>,
    out: &mut String,
) -> Result<Visit, RenderError> {
    match node {
        Node::Container(container) => {
            latex::figure(container, ctx.image_file(&container.asset), out)?;
        }
        Node::Trigger(_) | Node::Overlay(_) => {}
        Node::Collector(collector) => {
            let Empty = visit_collector(collector);
        }
    }
    Ok(Visit::SkipChildren)
}

/// Text, man, texinfo and epub: the container emits one plain image.
pub fn visit_fallback(
    node: Node<'_>,
    ctx: &RenderContext<'_>,
    out: &mut String,
) -> Result<Visit, RenderError> {
    match node {
        Node::Container(container) => {
            let file = match ctx.target {
                Target::Epub => ctx.image_url(&container.asset),
                _ => ctx.image_file(&container.asset).to_owned(),
            };
            fallback::image(ctx.target, &file, &container.alt, out)?;
        }
        Node::Trigger(_) | Node::Overlay(_) => {}
        Node::Collector(collector) => {
            let Empty = visit_collector(collector);
        }
    }
    Ok(Visit::SkipChildren)
}

/// Departure for families whose container renders everything on visit.
pub fn depart_leaf(_node: Node<'_>, _ctx: &RenderContext<'_>, _out: &mut String) {}

/// Render one directive's tree in document order.
///
/// # Errors
///
/// Returns [`RenderError::InternalInvariant`] when a node lacks a computed
/// field. The partial output of this tree is discarded.
pub fn render(tree: &Container, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    let mut out = String::new();
    let root = Node::Container(tree);
    if visit(root, ctx, &mut out)? == Visit::Continue {
        for child in tree.children() {
            visit(child, ctx, &mut out)?;
            depart(child, ctx, &mut out);
        }
    }
    depart(root, ctx, &mut out);
    Ok(out)
}

/// Render a read directive, including remote images and rejected ones.
pub fn render_block(block: &Block, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
    match block {
        Block::Lightbox(tree) => render(tree, ctx),
        Block::ExternalImage { uri, alt } => {
            let mut out = String::new();
            match ctx.target.family() {
                TargetFamily::Interactive => html::plain_image(uri, alt, &mut out)?,
                TargetFamily::Typeset => latex::remote_image(uri, alt, &mut out)?,
                TargetFamily::Fallback => fallback::image(ctx.target, uri, alt, &mut out)?,
            }
            Ok(out)
        }
        Block::Rejected => Ok(String::new()),
    }
}

/// Registration pass: every collector in `blocks` registers its image.
///
/// Read-only over the trees. Images missing on disk are not registered.
pub fn collect_assets<'a>(
    docname: &str,
    blocks: impl IntoIterator<Item = &'a Block>,
    collector: &mut dyn AssetCollector,
) {
    for block in blocks {
        let Block::Lightbox(tree) = block else {
            continue;
        };
        for node in tree.walk() {
            if let Node::Collector(c) = node
                && c.asset.exists()
            {
                collector.register(docname, c.asset.source_relative_path());
            }
        }
    }
}
