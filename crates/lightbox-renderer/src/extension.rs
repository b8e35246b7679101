//! Host registration of the lightbox extension.

use std::fmt;

use crate::backend::RenderContext;
use crate::directive::{DIRECTIVE_NAME, OPTION_NAMES};
use crate::dispatch::{self, Visit};
use crate::error::RenderError;
use crate::node::{Node, NodeKind};
use crate::target::{Target, TargetFamily};

/// Stylesheet included in interactive output.
pub const STYLESHEET: &str = "lightbox.css";

/// Behavior script included in interactive output.
pub const SCRIPT: &str = "lightbox.js";

/// Visitor entry point for one node on one target.
pub type VisitFn = fn(Node<'_>, &RenderContext<'_>, &mut String) -> Result<Visit, RenderError>;

/// Departure entry point, called after a node's children.
pub type DepartFn = fn(Node<'_>, &RenderContext<'_>, &mut String);

/// Visitor pair of one node kind for one target.
#[derive(Clone, Copy)]
pub struct TargetHandler {
    /// Target the pair renders for.
    pub target: Target,
    /// Entry point of the target's family.
    pub visit: VisitFn,
    pub depart: DepartFn,
}

impl fmt::Debug for TargetHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetHandler")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

/// A node kind with its visitors for every target.
#[derive(Debug, Clone)]
pub struct NodeRegistration {
    pub kind: NodeKind,
    /// One pair per target, in [`Target::ALL`] order.
    pub handlers: Vec<TargetHandler>,
}

/// What the extension declares to the host build.
#[derive(Debug, Clone)]
pub struct Extension {
    /// Directive name in documents.
    pub directive: &'static str,
    /// Options the directive accepts.
    pub options: &'static [&'static str],
    /// Node kinds and their per-target visitors.
    pub nodes: Vec<NodeRegistration>,
    /// Stylesheets for interactive targets.
    pub stylesheets: Vec<&'static str>,
    /// Scripts for interactive targets.
    pub scripts: Vec<&'static str>,
    /// Extension version.
    pub version: &'static str,
    /// Documents may be read in parallel.
    pub parallel_read_safe: bool,
    /// Documents may be written in parallel.
    pub parallel_write_safe: bool,
}

impl Extension {
    /// Declare node kinds, visitors, options and static assets.
    ///
    /// ```
    /// use lightbox_renderer::{Extension, NodeKind, Target};
    ///
    /// let ext = Extension::setup();
    /// assert_eq!(ext.directive, "lightbox");
    /// assert!(ext.handler(NodeKind::Collector, Target::Latex).is_some());
    /// assert!(ext.parallel_read_safe && ext.parallel_write_safe);
    /// ```
    #[must_use]
    pub fn setup() -> Self {
        let nodes = NodeKind::ALL
            .into_iter()
            .map(|kind| NodeRegistration {
                kind,
                handlers: Target::ALL
                    .into_iter()
                    .map(|target| {
                        let (visit, depart): (VisitFn, DepartFn) = match target.family() {
                            TargetFamily::Interactive => {
                                (dispatch::visit_interactive, dispatch::depart_interactive)
                            }
                            TargetFamily::Typeset => {
                                (dispatch::visit_typeset, dispatch::depart_leaf)
                            }
                            TargetFamily::Fallback => {
                                (dispatch::visit_fallback, dispatch::depart_leaf)
                            }
                        };
                        TargetHandler {
                            target,
                            visit,
                            depart,
                        }
                    })
                    .collect(),
            })
            .collect();

        tracing::debug!(
            version = env!("CARGO_PKG_VERSION"),
            "Registered lightbox extension"
        );

        Self {
            directive: DIRECTIVE_NAME,
            options: OPTION_NAMES,
            nodes,
            stylesheets: vec![STYLESHEET],
            scripts: vec![SCRIPT],
            version: env!("CARGO_PKG_VERSION"),
            parallel_read_safe: true,
            parallel_write_safe: true,
        }
    }

    /// Visitor pair of `kind` for `target`.
    #[must_use]
    pub fn handler(&self, kind: NodeKind, target: Target) -> Option<&TargetHandler> {
        self.nodes
            .iter()
            .find(|n| n.kind == kind)?
            .handlers
            .iter()
            .find(|h| h.target == target)
    }
}
