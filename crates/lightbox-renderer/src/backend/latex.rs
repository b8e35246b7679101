//! Typeset target emitter.
//!
//! The container renders the whole directive as one figure; its children
//! never reach this backend.

use std::fmt::Write;

use crate::error::RenderError;
use crate::escape::escape_latex;
use crate::node::{Container, NodeKind, required};

/// Emit a figure bounded by the print width, never upscaled.
///
/// `file` is the image file name as the LaTeX build sees it.
pub(crate) fn figure(node: &Container, file: &str, out: &mut String) -> Result<(), RenderError> {
    let width = required(&node.print_width, NodeKind::Container, "print_width")?;
    let file = escape_path(file);

    write!(
        out,
        "\n\\begin{{figure}}[htbp]\n\\centering\n\
         \\adjustbox{{max width={width}\\linewidth}}{{\\includegraphics{{{file}}}}}\n"
    )?;
    if let Some(caption) = &node.caption {
        writeln!(out, "\\caption{{{}}}", escape_latex(caption))?;
    }
    out.push_str("\\end{figure}\n");
    Ok(())
}

/// Remote images cannot be embedded without downloading them; link instead.
pub(crate) fn remote_image(uri: &str, alt: &str, out: &mut String) -> Result<(), RenderError> {
    let label = if alt.is_empty() { uri } else { alt };
    writeln!(
        out,
        "\n\\href{{{}}}{{{}}}",
        escape_path(uri),
        escape_latex(label)
    )?;
    Ok(())
}

/// `\href` and `\includegraphics` take their argument nearly verbatim; only
/// `%`, `#` and `\` need a backslash.
fn escape_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        if matches!(c, '%' | '#' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
