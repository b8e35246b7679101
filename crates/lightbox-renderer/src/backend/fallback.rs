//! Fallback emitters: the whole directive collapses to one plain image.

use std::fmt::Write;

use crate::error::RenderError;
use crate::escape::{escape_html, escape_texinfo};
use crate::target::Target;

/// Emit the plain image form of `target`.
///
/// `file` is the image file (texinfo) or URL (epub); text and man only show
/// the alt text.
pub(crate) fn image(
    target: Target,
    file: &str,
    alt: &str,
    out: &mut String,
) -> Result<(), RenderError> {
    match target {
        Target::Texinfo => {
            let (stem, ext) = match file.rsplit_once('.') {
                Some((stem, ext)) if !stem.is_empty() && !ext.contains('/') => (stem, ext),
                _ => (file, ""),
            };
            writeln!(
                out,
                "\n@image{{{},,,{},{ext}}}",
                escape_texinfo(stem),
                escape_texinfo(alt)
            )?;
        }
        Target::Epub => {
            writeln!(
                out,
                "<img src=\"{}\" alt=\"{}\" />",
                escape_html(file),
                escape_html(alt)
            )?;
        }
        _ if alt.is_empty() => out.push_str("[image]\n"),
        _ => writeln!(out, "[image: {alt}]")?,
    }
    Ok(())
}
