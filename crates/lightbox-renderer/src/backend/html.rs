//! Interactive target emitter.
//!
//! The open/close state lives in a hidden checkbox; the trigger, close and
//! backdrop labels all point at it with `for`, so the overlay works without
//! any script. `lightbox.js` only adds keyboard and focus handling.

use std::fmt::Write;

use crate::error::RenderError;
use crate::escape::escape_html;
use crate::node::{NodeKind, Overlay, Trigger, required};

pub(crate) fn container_open(out: &mut String) {
    out.push_str("<div class=\"lightbox-container\">\n");
}

pub(crate) fn container_close(out: &mut String) {
    out.push_str("</div>\n");
}

pub(crate) fn trigger(node: &Trigger, url: &str, out: &mut String) -> Result<(), RenderError> {
    let id = required(&node.checkbox_id, NodeKind::Trigger, "checkbox_id")?;
    let width = required(&node.thumbnail_width, NodeKind::Trigger, "thumbnail_width")?;
    let alt = escape_html(&node.alt);
    let class = class_list("lightbox-trigger", &node.classes);

    write!(
        out,
        "<label for=\"{id}\" class=\"lightbox-trigger-label\" tabindex=\"0\" role=\"button\" \
         aria-label=\"Enlarge image: {alt}\">\n  \
         <img src=\"{url}\" alt=\"{alt}\" class=\"{class}\" style=\"width: {width};\">\n\
         </label>\n",
        id = escape_html(id),
        url = escape_html(url),
        width = escape_html(width),
    )?;
    Ok(())
}

pub(crate) fn overlay(node: &Overlay, url: &str, out: &mut String) -> Result<(), RenderError> {
    let id = escape_html(required(&node.checkbox_id, NodeKind::Overlay, "checkbox_id")?);
    let style = required(&node.size_style, NodeKind::Overlay, "size_style")?;
    let alt = escape_html(&node.alt);

    write!(
        out,
        "<input type=\"checkbox\" id=\"{id}\" class=\"lightbox-toggle\" aria-hidden=\"true\" tabindex=\"-1\">\n\
         <div class=\"lightbox-overlay\" role=\"dialog\" aria-modal=\"true\" aria-label=\"{alt}\">\n  \
         <label for=\"{id}\" class=\"lightbox-close\" tabindex=\"0\" role=\"button\" \
         aria-label=\"Close lightbox\">&times;</label>\n  \
         <div class=\"lightbox-content\">\n"
    )?;

    let class_attr = if node.classes.is_empty() {
        String::new()
    } else {
        format!(" class=\"{}\"", escape_html(&node.classes.join(" ")))
    };
    writeln!(
        out,
        "    <img src=\"{}\" alt=\"{alt}\"{class_attr} style=\"{}\">",
        escape_html(url),
        escape_html(style)
    )?;

    if let Some(caption) = &node.caption {
        writeln!(
            out,
            "    <p class=\"lightbox-caption\">{}</p>",
            escape_html(caption)
        )?;
    }

    write!(
        out,
        "  </div>\n  \
         <label for=\"{id}\" class=\"lightbox-backdrop-close\" aria-hidden=\"true\"></label>\n\
         </div>\n"
    )?;
    Ok(())
}

/// Plain `<img>` used for remote images.
pub(crate) fn plain_image(url: &str, alt: &str, out: &mut String) -> Result<(), RenderError> {
    writeln!(
        out,
        "<img src=\"{}\" alt=\"{}\">",
        escape_html(url),
        escape_html(alt)
    )?;
    Ok(())
}

fn class_list(base: &str, extra: &[String]) -> String {
    let mut class = base.to_owned();
    for token in extra {
        class.push(' ');
        class.push_str(&escape_html(token));
    }
    class
}
