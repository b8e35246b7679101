//! Text escaping for each output format.

use std::borrow::Cow;

/// Escape text for HTML element content and double-quoted attribute values.
///
/// ```
/// use lightbox_renderer::escape_html;
///
/// assert_eq!(escape_html(r#"<b title="x">"#), "&lt;b title=&quot;x&quot;&gt;");
/// assert_eq!(escape_html("plain"), "plain");
/// ```
pub fn escape_html(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        _ => None,
    })
}

/// Escape text for LaTeX paragraph and argument context.
///
/// ```
/// use lightbox_renderer::escape_latex;
///
/// assert_eq!(escape_latex("40% width & more"), r"40\% width \& more");
/// ```
pub fn escape_latex(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '\\' => Some(r"\textbackslash{}"),
        '{' => Some(r"\{"),
        '}' => Some(r"\}"),
        '$' => Some(r"\$"),
        '%' => Some(r"\%"),
        '&' => Some(r"\&"),
        '#' => Some(r"\#"),
        '_' => Some(r"\_"),
        '^' => Some(r"\textasciicircum{}"),
        '~' => Some(r"\textasciitilde{}"),
        '[' => Some("{[}"),
        ']' => Some("{]}"),
        _ => None,
    })
}

/// Escape text for a Texinfo command argument.
pub fn escape_texinfo(s: &str) -> Cow<'_, str> {
    escape_with(s, |c| match c {
        '@' => Some("@@"),
        '{' => Some("@{"),
        '}' => Some("@}"),
        ',' => Some("@comma{}"),
        _ => None,
    })
}

/// Replace characters for which `replacement` returns `Some`, borrowing when
/// nothing needs escaping.
fn escape_with(s: &str, replacement: impl Fn(char) -> Option<&'static str>) -> Cow<'_, str> {
    let Some(first) = s.find(|c: char| replacement(c).is_some()) else {
        return Cow::Borrowed(s);
    };

    let mut out = String::with_capacity(s.len() + 16);
    out.push_str(&s[..first]);
    for c in s[first..].chars() {
        match replacement(c) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}
