//! Leaf directive syntax parsing.
//!
//! Recognizes block-level `::name[argument]{attrs}` lines.

use super::DirectiveArgs;

/// A leaf directive occupying a whole line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLeaf {
    pub name: String,
    pub args: DirectiveArgs,
}

/// Parse a line as a leaf directive.
///
/// Returns `None` unless the trimmed line is exactly `::name[...]{...}` with
/// nothing after the closing brace.
pub(crate) fn parse_leaf_line(line: &str) -> Option<ParsedLeaf> {
    let trimmed = line.trim();
    let after_colons = trimmed.strip_prefix("::")?;
    if after_colons.starts_with(':') {
        return None;
    }

    let name_end = after_colons
        .find(|c: char| c == '[' || c == '{' || c.is_whitespace())
        .unwrap_or(after_colons.len());
    let name = &after_colons[..name_end];
    if !is_valid_directive_name(name) {
        return None;
    }

    let mut pos = name_end;
    let (argument, consumed) = parse_delimited(&after_colons[pos..], '[', ']');
    pos += consumed;
    let (attrs, consumed) = parse_delimited(&after_colons[pos..], '{', '}');
    pos += consumed;

    if !after_colons[pos..].trim().is_empty() {
        return None;
    }

    Some(ParsedLeaf {
        name: name.to_owned(),
        args: DirectiveArgs::parse(argument, attrs),
    })
}

/// Check if a name is a valid directive name.
///
/// Valid names contain only alphanumeric characters, hyphens, and underscores.
fn is_valid_directive_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parse a delimited group such as `[argument]` or `{attrs}`.
///
/// Nested delimiters are balanced; delimiters inside quoted strings are
/// ignored so captions may contain braces. Returns (inner text,
/// `bytes_consumed`), or an empty match when `s` does not start with `open`
/// or the group is never closed.
fn parse_delimited(s: &str, open: char, close: char) -> (&str, usize) {
    if !s.starts_with(open) {
        return ("", 0);
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' if open == '{' => quote = Some(c),
            c if c == open => depth += 1,
            c if c == close => {
                depth -= 1;
                if depth == 0 {
                    return (&s[open.len_utf8()..i], i + close.len_utf8());
                }
            }
            _ => {}
        }
    }

    ("", 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_directive() {
        let leaf = parse_leaf_line("::lightbox[/images/a.png]").unwrap();
        assert_eq!(leaf.name, "lightbox");
        assert_eq!(leaf.args.argument, "/images/a.png");
    }

    #[test]
    fn test_leaf_with_attrs() {
        let leaf = parse_leaf_line(r#"::lightbox[a.png]{alt="A" .framed}"#).unwrap();
        assert_eq!(leaf.args.get("alt"), Some("A"));
        assert_eq!(leaf.args.classes, vec!["framed"]);
    }

    #[test]
    fn test_leading_whitespace_allowed() {
        assert!(parse_leaf_line("   ::lightbox[a.png]").is_some());
    }

    #[test]
    fn test_inline_and_container_rejected() {
        assert!(parse_leaf_line(":lightbox[a.png]").is_none());
        assert!(parse_leaf_line(":::lightbox[a.png]").is_none());
    }

    #[test]
    fn test_trailing_text_rejected() {
        assert!(parse_leaf_line("::lightbox[a.png] and more").is_none());
    }

    #[test]
    fn test_invalid_name() {
        assert!(parse_leaf_line("::light.box[a.png]").is_none());
        assert!(parse_leaf_line("::[a.png]").is_none());
    }

    #[test]
    fn test_missing_argument() {
        let leaf = parse_leaf_line(r#"::lightbox{alt="Oops no image"}"#).unwrap();
        assert_eq!(leaf.args.argument, "");
    }

    #[test]
    fn test_quoted_brace_in_caption() {
        let leaf = parse_leaf_line(r#"::lightbox[a.png]{caption="set {x}"}"#).unwrap();
        assert_eq!(leaf.args.get("caption"), Some("set {x}"));
    }

    #[test]
    fn test_parse_delimited_unclosed() {
        assert_eq!(parse_delimited("[abc", '[', ']'), ("", 0));
    }

    #[test]
    fn test_parse_delimited_nested() {
        assert_eq!(parse_delimited("[a[b]c] rest", '[', ']'), ("a[b]c", 7));
    }
}
