//! Directive argument tokenizing.
//!
//! Splits the `[argument]{.class key="value"}` syntax of a leaf directive into
//! the raw argument and an option mapping.

use std::collections::BTreeMap;

/// Raw option values keyed by option name, before validation.
pub type RawOptions = BTreeMap<String, String>;

/// Tokenized arguments from directive syntax.
///
/// # Example
///
/// ```
/// use lightbox_renderer::directive::DirectiveArgs;
///
/// let args = DirectiveArgs::parse("/images/a.png", r#".framed alt="A cat" percentage="60 90""#);
/// assert_eq!(args.argument, "/images/a.png");
/// assert_eq!(args.classes, vec!["framed"]);
/// assert_eq!(args.get("alt"), Some("A cat"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveArgs {
    /// Argument from brackets (empty string if not provided).
    pub argument: String,
    /// Classes given with the `.class` shorthand.
    pub classes: Vec<String>,
    /// Key-value options: `{key="value"}`.
    pub options: RawOptions,
}

impl DirectiveArgs {
    /// Parse argument and attributes string into structured arguments.
    ///
    /// # Arguments
    ///
    /// * `argument` - The content from brackets `[argument]`
    /// * `attrs_str` - The attributes string from braces `{...}` (without braces)
    #[must_use]
    pub fn parse(argument: &str, attrs_str: &str) -> Self {
        let mut args = Self {
            argument: argument.trim().to_owned(),
            ..Default::default()
        };

        let mut remaining = attrs_str.trim();

        while !remaining.is_empty() {
            if let Some(rest) = remaining.strip_prefix('.') {
                let end = rest
                    .find(|c: char| c.is_whitespace() || c == '.')
                    .unwrap_or(rest.len());
                if end > 0 {
                    args.classes.push(rest[..end].to_owned());
                }
                remaining = &rest[end..];
            } else if let Some((key, value, rest)) = parse_key_value(remaining) {
                args.options.insert(key.to_owned(), value);
                remaining = rest;
            } else {
                // Skip one unrecognized character
                let skip = remaining.chars().next().map_or(1, char::len_utf8);
                remaining = &remaining[skip..];
            }
            remaining = remaining.trim_start();
        }

        args
    }

    /// Get an option value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }

    /// Fold the `.class` shorthand into the `class` option.
    ///
    /// Tokens from an explicit `class="..."` option come first, shorthand
    /// classes follow in the order they were written.
    #[must_use]
    pub fn into_options(self) -> (String, RawOptions) {
        let mut options = self.options;
        if !self.classes.is_empty() {
            let shorthand = self.classes.join(" ");
            options
                .entry("class".to_owned())
                .and_modify(|existing| {
                    existing.push(' ');
                    existing.push_str(&shorthand);
                })
                .or_insert(shorthand);
        }
        (self.argument, options)
    }
}

/// Parse a key-value pair from the attributes string.
///
/// Supports `key="value"`, `key='value'` and `key=value`. Inside double
/// quotes, `\"` stands for a literal quote.
fn parse_key_value(s: &str) -> Option<(&str, String, &str)> {
    let key_end = s.find(|c: char| c == '=' || c.is_whitespace())?;
    let key = &s[..key_end];
    if key.is_empty() || !s[key_end..].starts_with('=') {
        return None;
    }

    let after_eq = &s[key_end + 1..];

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let mut value = String::new();
        let mut chars = stripped.char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' if stripped[i + 1..].starts_with('"') => {
                    value.push('"');
                    chars.next();
                }
                '"' => return Some((key, value, &stripped[i + 1..])),
                _ => value.push(c),
            }
        }
        None
    } else if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end_quote = stripped.find('\'')?;
        Some((key, stripped[..end_quote].to_owned(), &stripped[end_quote + 1..]))
    } else {
        let end = after_eq.find(char::is_whitespace).unwrap_or(after_eq.len());
        Some((key, after_eq[..end].to_owned(), &after_eq[end..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args() {
        let args = DirectiveArgs::parse("", "");
        assert_eq!(args.argument, "");
        assert!(args.classes.is_empty());
        assert!(args.options.is_empty());
    }

    #[test]
    fn test_argument_is_trimmed() {
        let args = DirectiveArgs::parse("  images/a.png ", "");
        assert_eq!(args.argument, "images/a.png");
    }

    #[test]
    fn test_classes() {
        let args = DirectiveArgs::parse("", ".foo .bar.baz");
        assert_eq!(args.classes, vec!["foo", "bar", "baz"]);
    }

    #[test]
    fn test_double_quoted_value() {
        let args = DirectiveArgs::parse("", r#"caption="Hello World""#);
        assert_eq!(args.get("caption"), Some("Hello World"));
    }

    #[test]
    fn test_escaped_quote_in_value() {
        let args = DirectiveArgs::parse("", r#"alt="say \"hi\"""#);
        assert_eq!(args.get("alt"), Some(r#"say "hi""#));
    }

    #[test]
    fn test_single_quoted_value() {
        let args = DirectiveArgs::parse("", "alt='Server diagram'");
        assert_eq!(args.get("alt"), Some("Server diagram"));
    }

    #[test]
    fn test_unquoted_value() {
        let args = DirectiveArgs::parse("", "latex-width=0.8");
        assert_eq!(args.get("latex-width"), Some("0.8"));
    }

    #[test]
    fn test_braces_inside_quotes() {
        let args = DirectiveArgs::parse("", r#"caption="a {b} c" alt=x"#);
        assert_eq!(args.get("caption"), Some("a {b} c"));
        assert_eq!(args.get("alt"), Some("x"));
    }

    #[test]
    fn test_empty_quoted_value() {
        let args = DirectiveArgs::parse("", r#"alt="""#);
        assert_eq!(args.get("alt"), Some(""));
    }

    #[test]
    fn test_unterminated_quote_is_skipped() {
        let args = DirectiveArgs::parse("", r#"alt="oops"#);
        assert_eq!(args.get("alt"), None);
    }

    #[test]
    fn test_into_options_merges_classes() {
        let args = DirectiveArgs::parse("a.png", r#"class="one two" .three"#);
        let (argument, options) = args.into_options();
        assert_eq!(argument, "a.png");
        assert_eq!(options.get("class").map(String::as_str), Some("one two three"));
    }

    #[test]
    fn test_into_options_shorthand_only() {
        let args = DirectiveArgs::parse("a.png", ".framed");
        let (_, options) = args.into_options();
        assert_eq!(options.get("class").map(String::as_str), Some("framed"));
    }
}
