//! Directive option validation.
//!
//! Turns a raw argument and option mapping into an immutable [`DirectiveSpec`].

use crate::error::ValidationError;

use super::RawOptions;

/// Options recognized by the `lightbox` directive.
pub const OPTION_NAMES: &[&str] = &["alt", "caption", "class", "percentage", "latex-width"];

/// Validated input of one lightbox directive.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveSpec {
    /// Image reference, root-absolute (`/images/a.png`) or document-relative.
    pub image_reference: String,
    /// Alternative text, copied verbatim.
    pub alt_text: String,
    /// Caption, copied verbatim and escaped per target later.
    pub caption: Option<String>,
    /// Extra CSS classes in order of first appearance, without duplicates.
    pub extra_classes: Vec<String>,
    /// Zero, one, or two positive percentages (thumbnail, overlay).
    pub size_policy_input: Vec<u32>,
    /// Print width fraction in (0, 1] overriding the overlay-derived one.
    pub print_width_override: Option<f64>,
}

impl DirectiveSpec {
    /// Validate a directive's argument and options.
    ///
    /// # Example
    ///
    /// ```
    /// use lightbox_renderer::directive::{DirectiveSpec, RawOptions};
    ///
    /// let mut options = RawOptions::new();
    /// options.insert("percentage".to_owned(), "60 90".to_owned());
    /// let spec = DirectiveSpec::parse(Some("/images/a.png"), &options).unwrap();
    /// assert_eq!(spec.size_policy_input, vec![60, 90]);
    /// ```
    pub fn parse(argument: Option<&str>, options: &RawOptions) -> Result<Self, ValidationError> {
        let image_reference = argument
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingReference)?
            .to_owned();

        if let Some(unknown) = options
            .keys()
            .find(|key| !OPTION_NAMES.contains(&key.as_str()))
        {
            return Err(ValidationError::UnknownOption(unknown.clone()));
        }

        let size_policy_input = match options.get("percentage") {
            Some(raw) => parse_percentages(raw)?,
            None => Vec::new(),
        };

        let print_width_override = options
            .get("latex-width")
            .map(|raw| parse_print_width(raw))
            .transpose()?;

        Ok(Self {
            image_reference,
            alt_text: options.get("alt").cloned().unwrap_or_default(),
            caption: options.get("caption").cloned(),
            extra_classes: options
                .get("class")
                .map(|raw| split_classes(raw))
                .unwrap_or_default(),
            size_policy_input,
            print_width_override,
        })
    }

    /// Percentages above 100 that were accepted as written.
    pub fn oversized_percentages(&self) -> impl Iterator<Item = u32> + '_ {
        self.size_policy_input.iter().copied().filter(|&p| p > 100)
    }
}

/// Parse one or two whitespace- or comma-separated positive integers.
fn parse_percentages(raw: &str) -> Result<Vec<u32>, ValidationError> {
    let invalid = |reason| ValidationError::InvalidPercentage {
        value: raw.to_owned(),
        reason,
    };

    let tokens: Vec<&str> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();

    if tokens.is_empty() {
        return Err(invalid("expected one or two positive integers"));
    }
    if tokens.len() > 2 {
        return Err(invalid("at most two values are allowed"));
    }

    tokens
        .into_iter()
        .map(|token| match token.parse::<i64>() {
            Ok(n) if n <= 0 => Err(invalid("values must be positive")),
            Ok(n) => u32::try_from(n).map_err(|_| invalid("value is too large")),
            Err(_) => Err(invalid("values must be integers")),
        })
        .collect()
}

fn parse_print_width(raw: &str) -> Result<f64, ValidationError> {
    match raw.trim().parse::<f64>() {
        Ok(width) if width > 0.0 && width <= 1.0 => Ok(width),
        _ => Err(ValidationError::InvalidPrintWidth {
            value: raw.to_owned(),
        }),
    }
}

fn split_classes(raw: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for token in raw.split_whitespace() {
        if !classes.iter().any(|c| c == token) {
            classes.push(token.to_owned());
        }
    }
    classes
}
