//! Output targets.

use std::fmt;
use std::str::FromStr;

/// Output format a document is rendered to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Target {
    /// One HTML page per document.
    Html,
    /// All documents in one HTML page.
    SingleHtml,
    /// One `index.html` per document directory.
    DirHtml,
    /// LaTeX for print.
    Latex,
    /// Plain text.
    Text,
    /// Manual pages.
    Man,
    /// Texinfo.
    Texinfo,
    /// EPUB (XHTML without scripting).
    Epub,
}

/// How a target treats lightbox nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFamily {
    /// Checkbox-driven overlay markup.
    Interactive,
    /// One captioned figure.
    Typeset,
    /// A single plain image.
    Fallback,
}

impl Target {
    /// Every supported target.
    pub const ALL: [Self; 8] = [
        Self::Html,
        Self::SingleHtml,
        Self::DirHtml,
        Self::Latex,
        Self::Text,
        Self::Man,
        Self::Texinfo,
        Self::Epub,
    ];

    /// Builder name (`html`, `latex`, ...).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::SingleHtml => "singlehtml",
            Self::DirHtml => "dirhtml",
            Self::Latex => "latex",
            Self::Text => "text",
            Self::Man => "man",
            Self::Texinfo => "texinfo",
            Self::Epub => "epub",
        }
    }

    /// Rendering family.
    #[must_use]
    pub fn family(self) -> TargetFamily {
        match self {
            Self::Html | Self::SingleHtml | Self::DirHtml => TargetFamily::Interactive,
            Self::Latex => TargetFamily::Typeset,
            Self::Text | Self::Man | Self::Texinfo | Self::Epub => TargetFamily::Fallback,
        }
    }

    /// URL path of a document's output page, used as the base for relative
    /// image links.
    ///
    /// ```
    /// use lightbox_renderer::Target;
    ///
    /// assert_eq!(Target::Html.page_path("guide/setup"), "guide/setup");
    /// assert_eq!(Target::DirHtml.page_path("guide/setup"), "guide/setup/");
    /// assert_eq!(Target::DirHtml.page_path("guide/index"), "guide/");
    /// assert_eq!(Target::SingleHtml.page_path("guide/setup"), "");
    /// ```
    #[must_use]
    pub fn page_path(self, docname: &str) -> String {
        match self {
            Self::SingleHtml => String::new(),
            Self::DirHtml => match docname.strip_suffix("index") {
                Some(dir) if dir.is_empty() || dir.ends_with('/') => dir.to_owned(),
                _ => format!("{docname}/"),
            },
            _ => docname.to_owned(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized target name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown target '{0}' (expected one of: html, singlehtml, dirhtml, latex, text, man, texinfo, epub)")]
pub struct UnknownTarget(pub String);

impl FromStr for Target {
    type Err = UnknownTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTarget(s.to_owned()))
    }
}
