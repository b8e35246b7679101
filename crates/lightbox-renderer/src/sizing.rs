//! Percentage-based sizing policy.
//!
//! One directive yields three sizes: the thumbnail width (percentage of the
//! content column), the overlay extent (percentage of the viewport) and the
//! print width (fraction of the line width).

use std::fmt;

/// Thumbnail width when no percentage is given.
pub const DEFAULT_THUMBNAIL_PERCENTAGE: u32 = 100;

/// Overlay extent when fewer than two percentages are given.
pub const DEFAULT_OVERLAY_PERCENTAGE: u32 = 95;

/// Width/height ratio used when image dimensions are unknown.
pub const FALLBACK_ASPECT_RATIO: f64 = 1.0;

/// Print width as a fraction of the line width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrintWidth {
    /// Derived from the overlay percentage; renders with two decimals.
    Derived(u32),
    /// Set explicitly with `latex-width`; renders as written.
    Override(f64),
}

impl PrintWidth {
    /// Width as a fraction.
    #[must_use]
    pub fn fraction(self) -> f64 {
        match self {
            Self::Derived(percentage) => f64::from(percentage) / 100.0,
            Self::Override(fraction) => fraction,
        }
    }
}

impl fmt::Display for PrintWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Derived(_) => write!(f, "{:.2}", self.fraction()),
            Self::Override(fraction) => write!(f, "{fraction}"),
        }
    }
}

/// Sizes derived from a directive's `percentage` and `latex-width` options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingResult {
    /// Thumbnail width in percent of the content column.
    pub thumbnail_percentage: u32,
    /// Overlay extent in percent of the viewport.
    pub overlay_percentage: u32,
    /// Maximum print width.
    pub print_width: PrintWidth,
}

impl SizingResult {
    /// Compute sizes from zero, one, or two percentages and an optional
    /// print width override.
    ///
    /// ```
    /// use lightbox_renderer::SizingResult;
    ///
    /// let sizing = SizingResult::compute(&[60, 90], None);
    /// assert_eq!(sizing.thumbnail_percentage, 60);
    /// assert_eq!(sizing.overlay_percentage, 90);
    /// assert_eq!(sizing.print_width.to_string(), "0.90");
    /// ```
    #[must_use]
    pub fn compute(percentages: &[u32], print_width_override: Option<f64>) -> Self {
        let thumbnail_percentage = percentages
            .first()
            .copied()
            .unwrap_or(DEFAULT_THUMBNAIL_PERCENTAGE);
        let overlay_percentage = percentages
            .get(1)
            .copied()
            .unwrap_or(DEFAULT_OVERLAY_PERCENTAGE);
        let print_width = print_width_override
            .map_or(PrintWidth::Derived(overlay_percentage), PrintWidth::Override);

        Self {
            thumbnail_percentage,
            overlay_percentage,
            print_width,
        }
    }

    /// Print width as a fraction of the line width.
    #[must_use]
    pub fn print_width_fraction(&self) -> f64 {
        self.print_width.fraction()
    }

    /// CSS width of the thumbnail (`"60%"`).
    #[must_use]
    pub fn thumbnail_width(&self) -> String {
        format!("{}%", self.thumbnail_percentage)
    }

    /// CSS sizing for the enlarged image.
    ///
    /// Fits the image into `P` percent of the viewport in both directions
    /// while keeping its aspect ratio, without any runtime script.
    #[must_use]
    pub fn overlay_size_style(&self, aspect_ratio: f64) -> String {
        let p = self.overlay_percentage;
        format!(
            "width: min({p}vw, calc({p}vh * {aspect_ratio:.4}));\
             height: min({p}vh, calc({p}vw / {aspect_ratio:.4}));"
        )
    }
}

impl Default for SizingResult {
    fn default() -> Self {
        Self::compute(&[], None)
    }
}
