//! Target emitters.
//!
//! - [`html`]: checkbox-driven overlay markup for interactive targets
//! - [`latex`]: one captioned figure for print
//! - [`fallback`]: a single plain image for everything else

pub(crate) mod fallback;
pub(crate) mod html;
pub(crate) mod latex;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::assets::AssetCollector;
use crate::directive::AssetPath;
use crate::target::Target;
use crate::util::relative_path;

/// Default output directory of collected images, relative to the output root.
pub const DEFAULT_IMAGES_DIR: &str = "_images";

/// Characters that cannot appear verbatim in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Where and how one document is being rendered.
pub struct RenderContext<'a> {
    /// Document being rendered.
    pub docname: &'a str,
    /// Output target.
    pub target: Target,
    /// Image registry filled by the collection pass.
    pub images: &'a dyn AssetCollector,
    /// Output directory of collected images (`_images`).
    pub images_dir: &'a str,
}

impl RenderContext<'_> {
    /// Output file of an image: its registered name, or the source path when
    /// the image was never collected.
    pub(crate) fn image_file<'p>(&'p self, asset: &'p AssetPath) -> &'p str {
        self.images
            .output_name(asset.source_relative_path())
            .unwrap_or_else(|| asset.source_relative_path())
    }

    /// URL of an image relative to the current page, percent-encoded per
    /// path segment.
    pub(crate) fn image_url(&self, asset: &AssetPath) -> String {
        let target = match self.images.output_name(asset.source_relative_path()) {
            Some(name) => format!("{}/{name}", self.images_dir.trim_end_matches('/')),
            None => asset.source_relative_path().to_owned(),
        };
        let path = relative_path(&self.target.page_path(self.docname), &target);
        path.split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/")
    }
}
