//! Host-facing asset collaborators.
//!
//! - [`AssetCollector`]: records referenced images and maps them to output names
//! - [`ImageRegistry`]: the default collector
//! - [`ImageSizeProvider`]: reads natural image dimensions

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

/// Collector of images referenced by documents.
///
/// Registration must be idempotent: registering the same path twice yields
/// a single output entry.
pub trait AssetCollector {
    /// Record that `docname` references `source_relative_path`.
    fn register(&mut self, docname: &str, source_relative_path: &str);

    /// Output file name assigned to a registered path.
    fn output_name(&self, source_relative_path: &str) -> Option<&str>;
}

/// Image table mapping source-relative paths to unique output file names.
///
/// Output names are base names; when two different sources share a base
/// name, later ones get a numeric suffix (`a.png`, `a1.png`).
///
/// # Example
///
/// ```
/// use lightbox_renderer::{AssetCollector, ImageRegistry};
///
/// let mut registry = ImageRegistry::new();
/// registry.register("index", "images/a.png");
/// registry.register("guide", "other/a.png");
/// assert_eq!(registry.output_name("images/a.png"), Some("a.png"));
/// assert_eq!(registry.output_name("other/a.png"), Some("a1.png"));
/// ```
#[derive(Debug, Default)]
pub struct ImageRegistry {
    /// Source-relative path -> output file name.
    images: BTreeMap<String, String>,
    /// Source-relative path -> documents referencing it.
    referrers: BTreeMap<String, BTreeSet<String>>,
    taken: HashSet<String>,
}

impl ImageRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct registered images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether no image is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Iterate `(source path, output name)` pairs in source path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.images.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Forget everything `docname` referenced.
    ///
    /// Images still referenced by other documents keep their output names.
    pub fn purge_document(&mut self, docname: &str) {
        let mut orphaned = Vec::new();
        for (path, docs) in &mut self.referrers {
            if docs.remove(docname) && docs.is_empty() {
                orphaned.push(path.clone());
            }
        }
        for path in orphaned {
            self.referrers.remove(&path);
            if let Some(name) = self.images.remove(&path) {
                self.taken.remove(&name);
            }
        }
    }

    fn unique_name(&self, source_relative_path: &str) -> String {
        let basename = Path::new(source_relative_path)
            .file_name()
            .map_or_else(
                || source_relative_path.to_owned(),
                |n| n.to_string_lossy().into_owned(),
            );
        if !self.taken.contains(&basename) {
            return basename;
        }

        let (stem, ext) = match basename.rfind('.') {
            Some(dot) if dot > 0 => basename.split_at(dot),
            _ => (basename.as_str(), ""),
        };
        (1..)
            .map(|i| format!("{stem}{i}{ext}"))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or(basename)
    }
}

impl AssetCollector for ImageRegistry {
    fn register(&mut self, docname: &str, source_relative_path: &str) {
        self.referrers
            .entry(source_relative_path.to_owned())
            .or_default()
            .insert(docname.to_owned());

        if self.images.contains_key(source_relative_path) {
            return;
        }
        let name = self.unique_name(source_relative_path);
        tracing::debug!(path = source_relative_path, output = %name, "Registered image");
        self.taken.insert(name.clone());
        self.images.insert(source_relative_path.to_owned(), name);
    }

    fn output_name(&self, source_relative_path: &str) -> Option<&str> {
        self.images.get(source_relative_path).map(String::as_str)
    }
}

/// Provider of natural image dimensions.
///
/// Returns `None` when the dimensions cannot be determined (corrupt or
/// unsupported data). Any `Fn(&Path) -> Option<(u32, u32)>` closure is a
/// provider.
pub trait ImageSizeProvider: Send + Sync {
    /// Width and height in pixels.
    fn dimensions(&self, path: &Path) -> Option<(u32, u32)>;
}

impl<F> ImageSizeProvider for F
where
    F: Fn(&Path) -> Option<(u32, u32)> + Send + Sync,
{
    fn dimensions(&self, path: &Path) -> Option<(u32, u32)> {
        self(path)
    }
}

/// Reads dimensions from image file headers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageHeaderSize;

impl ImageSizeProvider for ImageHeaderSize {
    fn dimensions(&self, path: &Path) -> Option<(u32, u32)> {
        match image::image_dimensions(path) {
            Ok((0, _) | (_, 0)) => None,
            Ok(size) => Some(size),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Failed to read image header");
                None
            }
        }
    }
}
