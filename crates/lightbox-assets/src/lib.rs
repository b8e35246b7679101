//! Static assets shipped with interactive lightbox output.
//!
//! - **`embed` feature on**: assets are compiled into the binary via `rust-embed`
//! - **`embed` feature off**: assets are read from this crate's `static/`
//!   directory at runtime

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};

/// Embedded static assets (only available with `embed` feature).
#[cfg(feature = "embed")]
#[derive(rust_embed::RustEmbed)]
#[folder = "static"]
#[prefix = ""]
struct Assets;

/// Directory for filesystem-based asset access.
#[cfg(not(feature = "embed"))]
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Get an asset by name (`lightbox.css`, `lightbox.js`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[cfg(feature = "embed")]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Assets::get(path).map(|f| f.data)
}

/// Get an asset by name (`lightbox.css`, `lightbox.js`).
///
/// Returns the file contents if the asset exists, `None` otherwise.
#[cfg(not(feature = "embed"))]
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    if path.contains("..") {
        return None;
    }
    std::fs::read(Path::new(STATIC_DIR).join(path))
        .ok()
        .map(Cow::Owned)
}

/// Iterate all asset names.
#[cfg(feature = "embed")]
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Assets::iter()
}

/// Iterate all asset names.
#[cfg(not(feature = "embed"))]
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    let mut names: Vec<String> = std::fs::read_dir(STATIC_DIR)
        .into_iter()
        .flatten()
        .flatten()
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();
    names.into_iter().map(Cow::Owned)
}

/// Return the MIME type string for the given file path.
pub fn mime_for(path: &str) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
}

/// Write every asset into `out_dir`, creating it if needed.
///
/// Returns the written paths.
pub fn write_all(out_dir: &Path) -> io::Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)?;
    let mut written = Vec::new();
    for name in iter() {
        let Some(data) = get(&name) else {
            continue;
        };
        let path = out_dir.join(name.as_ref());
        std::fs::write(&path, data.as_ref())?;
        written.push(path);
    }
    Ok(written)
}
