//! Shared path helpers.

use std::path::{Component, Path, PathBuf};

/// Compute a relative URL from one document to a target path (RFC 3986).
///
/// Both `from` and `to` are URL paths without leading slash. The last segment
/// of `from` is the current document; the base directory is everything
/// before it.
///
/// # Examples
///
/// ```
/// use lightbox_renderer::relative_path;
///
/// assert_eq!(relative_path("index", "_images/a.png"), "_images/a.png");
/// assert_eq!(relative_path("guide/setup", "_images/a.png"), "../_images/a.png");
/// ```
pub fn relative_path(from: &str, to: &str) -> String {
    let from_segs: Vec<&str> = from.split('/').filter(|s| !s.is_empty()).collect();
    let to_segs: Vec<&str> = to.split('/').filter(|s| !s.is_empty()).collect();

    // Trailing slash means the document is empty: all segments are the directory.
    let from_dir = if from.ends_with('/') || from_segs.is_empty() {
        &from_segs[..]
    } else {
        &from_segs[..from_segs.len() - 1]
    };

    let common = from_dir
        .iter()
        .zip(&to_segs)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let remaining = &to_segs[common..];

    let result = format!("{}{}", "../".repeat(ups), remaining.join("/"));
    if result.is_empty() {
        "./".to_owned()
    } else {
        result
    }
}

/// Directory part of a document name (`guide/setup` -> `guide`).
pub(crate) fn docname_dir(docname: &str) -> &str {
    docname.rsplit_once('/').map_or("", |(dir, _)| dir)
}

/// Resolve `.` and `..` components without touching the filesystem.
///
/// `..` at the filesystem root is dropped, matching how the OS resolves it.
pub(crate) fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(component),
            },
            other => out.push(other),
        }
    }
    out
}

/// Convert a relative path into a forward-slash string.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_root_document() {
        assert_eq!(relative_path("index", "_images/t1.png"), "_images/t1.png");
    }

    #[test]
    fn test_relative_path_nested_document() {
        assert_eq!(
            relative_path("a/b/page", "_images/t1.png"),
            "../../_images/t1.png"
        );
    }

    #[test]
    fn test_relative_path_shared_prefix() {
        assert_eq!(relative_path("images/page", "images/a.png"), "a.png");
    }

    #[test]
    fn test_relative_path_both_empty() {
        assert_eq!(relative_path("", ""), "./");
    }

    #[test]
    fn test_relative_path_trailing_slash_is_directory() {
        assert_eq!(relative_path("guide/", "guide/a.png"), "a.png");
    }

    #[test]
    fn test_docname_dir() {
        assert_eq!(docname_dir("index"), "");
        assert_eq!(docname_dir("nested/page"), "nested");
        assert_eq!(docname_dir("a/b/c"), "a/b");
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/src/docs/../images/./a.png")),
            PathBuf::from("/src/images/a.png")
        );
        assert_eq!(
            normalize_lexically(Path::new("/src/../../etc/passwd")),
            PathBuf::from("/etc/passwd")
        );
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("images/sub/a.png")), "images/sub/a.png");
    }
}
