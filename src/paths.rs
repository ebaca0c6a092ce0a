//! Lexical path helpers.
//!
//! Nothing here touches the filesystem except [`absolutize`], which reads the
//! current working directory.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components and fold `..` into its parent, without following
/// symlinks. `..` never climbs above the root of an absolute path.
pub fn normalize(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match result.components().next_back() {
                Some(Component::Normal(_)) => {
                    result.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => result.push(".."),
            },
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Resolve `path` against the current working directory and normalize it.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(&std::env::current_dir()?.join(path)))
    }
}

/// Render a path with forward slashes, for glob matching.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Join a glob pattern onto `base`, folding `.` and `..` segments.
///
/// Metacharacters in `base` are escaped so they match literally; the
/// pattern's own `**` and `*.js` survive intact.
pub fn anchor_pattern(base: &Path, pattern: &str) -> String {
    let base = to_slash(base);
    let pattern = pattern.replace('\\', "/");

    let (root, rest) = match base.strip_prefix('/') {
        Some(rest) => ("/", rest),
        None => ("", base.as_str()),
    };

    let mut segments: Vec<String> = rest
        .split('/')
        .filter(|s| !s.is_empty())
        .map(globset::escape)
        .collect();
    for segment in pattern.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other.to_string()),
        }
    }

    format!("{}{}", root, segments.join("/"))
}
