//! Path utilities.
//!
//! Unit locations in a solution tree are kept relative to the manifest
//! directory and compared lexically, so nothing here touches the disk except
//! `read_to_string`.

use std::fs;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};

/// Read a file to string, with nice error messages.
pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read file: {}", path.display()))
}

/// Lexically normalize a path by dropping `.` components and folding `..`
/// into the component before it.
///
/// `./core/Core.csproj` and `tools/../core/Core.csproj` normalize to the same
/// value, so base directories can be compared with `==`. A leading `..` that
/// has nothing to fold into is kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                _ => out.push(Component::ParentDir),
            },
            other => out.push(other),
        }
    }
    out
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Check if a normalized path is inside another normalized path.
///
/// Whatever follows `parent` must not climb back out with `..`, which also
/// keeps `../x` outside the empty path.
pub fn is_inside(path: &Path, parent: &Path) -> bool {
    path.strip_prefix(parent)
        .map(|rest| !rest.components().any(|c| c == Component::ParentDir))
        .unwrap_or(false)
}

/// Strip a leading `./` from a path.
pub fn strip_cur_dir(path: &Path) -> PathBuf {
    path.strip_prefix(".").map(Path::to_path_buf).unwrap_or_else(|_| path.to_path_buf())
}

/// The directory a unit file lives in, or the empty path for a bare file name.
pub fn parent_dir(file: &Path) -> PathBuf {
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}
