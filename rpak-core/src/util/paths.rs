//! Archive entry paths are forward-slash separated regardless of host
//! platform. Every conversion between entry paths and host paths goes
//! through here so extract, create and list cannot drift apart.

use crate::error::{Result, RpakError};
use std::path::{Path, PathBuf};

/// Render a host-relative path as an archive entry path.
pub fn to_archive_path(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join an archive entry path onto a host root, normalizing separators to
/// the host convention and rejecting traversal outside the root.
pub fn safe_join(root: &Path, entry: &str) -> Result<PathBuf> {
    if entry.starts_with('/') || entry.contains('\\') || entry.split('/').any(|c| c == "..") {
        return Err(RpakError::Format(format!("unsafe path: {entry}")));
    }
    let mut p = root.to_path_buf();
    for comp in entry.split('/').filter(|c| !c.is_empty() && *c != ".") {
        p.push(comp);
    }
    Ok(p)
}
