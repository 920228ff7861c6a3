use crate::codec::ArchiveCodec;
use crate::codec::rpa::RpaArchive;
use crate::domain::ListResult;
use std::path::Path;

/// Stateless listing query: sorted entry paths plus the container format
/// version. No progress reporting.
pub fn list(archive: &Path) -> ListResult {
    list_with::<RpaArchive>(archive)
}

pub fn list_with<C: ArchiveCodec>(archive: &Path) -> ListResult {
    match C::open(archive) {
        Ok(ar) => {
            let mut files = ar.list();
            files.sort();
            ListResult {
                success: true,
                message: format!("Found {} files", files.len()),
                version: ar.version(),
                files,
            }
        }
        Err(e) => ListResult {
            success: false,
            message: format!("Error: {e}"),
            files: Vec::new(),
            version: "unknown".to_string(),
        },
    }
}
