use crate::codec::ArchiveCodec;
use crate::codec::rpa::RpaArchive;
use crate::domain::FilesResult;
use crate::error::Result;
use crate::progress::{Operation, ProgressTracker};
use crate::util::paths::safe_join;
use std::fs;
use std::path::Path;

/// Extract every entry of `archive` into `dest`, fail-fast: the first entry
/// that cannot be read or written aborts the run and the result reports the
/// entries written before it.
pub fn extract(archive: &Path, dest: &Path, channel: Option<&Path>) -> FilesResult {
    extract_with::<RpaArchive>(archive, dest, channel)
}

/// Generic driver behind [`extract`]; tests substitute codec backends.
pub fn extract_with<C: ArchiveCodec>(
    archive: &Path,
    dest: &Path,
    channel: Option<&Path>,
) -> FilesResult {
    let mut prog = ProgressTracker::new(Operation::Extract, channel);

    let mut ar = match C::open(archive) {
        Ok(ar) => ar,
        Err(e) => {
            let msg = format!("Error: {e}");
            prog.fail(0, "", &msg);
            return FilesResult {
                success: false,
                message: msg,
                files: Vec::new(),
            };
        }
    };

    let entries = ar.list();
    prog.begin(entries.len() as u64, "Loading archive...");

    if let Err(e) = fs::create_dir_all(dest) {
        let msg = format!("Error: {e}");
        prog.fail(0, "", &msg);
        return FilesResult {
            success: false,
            message: msg,
            files: Vec::new(),
        };
    }

    let mut extracted: Vec<String> = Vec::with_capacity(entries.len());

    for (idx, entry) in entries.iter().enumerate() {
        if let Err(e) = write_entry(&mut ar, dest, entry) {
            let msg = format!("Error extracting {entry}: {e}");
            tracing::warn!("{msg}");
            prog.fail(idx as u64, entry, &msg);
            return FilesResult {
                success: false,
                message: msg,
                files: extracted,
            };
        }
        extracted.push(entry.clone());
        if idx % 5 == 0 || idx + 1 == entries.len() {
            prog.tick(idx as u64 + 1, entry);
        }
    }

    prog.complete();
    tracing::info!(
        "extracted {} entries from {}",
        extracted.len(),
        archive.display()
    );
    FilesResult {
        success: true,
        message: format!("Successfully extracted {} files", extracted.len()),
        files: extracted,
    }
}

// Destination is overwritten unconditionally when already present.
fn write_entry<C: ArchiveCodec>(ar: &mut C, dest: &Path, entry: &str) -> Result<()> {
    let bytes = ar.read(entry)?;
    let outp = safe_join(dest, entry)?;
    if let Some(parent) = outp.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&outp, &bytes)?;
    Ok(())
}
