use crate::codec::ArchiveCodec;
use crate::codec::rpa::RpaArchive;
use crate::container::superblock::{DEFAULT_KEY, DEFAULT_VERSION};
use crate::domain::FilesResult;
use crate::error::Result;
use crate::progress::{Operation, ProgressTracker};
use crate::util::paths::to_archive_path;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Clone, Copy, Debug)]
pub struct CreateOptions {
    /// Container format version (2 or 3).
    pub version: u8,
    /// Index obfuscation key, used by version 3.
    pub key: u32,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION,
            key: DEFAULT_KEY,
        }
    }
}

/// Pack every regular file under `source` into a new archive at `out`,
/// fail-fast: the first file that cannot be read or added aborts the run
/// and nothing is persisted at `out`.
pub fn create(
    source: &Path,
    out: &Path,
    opts: CreateOptions,
    channel: Option<&Path>,
) -> FilesResult {
    create_with::<RpaArchive>(source, out, opts, channel)
}

/// Generic driver behind [`create`]; tests substitute codec backends.
pub fn create_with<C: ArchiveCodec>(
    source: &Path,
    out: &Path,
    opts: CreateOptions,
    channel: Option<&Path>,
) -> FilesResult {
    let mut prog = ProgressTracker::new(Operation::Create, channel);

    // Discover the work list up front; the total is fixed before any file
    // is read. Directories are not counted.
    let files: Vec<PathBuf> = WalkDir::new(source)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.depth() > 0 && e.file_type().is_file())
        .map(|e| e.into_path())
        .collect();

    let total = files.len() as u64;
    if total == 0 {
        let msg = "No files found in source directory".to_string();
        prog.fail(0, "", &msg);
        return FilesResult {
            success: false,
            message: msg,
            files: Vec::new(),
        };
    }

    prog.begin(total, "Initializing archive...");

    let mut ar = match C::new(opts.version, opts.key) {
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

    let mut added: Vec<String> = Vec::with_capacity(files.len());

    for (idx, path) in files.iter().enumerate() {
        let rel = path.strip_prefix(source).unwrap_or(path);
        let arc_path = to_archive_path(rel);

        if let Err(e) = read_add(&mut ar, path, &arc_path) {
            let msg = format!("Error adding {}: {e}", path.display());
            tracing::warn!("{msg}");
            prog.fail(idx as u64, &arc_path, &msg);
            return FilesResult {
                success: false,
                message: msg,
                files: added,
            };
        }
        added.push(arc_path.clone());

        let count = idx as u64 + 1;
        if count % 5 == 0 || count == total {
            prog.tick(count, &arc_path);
        }
    }

    if let Err(e) = ar.save(out) {
        let msg = format!("Error: {e}");
        prog.fail(total, "", &msg);
        return FilesResult {
            success: false,
            message: msg,
            files: added,
        };
    }

    prog.complete();
    tracing::info!("created {} with {} files", out.display(), added.len());
    FilesResult {
        success: true,
        message: format!("Successfully created archive with {} files", added.len()),
        files: added,
    }
}

fn read_add<C: ArchiveCodec>(ar: &mut C, path: &Path, arc_path: &str) -> Result<()> {
    let bytes = fs::read(path)?;
    ar.add(arc_path, bytes)
}
