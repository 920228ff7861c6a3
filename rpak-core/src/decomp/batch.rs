use crate::decomp::engine::{DecompileOptions, DecompileOutcome, ScriptDecompiler};
use crate::domain::{DecompileResult, DecompileStats};
use crate::progress::{Operation, ProgressTracker};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Recognized compiled-script suffixes, matched case-insensitively.
/// Extending this set is a deliberate change, not an inference.
const COMPILED_EXTS: [&str; 2] = ["rpyc", "rpymc"];

fn is_compiled_script(path: &Path) -> bool {
    path.extension()
        .map(|e| {
            let e = e.to_string_lossy().to_lowercase();
            COMPILED_EXTS.iter().any(|x| *x == e)
        })
        .unwrap_or(false)
}

/// Decompile every compiled-script file under `source_dir`, in discovery
/// order. Unlike extract and create, a per-file failure never aborts the
/// batch and never flips `success`: only a structural failure (bad source
/// dir, zero matches) does.
pub fn decompile<D: ScriptDecompiler>(
    source_dir: &Path,
    engine: &D,
    channel: Option<&Path>,
) -> DecompileResult {
    let mut prog = ProgressTracker::new(Operation::Decompile, channel);

    if source_dir.as_os_str().is_empty() {
        let msg = "Source directory is None or empty".to_string();
        prog.fail(0, "", &msg);
        return DecompileResult {
            success: false,
            message: msg,
            stats: DecompileStats::default(),
        };
    }
    if !source_dir.exists() {
        let msg = format!("Source directory does not exist: {}", source_dir.display());
        prog.fail(0, "", &msg);
        return DecompileResult {
            success: false,
            message: msg,
            stats: DecompileStats::default(),
        };
    }

    let targets: Vec<PathBuf> = WalkDir::new(source_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_compiled_script(e.path()))
        .map(|e| e.into_path())
        .collect();

    let total = targets.len() as u64;
    if total == 0 {
        let msg = "No .rpyc files found in directory".to_string();
        prog.fail(0, "", &msg);
        return DecompileResult {
            success: false,
            message: msg,
            stats: DecompileStats::default(),
        };
    }

    prog.begin(total, "Scanning files...");

    let opts = DecompileOptions::default();
    let mut stats = DecompileStats {
        total,
        ..Default::default()
    };

    for (idx, file) in targets.iter().enumerate() {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if idx % 5 == 0 || idx + 1 == targets.len() {
            prog.tick(idx as u64, &name);
        }

        match engine.decompile(file, &opts) {
            DecompileOutcome::Ok => stats.success += 1,
            DecompileOutcome::Skipped => stats.skipped += 1,
            DecompileOutcome::Failed(reason) => {
                tracing::warn!("decompile failed for {}: {reason}", file.display());
                stats.failed += 1;
            }
        }
    }

    // Completed even when individual files failed.
    prog.complete();

    let message = format!(
        "Decompiled {} files ({} successful, {} skipped, {} failed)",
        stats.total, stats.success, stats.skipped, stats.failed
    );
    tracing::info!("{message}");
    DecompileResult {
        success: true,
        message,
        stats,
    }
}
