use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Extract,
    Create,
    Decompile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    InProgress,
    Completed,
    Failed,
}

/// One self-contained status record, written whole to the side channel so a
/// polling observer never sees a torn mix of two snapshots.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub operation: Operation,
    /// Fixed once computed at operation start; never recomputed mid-run.
    pub total_files: u64,
    pub processed_files: u64,
    /// Last item touched, or a phase label ("Scanning files...", "Complete").
    pub current_file: String,
    pub start_time: i64,
    pub last_update_time: i64,
    pub status: Status,
    pub error_message: String,
}

impl ProgressSnapshot {
    pub fn percentage(&self) -> u32 {
        if self.total_files == 0 {
            return 0;
        }
        (self.processed_files * 100 / self.total_files) as u32
    }

    pub fn elapsed_ms(&self) -> i64 {
        (self.last_update_time - self.start_time).max(0)
    }

    pub fn files_per_second(&self) -> f64 {
        let ms = self.elapsed_ms();
        if ms == 0 {
            return 0.0;
        }
        self.processed_files as f64 * 1000.0 / ms as f64
    }
}

pub fn now_ms() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Serialize one snapshot to the channel path. Best-effort by contract:
/// a `None` channel is a no-op and write failures are discarded, never
/// surfaced to the owning operation. Implementers must not add retries.
pub fn report(channel: Option<&Path>, snap: &ProgressSnapshot) {
    let Some(path) = channel else { return };
    if let Err(e) = write_snapshot(path, snap) {
        tracing::warn!("progress write to {} dropped: {e}", path.display());
    }
}

// Stage to a sibling temp file and rename in, so each write replaces the
// channel content atomically.
fn write_snapshot(path: &Path, snap: &ProgressSnapshot) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&serde_json::to_vec(snap)?)?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Owns the snapshot for the duration of one batch run; all mutation funnels
/// through here, which keeps `processed_files` monotonic, caps it at
/// `total_files`, and guarantees exactly one terminal write per run.
pub struct ProgressTracker {
    channel: Option<PathBuf>,
    snap: ProgressSnapshot,
}

impl ProgressTracker {
    pub fn new(operation: Operation, channel: Option<&Path>) -> Self {
        let now = now_ms();
        Self {
            channel: channel.map(Path::to_path_buf),
            snap: ProgressSnapshot {
                operation,
                total_files: 0,
                processed_files: 0,
                current_file: String::new(),
                start_time: now,
                last_update_time: now,
                status: Status::InProgress,
                error_message: String::new(),
            },
        }
    }

    /// Emit the initial snapshot; fixes the unit-of-work count for the run.
    pub fn begin(&mut self, total: u64, label: &str) {
        self.snap.total_files = total;
        self.snap.current_file = label.to_string();
        self.write();
    }

    pub fn tick(&mut self, processed: u64, current: &str) {
        if self.snap.status != Status::InProgress {
            return;
        }
        self.set_processed(processed);
        self.snap.current_file = current.to_string();
        self.write();
    }

    pub fn complete(&mut self) {
        if self.snap.status != Status::InProgress {
            return;
        }
        self.snap.processed_files = self.snap.total_files;
        self.snap.current_file = "Complete".to_string();
        self.snap.status = Status::Completed;
        self.write();
    }

    pub fn fail(&mut self, processed: u64, current: &str, error: &str) {
        if self.snap.status != Status::InProgress {
            return;
        }
        self.set_processed(processed);
        self.snap.current_file = current.to_string();
        self.snap.status = Status::Failed;
        self.snap.error_message = error.to_string();
        self.write();
    }

    pub fn snapshot(&self) -> &ProgressSnapshot {
        &self.snap
    }

    fn set_processed(&mut self, n: u64) {
        let n = n.min(self.snap.total_files);
        if n > self.snap.processed_files {
            self.snap.processed_files = n;
        }
    }

    fn write(&mut self) {
        self.snap.last_update_time = now_ms();
        report(self.channel.as_deref(), &self.snap);
    }
}
