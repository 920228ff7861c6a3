// rpak_core/src/domain.rs
use serde::Serialize;

/// Outcome of one extract or create run. When `success` is false, `files`
/// holds only the entries processed before the failing item.
#[derive(Clone, Debug, Serialize)]
pub struct FilesResult {
    pub success: bool,
    pub message: String,
    pub files: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, Serialize)]
pub struct DecompileStats {
    pub total: u64,
    pub success: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DecompileResult {
    pub success: bool,
    pub message: String,
    pub stats: DecompileStats,
}

#[derive(Clone, Debug, Serialize)]
pub struct ListResult {
    pub success: bool,
    pub message: String,
    pub files: Vec<String>,
    /// Container format version, or "unknown" when the archive is unreadable.
    pub version: String,
}
