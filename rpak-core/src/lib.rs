#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod progress;

pub mod util {
    pub mod paths;
}

pub mod container {
    pub mod index;
    pub mod superblock;
}

pub mod codec;

pub mod decomp {
    pub mod batch;
    pub mod engine;
}

pub mod pack {
    pub mod create;
}

pub mod read {
    pub mod extract;
}

pub mod list;

// Re-exports: stable API surface
pub use codec::ArchiveCodec;
pub use codec::rpa::RpaArchive;
pub use decomp::batch::decompile;
pub use decomp::engine::{DecompileOptions, DecompileOutcome, ScriptDecompiler};
pub use domain::{DecompileResult, DecompileStats, FilesResult, ListResult};
pub use list::list;
pub use pack::create::{CreateOptions, create};
pub use read::extract::extract;
