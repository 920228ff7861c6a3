use std::path::Path;

/// Per-file outcome reported by a decompiler backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecompileOutcome {
    /// A source file was produced.
    Ok,
    /// Output already exists and overwrite is off.
    Skipped,
    /// Anything else; the batch tallies it and moves on.
    Failed(String),
}

/// Policy flags handed to the backend for every file in a batch.
#[derive(Clone, Debug)]
pub struct DecompileOptions {
    /// Replace an existing decompiled output instead of skipping.
    pub overwrite: bool,
    /// Obfuscation-tolerant slow path.
    pub try_harder: bool,
    /// Dump the raw syntax tree instead of rendering source.
    pub dump: bool,
    /// Emit output with the initial indentation offset applied.
    pub init_offset: bool,
    /// Custom statement-name table, when the backend supports one.
    pub statement_names: Option<Vec<String>>,
}

impl Default for DecompileOptions {
    // The batch policy: never overwrite, plain mode, render source,
    // init offset on, stock statement names.
    fn default() -> Self {
        Self {
            overwrite: false,
            try_harder: false,
            dump: false,
            init_offset: true,
            statement_names: None,
        }
    }
}

/// Capability contract for the bytecode-to-source engine. The engine decides
/// where its output lands (conventionally next to the input) and reports the
/// per-file outcome as an explicit value; it must not panic on bad input.
pub trait ScriptDecompiler {
    fn decompile(&self, file: &Path, opts: &DecompileOptions) -> DecompileOutcome;
}
