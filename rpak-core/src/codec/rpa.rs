use crate::container::index::{IndexEntry, read_index, write_index};
use crate::container::superblock::{HEADER_LEN, Superblock, check_version};
use crate::error::{Result, RpakError};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::ArchiveCodec;

/// Container handle. Opened archives read entry bytes lazily from the
/// backing file; archives being built hold pending contents in memory
/// until `save`.
pub struct RpaArchive {
    sb: Superblock,
    file: Option<File>,
    index: Vec<IndexEntry>,
    pending: Vec<(String, Vec<u8>)>,
}

fn read_at(f: &mut File, ie: &IndexEntry) -> Result<Vec<u8>> {
    f.seek(SeekFrom::Start(ie.offset))?;
    let mut buf = vec![0u8; ie.len as usize];
    f.read_exact(&mut buf)?;
    Ok(buf)
}

impl ArchiveCodec for RpaArchive {
    fn open(path: &Path) -> Result<Self> {
        let mut f = File::open(path)?;
        let sb = Superblock::read_from(&mut f)?;
        f.seek(SeekFrom::Start(sb.index_off))?;
        let index = read_index(&mut f, sb.version, sb.key)?;
        Ok(Self {
            sb,
            file: Some(f),
            index,
            pending: Vec::new(),
        })
    }

    fn new(version: u8, key: u32) -> Result<Self> {
        check_version(version)?;
        Ok(Self {
            sb: Superblock {
                version,
                key,
                index_off: 0,
            },
            file: None,
            index: Vec::new(),
            pending: Vec::new(),
        })
    }

    fn list(&self) -> Vec<String> {
        let mut out: Vec<String> = self.index.iter().map(|e| e.path.clone()).collect();
        out.extend(self.pending.iter().map(|(p, _)| p.clone()));
        out
    }

    fn read(&mut self, entry: &str) -> Result<Vec<u8>> {
        if let Some((_, bytes)) = self.pending.iter().find(|(p, _)| p == entry) {
            return Ok(bytes.clone());
        }
        let ie = match self.index.iter().find(|e| e.path == entry) {
            Some(e) => e.clone(),
            None => return Err(RpakError::MissingEntry(entry.to_string())),
        };
        let f = self
            .file
            .as_mut()
            .ok_or_else(|| RpakError::MissingEntry(entry.to_string()))?;
        read_at(f, &ie)
    }

    fn add(&mut self, entry: &str, bytes: Vec<u8>) -> Result<()> {
        // last add wins for a repeated path
        if let Some(slot) = self.pending.iter_mut().find(|(p, _)| p == entry) {
            slot.1 = bytes;
        } else {
            self.pending.push((entry.to_string(), bytes));
        }
        Ok(())
    }

    fn save(&mut self, out: &Path) -> Result<()> {
        // Stage to a temp file and rename in: a failed save leaves nothing
        // at `out`.
        let dir = match out.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

        // Header goes in first with index_off unknown; patched at the end.
        Superblock {
            index_off: 0,
            ..self.sb
        }
        .write_to(tmp.as_file_mut())?;

        let mut cursor = HEADER_LEN;
        let mut index: Vec<IndexEntry> = Vec::with_capacity(self.index.len() + self.pending.len());

        // entries already in the backing file keep their index order
        let existing = self.index.clone();
        for ie in &existing {
            let f = self
                .file
                .as_mut()
                .ok_or_else(|| RpakError::MissingEntry(ie.path.clone()))?;
            let bytes = read_at(f, ie)?;
            tmp.as_file_mut().write_all(&bytes)?;
            index.push(IndexEntry {
                path: ie.path.clone(),
                offset: cursor,
                len: bytes.len() as u64,
            });
            cursor += bytes.len() as u64;
        }
        for (path, bytes) in &self.pending {
            tmp.as_file_mut().write_all(bytes)?;
            index.push(IndexEntry {
                path: path.clone(),
                offset: cursor,
                len: bytes.len() as u64,
            });
            cursor += bytes.len() as u64;
        }

        write_index(tmp.as_file_mut(), &index, self.sb.version, self.sb.key)?;

        let f = tmp.as_file_mut();
        f.seek(SeekFrom::Start(0))?;
        Superblock {
            index_off: cursor,
            ..self.sb
        }
        .write_to(&mut *f)?;
        f.flush()?;

        tmp.persist(out).map_err(|e| RpakError::Io(e.error))?;
        self.sb.index_off = cursor;
        Ok(())
    }

    fn version(&self) -> String {
        self.sb.version.to_string()
    }
}
