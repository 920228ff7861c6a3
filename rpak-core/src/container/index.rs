use crate::error::{Result, RpakError};
use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// One (path, offset, length) record. Offsets are absolute into the
/// archive file.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct IndexEntry {
    pub path: String,
    pub offset: u64,
    pub len: u64,
}

// v3 masks offset/len with the key before the index is serialized.
fn mask(v: u64, key: u32) -> u64 {
    v ^ key as u64
}

/// Serialize the index as CBOR, mask for v3, zlib-compress onto `w`.
pub fn write_index<W: Write>(w: W, entries: &[IndexEntry], version: u8, key: u32) -> Result<()> {
    let masked: Vec<IndexEntry> = if version == 3 {
        entries
            .iter()
            .map(|e| IndexEntry {
                path: e.path.clone(),
                offset: mask(e.offset, key),
                len: mask(e.len, key),
            })
            .collect()
    } else {
        entries.to_vec()
    };

    let mut cbor = Vec::new();
    ciborium::ser::into_writer(&masked, &mut cbor)
        .map_err(|e| RpakError::Format(format!("index encode: {e}")))?;

    let mut enc = ZlibEncoder::new(w, Compression::default());
    enc.write_all(&cbor)?;
    enc.finish()?;
    Ok(())
}

pub fn read_index<R: Read>(r: R, version: u8, key: u32) -> Result<Vec<IndexEntry>> {
    let mut cbor = Vec::new();
    ZlibDecoder::new(r).read_to_end(&mut cbor)?;

    let mut entries: Vec<IndexEntry> = ciborium::de::from_reader(&cbor[..])
        .map_err(|e| RpakError::Format(format!("index decode: {e}")))?;

    if version == 3 {
        for e in &mut entries {
            e.offset = mask(e.offset, key);
            e.len = mask(e.len, key);
        }
    }
    Ok(entries)
}
