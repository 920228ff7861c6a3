use crate::error::{Result, RpakError};
use std::io::{Read, Write};

pub const MAGIC: &[u8; 4] = b"RPAK";
pub const HEADER_LEN: u64 = 17; // magic + version + key + index_off

pub const DEFAULT_VERSION: u8 = 3;
pub const DEFAULT_KEY: u32 = 0xDEAD_BEEF;

/// Versions this codec understands. 2 stores the index plainly; 3 masks
/// index offsets and lengths with the key.
pub fn check_version(v: u8) -> Result<()> {
    if v == 2 || v == 3 {
        Ok(())
    } else {
        Err(RpakError::Format(format!("unsupported archive version: {v}")))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Superblock {
    pub version: u8,
    /// Index obfuscation key; only meaningful for version 3.
    pub key: u32,
    /// Absolute file offset of the zlib-compressed index.
    pub index_off: u64,
}

impl Superblock {
    pub fn write_to(&self, mut w: impl Write) -> std::io::Result<()> {
        w.write_all(MAGIC)?;
        w.write_all(&[self.version])?;
        w.write_all(&self.key.to_le_bytes())?;
        w.write_all(&self.index_off.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from(mut r: impl Read) -> Result<Self> {
        let mut magic = [0u8; 4];
        r.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(RpakError::Format("not a rpak archive".to_string()));
        }
        let mut v = [0u8; 1];
        r.read_exact(&mut v)?;
        check_version(v[0])?;
        let mut k = [0u8; 4];
        r.read_exact(&mut k)?;
        let mut off = [0u8; 8];
        r.read_exact(&mut off)?;
        Ok(Self {
            version: v[0],
            key: u32::from_le_bytes(k),
            index_off: u64::from_le_bytes(off),
        })
    }
}
