use std::io::{Cursor, Write as _};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use common::err::{DbError, DbResult};

use crate::block::block_type::BlockType;

/// `extra` is a fixed 16-byte tag: a table name, an attribute qualifier, or
/// the literal `Meta`/`LookUp` markers (§3).
pub const EXTRA_SIZE: usize = 16;

/// 1 (type) + 4 (pos) + 4 (next) + 4 (count) + 8 (entity_hash) + 4 (version)
/// + 16 (extra).
pub const HEADER_SIZE: usize = 1 + 4 + 4 + 4 + 8 + 4 + EXTRA_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockHeader {
    pub block_type: BlockType,
    pub pos: u32,
    pub next: u32,
    pub count: u32,
    pub entity_hash: u64,
    pub version: u32,
    pub extra: [u8; EXTRA_SIZE],
}

impl BlockHeader {
    pub fn new(
        block_type: BlockType,
        pos: u32,
        next: u32,
        count: u32,
        entity_hash: u64,
        version: u32,
        extra: [u8; EXTRA_SIZE],
    ) -> Self {
        BlockHeader {
            block_type,
            pos,
            next,
            count,
            entity_hash,
            version,
            extra,
        }
    }

    /// Packs an ASCII string into the fixed `extra` tag, truncating (never
    /// panicking) on overlong names.
    pub fn extra_from_str(s: &str) -> [u8; EXTRA_SIZE] {
        let mut out = [0u8; EXTRA_SIZE];
        let bytes = s.as_bytes();
        let n = bytes.len().min(EXTRA_SIZE);
        out[0..n].copy_from_slice(&bytes[0..n]);
        out
    }

    pub fn extra_as_str(&self) -> String {
        let end = self.extra.iter().position(|&b| b == 0).unwrap_or(EXTRA_SIZE);
        String::from_utf8_lossy(&self.extra[0..end]).into_owned()
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        let mut c = Cursor::new(&mut buf[0..]);
        c.write_u8(self.block_type.tag()).unwrap();
        c.write_u32::<LittleEndian>(self.pos).unwrap();
        c.write_u32::<LittleEndian>(self.next).unwrap();
        c.write_u32::<LittleEndian>(self.count).unwrap();
        c.write_u64::<LittleEndian>(self.entity_hash).unwrap();
        c.write_u32::<LittleEndian>(self.version).unwrap();
        c.write_all(&self.extra).unwrap();
        buf
    }

    pub fn from_bytes(bytes: &[u8]) -> DbResult<Self> {
        if bytes.len() != HEADER_SIZE {
            return Err(DbError::ReadError(format!(
                "expected a {}-byte header, got {}",
                HEADER_SIZE,
                bytes.len()
            )));
        }
        let mut c = Cursor::new(bytes);
        let block_type = BlockType::from_tag(c.read_u8()?)?;
        let pos = c.read_u32::<LittleEndian>()?;
        let next = c.read_u32::<LittleEndian>()?;
        let count = c.read_u32::<LittleEndian>()?;
        let entity_hash = c.read_u64::<LittleEndian>()?;
        let version = c.read_u32::<LittleEndian>()?;
        let mut extra = [0u8; EXTRA_SIZE];
        let start = c.position() as usize;
        extra.copy_from_slice(&bytes[start..start + EXTRA_SIZE]);

        Ok(BlockHeader {
            block_type,
            pos,
            next,
            count,
            entity_hash,
            version,
            extra,
        })
    }
}
