pub mod block_header;
pub mod block_type;

pub use block_header::BlockHeader;
pub use block_type::BlockType;

use common::err::{DbError, DbResult};

/// Fixed physical page size every block occupies on disk (§3, §6.1).
pub const BLOCK_SIZE: usize = 1024;

/// Bytes available to the payload once the fixed-width header is carved off
/// the front of the block (REDESIGN FLAG: header-before-payload, see
/// DESIGN.md).
pub const PAYLOAD_SIZE: usize = BLOCK_SIZE - block_header::HEADER_SIZE;

pub const META_BLOCK_NUM: u32 = 0;
pub const LOOKUP_BLOCK_NUM: u32 = 1;

/// One physical page: a fixed-width header followed by a payload that fills
/// the rest of the 1024-byte block.
#[derive(Debug, Clone)]
pub struct Block {
    pub header: BlockHeader,
    pub payload: Vec<u8>,
}

impl Block {
    /// A freshly zero-filled block, as allocated for meta/lookup blocks and
    /// for growing the file.
    pub fn zeroed(pos: u32) -> Self {
        Block {
            header: BlockHeader::new(BlockType::Unknown, pos, 0, 1, 0, 0, [0u8; block_header::EXTRA_SIZE]),
            payload: vec![0u8; PAYLOAD_SIZE],
        }
    }

    pub fn to_bytes(&self) -> DbResult<[u8; BLOCK_SIZE]> {
        let mut out = [0u8; BLOCK_SIZE];
        let header_bytes = self.header.to_bytes();
        out[0..block_header::HEADER_SIZE].copy_from_slice(&header_bytes);

        let n = self.payload.len().min(PAYLOAD_SIZE);
        out[block_header::HEADER_SIZE..block_header::HEADER_SIZE + n].copy_from_slice(&self.payload[0..n]);
        Ok(out)
    }

    pub fn from_bytes(bytes: &[u8]) -> DbResult<Self> {
        if bytes.len() != BLOCK_SIZE {
            return Err(DbError::ReadError(format!(
                "expected a {}-byte block, got {}",
                BLOCK_SIZE,
                bytes.len()
            )));
        }
        let header = BlockHeader::from_bytes(&bytes[0..block_header::HEADER_SIZE])?;
        let payload = bytes[block_header::HEADER_SIZE..BLOCK_SIZE].to_vec();
        Ok(Block { header, payload })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_bytes() {
        let mut b = Block::zeroed(7);
        b.header.block_type = BlockType::Data;
        b.header.next = 9;
        b.header.entity_hash = 42;
        b.payload[0] = 0xAB;

        let bytes = b.to_bytes().unwrap();
        let back = Block::from_bytes(&bytes).unwrap();
        assert_eq!(back.header.pos, 7);
        assert_eq!(back.header.next, 9);
        assert_eq!(back.header.block_type, BlockType::Data);
        assert_eq!(back.header.entity_hash, 42);
        assert_eq!(back.payload[0], 0xAB);
    }

    #[test]
    fn rejects_wrong_sized_buffers() {
        assert!(Block::from_bytes(&[0u8; 10]).is_err());
    }
}
