use crate::block::block_header::EXTRA_SIZE;
use crate::block::block_type::BlockType;

/// Header fields recovered from the head block of a chain by `load` (§4.1).
#[derive(Debug, Clone)]
pub struct LoadInfo {
    pub block_type: BlockType,
    pub entity_hash: u64,
    pub extra: [u8; EXTRA_SIZE],
    pub count: u32,
    pub start: u32,
}
