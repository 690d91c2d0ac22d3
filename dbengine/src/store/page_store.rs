use std::fs::File;
use std::path::Path;

use lru::LruCache;
use tracing::{debug, trace};

use common::err::{DbError, DbResult};
use common::file_util;
use common::structure::queue::{Queue, QueueImpl};

use crate::block::block_header::EXTRA_SIZE;
use crate::block::block_type::BlockType;
use crate::block::{Block, BlockHeader, BLOCK_SIZE, LOOKUP_BLOCK_NUM, META_BLOCK_NUM, PAYLOAD_SIZE};
use crate::store::block_meta::BlockMeta;
use crate::store::load_info::LoadInfo;
use crate::store::open_mode::OpenMode;

/// Packs an `x.y.z` engine version string into the header's `version` u32,
/// the same shape `SegmentHeader::new` stamps for its own `version` field.
pub fn pack_version(version: &str) -> u32 {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().unwrap_or(0));
    let major = parts.next().unwrap_or(0);
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);
    major * 1_000_000 + minor * 1_000 + patch
}

/// Fixed-1 KiB block read/write over a single file, with an LRU page cache,
/// free-block reclamation, and chained multi-block payloads (§4.1, C1).
pub struct PageStore {
    path: String,
    block_count: u32,
    version: u32,
    free_list: QueueImpl<u32>,
    cache: Option<LruCache<u32, Block>>,
}

impl PageStore {
    pub fn open(path: impl Into<String>, mode: OpenMode, version: &str, cache_capacity: usize) -> DbResult<Self> {
        let path = path.into();
        match mode {
            OpenMode::CreateNew => {
                if Path::new(&path).exists() {
                    return Err(DbError::DatabaseExists(path));
                }
                File::create(&path)?;
            }
            OpenMode::OpenExisting => {
                if !Path::new(&path).exists() {
                    return Err(DbError::FileDoesNotExist(path));
                }
            }
        }

        let cache = std::num::NonZeroUsize::new(cache_capacity).map(LruCache::new);

        let mut store = PageStore {
            path,
            block_count: 0,
            version: pack_version(version),
            free_list: QueueImpl::new(),
            cache,
        };
        store.block_count = store.compute_block_count()?;
        store.rebuild_free_list()?;
        Ok(store)
    }

    fn compute_block_count(&self) -> DbResult<u32> {
        let len = std::fs::metadata(&self.path)?.len();
        Ok((len / BLOCK_SIZE as u64) as u32)
    }

    /// The free list is not itself persisted; it is rebuilt on open by
    /// scanning every block for the `Free` tag (needed for invariant 2 to
    /// hold across a close/reopen cycle).
    fn rebuild_free_list(&mut self) -> DbResult<()> {
        let count = self.block_count;
        for n in 0..count {
            let block = self.read_raw(n)?;
            if block.header.block_type == BlockType::Free {
                self.free_list.push(n);
            }
        }
        Ok(())
    }

    pub fn block_count(&self) -> u32 {
        self.block_count
    }

    fn read_raw(&self, n: u32) -> DbResult<Block> {
        let bytes = file_util::read_file_bytes(&self.path, n as u64 * BLOCK_SIZE as u64, BLOCK_SIZE)?;
        if bytes.len() != BLOCK_SIZE {
            return Err(DbError::SeekError(format!("short read at block {}", n)));
        }
        Block::from_bytes(&bytes)
    }

    /// Seeking past EOF and writing extends the file (a sparse hole on
    /// POSIX filesystems), so no explicit pre-extension is needed here.
    fn write_raw(&self, n: u32, block: &Block) -> DbResult<()> {
        let bytes = block.to_bytes()?;
        file_util::update_file_bytes(&self.path, n as u64 * BLOCK_SIZE as u64, &bytes)
    }

    pub fn read_block(&mut self, n: u32) -> DbResult<Block> {
        if let Some(cache) = &mut self.cache {
            if let Some(hit) = cache.get(&n) {
                trace!(block = n, "page cache hit");
                return Ok(hit.clone());
            }
        }
        let block = self.read_raw(n)?;
        if let Some(cache) = &mut self.cache {
            cache.put(n, block.clone());
        }
        Ok(block)
    }

    pub fn write_block(&mut self, n: u32, block: &Block, invalidate: bool) -> DbResult<()> {
        self.write_raw(n, block)?;
        if n >= self.block_count {
            self.block_count = n + 1;
        }
        if let Some(cache) = &mut self.cache {
            if invalidate {
                cache.put(n, block.clone());
            } else {
                cache.pop(&n);
            }
        }
        Ok(())
    }

    /// Returns the front of the free list if any, else the next block past
    /// EOF. Fresh allocations bump `block_count` immediately (not just on
    /// the following `write_block`) so that allocating several blocks in a
    /// row, before any of them is written, hands out distinct numbers.
    pub fn allocate(&mut self) -> u32 {
        match self.free_list.pop() {
            Some(n) => n,
            None => {
                let n = self.block_count;
                self.block_count += 1;
                n
            }
        }
    }

    /// Walks `next` pointers from `head`, stamping every visited block
    /// `Free` and adding its number to the free list. `include_head=false`
    /// skips relabelling the head block, used when `save` is about to
    /// reuse it in place.
    pub fn release_chain(&mut self, head: u32, include_head: bool) -> DbResult<u32> {
        let mut count = 0u32;
        let mut current = Some(head);
        let mut first = true;
        while let Some(n) = current {
            let mut block = self.read_block(n)?;
            let next = block.header.next;
            if !first || include_head {
                block.header.block_type = BlockType::Free;
                block.header.next = 0;
                self.write_block(n, &block, false)?;
                self.free_list.push(n);
                count += 1;
            }
            current = if next == 0 { None } else { Some(next) };
            first = false;
        }
        debug!(head, include_head, count, "released block chain");
        Ok(count)
    }

    /// Allocates headers for the meta/lookup/index blocks at known
    /// positions, zero-filled payload.
    pub fn create_special(&mut self, n: u32, block_type: BlockType, extra: [u8; EXTRA_SIZE]) -> DbResult<()> {
        let header = BlockHeader::new(block_type, n, 0, 1, 0, self.version, extra);
        let block = Block { header, payload: vec![0u8; PAYLOAD_SIZE] };
        self.write_block(n, &block, true)
    }

    pub fn create_meta_and_lookup(&mut self) -> DbResult<()> {
        self.create_special(META_BLOCK_NUM, BlockType::Meta, BlockHeader::extra_from_str("Meta"))?;
        self.create_special(LOOKUP_BLOCK_NUM, BlockType::Index, BlockHeader::extra_from_str("LookUp"))
    }

    /// Iterates every block in ascending order; early-stops when `visitor`
    /// returns `false`.
    pub fn each(&mut self, mut visitor: impl FnMut(&Block) -> bool) -> DbResult<()> {
        for n in 0..self.block_count {
            let block = self.read_block(n)?;
            if !visitor(&block) {
                break;
            }
        }
        Ok(())
    }

    /// Writes `stream` as a chain of blocks, returning the head block
    /// number (§4.1).
    pub fn save(&mut self, stream: &[u8], meta: &BlockMeta) -> DbResult<u32> {
        let chain_len = ((stream.len().max(1)) as f64 / PAYLOAD_SIZE as f64).ceil() as u32;

        if let Some(existing) = meta.existing_start {
            self.release_chain(existing, false)?;
        }

        let mut block_numbers = Vec::with_capacity(chain_len as usize);
        for i in 0..chain_len {
            let n = if i == 0 {
                meta.existing_start.unwrap_or_else(|| self.allocate())
            } else {
                self.allocate()
            };
            block_numbers.push(n);
        }

        for (i, &n) in block_numbers.iter().enumerate() {
            let start = i * PAYLOAD_SIZE;
            let end = ((i + 1) * PAYLOAD_SIZE).min(stream.len());
            let mut payload = vec![0u8; PAYLOAD_SIZE];
            if start < stream.len() {
                payload[0..end - start].copy_from_slice(&stream[start..end]);
            }
            let next = if i + 1 < block_numbers.len() { block_numbers[i + 1] } else { 0 };
            let header = BlockHeader::new(meta.block_type, n, next, chain_len, meta.entity_hash, self.version, meta.extra);
            self.write_block(n, &Block { header, payload }, true)?;
        }

        Ok(block_numbers[0])
    }

    /// Walks the chain from `start`, concatenating payload bytes and
    /// returning the head block's header fields alongside them (§4.1).
    pub fn load(&mut self, start: u32) -> DbResult<(Vec<u8>, LoadInfo)> {
        let head = self.read_block(start)?;
        let info = LoadInfo {
            block_type: head.header.block_type,
            entity_hash: head.header.entity_hash,
            extra: head.header.extra,
            count: head.header.count,
            start,
        };

        let mut out = Vec::with_capacity(PAYLOAD_SIZE * info.count as usize);
        out.extend_from_slice(&head.payload);
        let mut next = head.header.next;
        while next != 0 {
            let block = self.read_block(next)?;
            out.extend_from_slice(&block.payload);
            next = block.header.next;
        }
        Ok((out, info))
    }
}
