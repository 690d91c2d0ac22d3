use std::collections::HashMap;

use common::err::{DbError, DbResult};
use common::hash::entity_hash;

use crate::block::block_header::EXTRA_SIZE;
use crate::block::block_type::BlockType;
use crate::block::{BlockHeader, LOOKUP_BLOCK_NUM, META_BLOCK_NUM};
use crate::codec::index_codec::{decode_index, encode_index};
use crate::index::index_key::IndexKey;
use crate::index::table_index::Index;
use crate::store::block_meta::BlockMeta;
use crate::store::page_store::PageStore;

const ENTITY_INDEX_NAME: &str = "entities";
const TABLE_DIRECTORY_NAME: &str = "tables";

/// Per-database catalog (§3, §4.4): the entity index (table name →
/// entity-block number) plus the primary-key index map (table name → its
/// own `Index`). Built in memory from the meta and lookup blocks on open,
/// flushed back to them on close if anything changed.
pub struct Catalog {
    entity_index: Index,
    table_directory: Index,
    pk_indexes: HashMap<String, Index>,
    dirty: bool,
}

impl Catalog {
    /// Writes empty entity and lookup chains for a freshly created database.
    pub fn create(store: &mut PageStore) -> DbResult<Self> {
        let mut catalog = Catalog {
            entity_index: Index::new(ENTITY_INDEX_NAME, "", false, META_BLOCK_NUM),
            table_directory: Index::new(TABLE_DIRECTORY_NAME, "", false, LOOKUP_BLOCK_NUM),
            pk_indexes: HashMap::new(),
            dirty: true,
        };
        catalog.flush(store)?;
        Ok(catalog)
    }

    /// Loads the entity index from block 0 and the table directory from
    /// block 1, then decodes each table's own PK index chain (§4.4).
    pub fn open(store: &mut PageStore) -> DbResult<Self> {
        let (meta_bytes, _) = store.load(META_BLOCK_NUM)?;
        let entity_index = decode_index(&meta_bytes, "")?;

        let (lookup_bytes, _) = store.load(LOOKUP_BLOCK_NUM)?;
        let table_directory = decode_index(&lookup_bytes, "")?;

        let mut pk_indexes = HashMap::new();
        let mut load_errors = Vec::new();
        table_directory.each_kv(|table_name_key, index_head_block| {
            let table_name = table_name_key.to_string();
            match store.load(index_head_block) {
                Ok((bytes, _)) => match decode_index(&bytes, "") {
                    Ok(index) => {
                        pk_indexes.insert(table_name, index);
                    }
                    Err(e) => load_errors.push(e),
                },
                Err(e) => load_errors.push(e),
            }
            true
        });
        if let Some(e) = load_errors.into_iter().next() {
            return Err(e);
        }

        Ok(Catalog {
            entity_index,
            table_directory,
            pk_indexes,
            dirty: false,
        })
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.entity_index.get(&IndexKey::Text(name.to_string())).is_some()
    }

    pub fn entity_block_num(&self, name: &str) -> Option<u32> {
        self.entity_index.get(&IndexKey::Text(name.to_string()))
    }

    pub fn table_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.entity_index.each_kv(|k, _| {
            names.push(k.to_string());
            true
        });
        names
    }

    pub fn pk_index(&self, table_name: &str) -> Option<&Index> {
        self.pk_indexes.get(table_name)
    }

    pub fn pk_index_mut(&mut self, table_name: &str) -> Option<&mut Index> {
        self.dirty = true;
        self.pk_indexes.get_mut(table_name)
    }

    /// Registers a newly created table: entity block number in the entity
    /// index, and its PK index in both the in-memory map and the table
    /// directory (§4.5 CREATE TABLE).
    pub fn register_table(&mut self, name: &str, entity_block: u32, pk_index: Index) -> DbResult<()> {
        if self.contains_table(name) {
            return Err(DbError::TableExists(name.to_string()));
        }
        self.entity_index.put(IndexKey::Text(name.to_string()), entity_block);
        self.table_directory
            .put(IndexKey::Text(name.to_string()), pk_index.block_num());
        self.pk_indexes.insert(name.to_string(), pk_index);
        self.dirty = true;
        Ok(())
    }

    /// Removes a table's catalog entries, returning its entity block number
    /// and PK index so the caller can release their chains (§4.5 DROP
    /// TABLE).
    pub fn unregister_table(&mut self, name: &str) -> DbResult<(u32, Index)> {
        let entity_block = self
            .entity_index
            .erase(&IndexKey::Text(name.to_string()))
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))?;
        self.table_directory.erase(&IndexKey::Text(name.to_string()));
        let index = self
            .pk_indexes
            .remove(name)
            .ok_or_else(|| DbError::UnknownTable(name.to_string()))?;
        self.dirty = true;
        Ok((entity_block, index))
    }

    /// Re-encodes every per-table index chain, refreshes the table
    /// directory with their (possibly changed) head blocks, then the
    /// entity index into block 0 and the directory into block 1 (§4.4).
    pub fn flush(&mut self, store: &mut PageStore) -> DbResult<()> {
        for (name, index) in self.pk_indexes.iter_mut() {
            let bytes = encode_index(index);
            let meta = BlockMeta::new(BlockType::Index, entity_hash(name), [0u8; EXTRA_SIZE]).overwriting(index.block_num());
            let head = store.save(&bytes, &meta)?;
            index.set_block_num(head);
            index.clear_dirty();
            self.table_directory.put(IndexKey::Text(name.clone()), head);
        }

        let entity_bytes = encode_index(&self.entity_index);
        let entity_meta = BlockMeta::new(BlockType::Meta, entity_hash(common::hash::META_SENTINEL), [0u8; EXTRA_SIZE])
            .overwriting(META_BLOCK_NUM);
        store.save(&entity_bytes, &entity_meta)?;

        let lookup_bytes = encode_index(&self.table_directory);
        let lookup_meta = BlockMeta::new(BlockType::Index, entity_hash(common::hash::LOOKUP_SENTINEL), [0u8; EXTRA_SIZE])
            .overwriting(LOOKUP_BLOCK_NUM);
        store.save(&lookup_bytes, &lookup_meta)?;

        self.dirty = false;
        Ok(())
    }

    /// Flushes only if something changed since open/create (§4.4, §5).
    pub fn close(mut self, store: &mut PageStore) -> DbResult<()> {
        if self.dirty || self.pk_indexes.values().any(|i| i.dirty()) {
            self.flush(store)?;
        }
        Ok(())
    }
}
