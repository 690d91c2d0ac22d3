use common::err::{DbError, DbResult};
use common::hash::entity_hash;

use crate::block::block_header::EXTRA_SIZE;
use crate::block::block_type::BlockType;
use crate::codec::entity_codec::{decode_entity, encode_entity};
use crate::codec::row_codec::{decode_row, encode_row};
use crate::database::query_result::QueryResult;
use crate::filter::where_clause::WhereClause;
use crate::index::index_key::IndexKey;
use crate::index::table_index::Index;
use crate::join;
use crate::join::join_type::JoinType;
use crate::model::attribute::Attribute;
use crate::model::data_type::DataType;
use crate::model::entity::Entity;
use crate::model::row::Row;
use crate::model::value::Value;
use crate::sql::select_query::{SelectColumns, SelectQuery};
use crate::sql::statement::ColumnDef;
use crate::store::block_meta::BlockMeta;
use crate::store::page_store::PageStore;

use crate::catalog::Catalog;

/// One open database file: its page store and in-memory catalog (§3, §4.5).
/// Every CRUD operation lives here; `DatabaseManager` only knows which
/// `Database` is currently selected.
pub struct Database {
    pub name: String,
    store: PageStore,
    catalog: Catalog,
}

/// Coerces a literal into the attribute's declared type where a lossless
/// conversion exists (int literal into a float column); anything else is a
/// schema mismatch.
fn coerce_value(data_type: DataType, value: Value) -> DbResult<Value> {
    match (data_type, value) {
        (DataType::Bool, v @ Value::Bool(_)) => Ok(v),
        (DataType::Int, v @ Value::Int(_)) => Ok(v),
        (DataType::Float, v @ Value::Float(_)) => Ok(v),
        (DataType::Float, Value::Int(i)) => Ok(Value::Float(i as f64)),
        (DataType::Varchar, v @ Value::Text(_)) => Ok(v),
        (DataType::Datetime, v @ Value::Text(_)) => Ok(v),
        (dt, v) => Err(DbError::InvalidAttribute(format!("value {} does not match declared type {:?}", v, dt))),
    }
}

impl Database {
    pub fn create(name: impl Into<String>, store: PageStore, catalog: Catalog) -> Self {
        Database { name: name.into(), store, catalog }
    }

    /// Flushes the catalog if dirty and drops the underlying file handle
    /// (§5: a database closes cleanly by persisting only what changed).
    pub fn close(self) -> DbResult<()> {
        let Database { mut store, catalog, .. } = self;
        catalog.close(&mut store)
    }

    fn entity_block(&self, table: &str) -> DbResult<u32> {
        self.catalog.entity_block_num(table).ok_or_else(|| DbError::UnknownTable(table.to_string()))
    }

    fn load_entity(&mut self, table: &str) -> DbResult<Entity> {
        let block = self.entity_block(table)?;
        let (bytes, _) = self.store.load(block)?;
        let mut entity = decode_entity(&bytes)?;
        entity.block_num = block;
        Ok(entity)
    }

    fn save_entity(&mut self, entity: &Entity) -> DbResult<u32> {
        let bytes = encode_entity(entity);
        let mut meta = BlockMeta::new(BlockType::Entity, entity_hash(&entity.name), [0u8; EXTRA_SIZE]);
        if entity.block_num != 0 {
            meta = meta.overwriting(entity.block_num);
        }
        self.store.save(&bytes, &meta)
    }

    fn pk_index(&self, table: &str) -> DbResult<&Index> {
        self.catalog.pk_index(table).ok_or_else(|| DbError::UnknownTable(table.to_string()))
    }

    /// Loads every row currently referenced by `table`'s primary-key index
    /// (§4.3, §4.5.2). There is no secondary-index path — every SELECT,
    /// UPDATE and DELETE scans the full table.
    fn scan_table(&mut self, table: &str) -> DbResult<Vec<Row>> {
        let block_nums: Vec<u32> = {
            let index = self.pk_index(table)?;
            let mut nums = Vec::with_capacity(index.size());
            index.each_block(|n| {
                nums.push(n);
                true
            });
            nums
        };

        let mut rows = Vec::with_capacity(block_nums.len());
        for n in block_nums {
            let (bytes, _) = self.store.load(n)?;
            let mut row = decode_row(&bytes)?;
            row.block_num = n;
            rows.push(row);
        }
        Ok(rows)
    }

    // ------------------------------------------------------------------
    // CREATE / DROP / DESCRIBE / SHOW
    // ------------------------------------------------------------------

    pub fn create_table(&mut self, name: &str, columns: &[ColumnDef]) -> DbResult<QueryResult> {
        if self.catalog.contains_table(name) {
            return Err(DbError::TableExists(name.to_string()));
        }

        let attributes: Vec<Attribute> = columns
            .iter()
            .map(|c| {
                Attribute::new(&c.name, c.data_type)
                    .with_size(c.size)
                    .with_primary_key(c.primary_key)
                    .with_auto_increment(c.auto_increment)
                    .with_nullable(!c.not_null && !c.primary_key)
                    .with_default(c.default.clone())
            })
            .collect();

        let entity = Entity::new(name, attributes)?;
        let key_is_integer = entity.primary_key_is_integer()?;
        let pk_name = entity.primary_key().expect("checked by primary_key_is_integer").name.clone();

        let entity_block = self.save_entity(&entity)?;
        let pk_index = Index::new(format!("{}_pk", name), pk_name, key_is_integer, 0);
        self.catalog.register_table(name, entity_block, pk_index)?;

        Ok(QueryResult::Ack(format!("table {} created", name)))
    }

    pub fn drop_table(&mut self, name: &str) -> DbResult<QueryResult> {
        let (entity_block, index) = self.catalog.unregister_table(name)?;
        self.store.release_chain(entity_block, true)?;
        let mut block_nums = Vec::new();
        index.each_block(|n| {
            block_nums.push(n);
            true
        });
        for n in block_nums {
            self.store.release_chain(n, true)?;
        }
        if index.block_num() != 0 {
            self.store.release_chain(index.block_num(), true)?;
        }
        Ok(QueryResult::Ack(format!("table {} dropped", name)))
    }

    pub fn describe(&mut self, name: &str) -> DbResult<QueryResult> {
        let entity = self.load_entity(name)?;
        Ok(QueryResult::Describe(entity.attributes))
    }

    pub fn show_tables(&self) -> QueryResult {
        let mut names = self.catalog.table_names();
        names.sort();
        QueryResult::TableNames(names)
    }

    pub fn show_indexes(&self) -> QueryResult {
        let mut names = self.catalog.table_names();
        names.sort();
        let names = names.into_iter().map(|t| format!("{}_pk", t)).collect();
        QueryResult::IndexNames(names)
    }

    pub fn show_index(&mut self, attribute: &str, table: &str) -> DbResult<QueryResult> {
        let entity = self.load_entity(table)?;
        let pk = entity.primary_key().ok_or_else(|| DbError::PrimaryKeyRequired(table.to_string()))?;
        if !pk.name.eq_ignore_ascii_case(attribute) {
            return Err(DbError::UnknownIndex(format!("{}.{}", table, attribute)));
        }
        let index = self.pk_index(table)?;
        Ok(QueryResult::IndexInfo {
            attribute: attribute.to_string(),
            table: table.to_string(),
            size: index.size(),
        })
    }

    // ------------------------------------------------------------------
    // INSERT (§4.5.1)
    // ------------------------------------------------------------------

    pub fn insert(&mut self, table: &str, columns: &[String], rows: Vec<Vec<Value>>) -> DbResult<QueryResult> {
        let mut entity = self.load_entity(table)?;
        for name in columns {
            if entity.attribute(name).is_none() {
                return Err(DbError::UnknownAttribute(name.clone()));
            }
        }

        let mut inserted = 0usize;
        for values in rows {
            if values.len() != columns.len() {
                return Err(DbError::InvalidCommand("column and value count mismatch".to_string()));
            }
            let row = build_row(&mut entity, columns, values)?;
            self.write_new_row(table, &entity, row)?;
            inserted += 1;
        }

        self.save_entity(&entity)?;
        Ok(QueryResult::RowsAffected(inserted))
    }

    fn write_new_row(&mut self, table: &str, entity: &Entity, row: Row) -> DbResult<()> {
        let pk = entity.primary_key().ok_or_else(|| DbError::PrimaryKeyRequired(table.to_string()))?;
        let pk_value = row.get(&pk.name).ok_or_else(|| DbError::NonNullableValueNotGiven(pk.name.clone()))?;
        let key_is_integer = matches!(pk.data_type, DataType::Int);
        let key = IndexKey::from_value(pk_value, key_is_integer)?;

        if self.catalog.pk_index(table).and_then(|i| i.get(&key)).is_some() {
            return Err(DbError::InvalidAttribute(format!("duplicate primary key: {}", key)));
        }

        let bytes = encode_row(&row);
        let meta = BlockMeta::new(BlockType::Data, row.entity_hash, [0u8; EXTRA_SIZE]);
        let block_num = self.store.save(&bytes, &meta)?;

        self.catalog
            .pk_index_mut(table)
            .ok_or_else(|| DbError::UnknownTable(table.to_string()))?
            .put(key, block_num);
        Ok(())
    }

    // ------------------------------------------------------------------
    // SELECT (§4.5.2)
    // ------------------------------------------------------------------

    pub fn select(&mut self, query: &SelectQuery) -> DbResult<QueryResult> {
        self.entity_block(&query.table)?;
        let mut rows = self.scan_table(&query.table)?;

        for join in &query.joins {
            let right_entity = self.load_entity(&join.right_table)?;
            let right_names: Vec<String> = right_entity.attributes.iter().map(|a| a.name.clone()).collect();
            let left_names: Vec<String> = rows.first().map(|r| r.values.keys().cloned().collect()).unwrap_or_default();
            let right_rows = self.scan_table(&join.right_table)?;

            rows = match join.join_type {
                JoinType::Left | JoinType::Right => {
                    join::execute_join(join.join_type, &rows, &join.left_attr, &right_rows, &join.right_attr, &right_names, &left_names)?
                }
                other => return Err(DbError::NotImplemented(format!("{:?} JOIN", other))),
            };
        }

        if let Some(where_clause) = &query.where_clause {
            rows = filter_rows(rows, where_clause)?;
        }

        if !query.order_by.is_empty() {
            rows.sort_by(|a, b| {
                for col in &query.order_by {
                    let ord = match (a.get(col), b.get(col)) {
                        (Some(x), Some(y)) => x.compare(y),
                        _ => std::cmp::Ordering::Equal,
                    };
                    if ord != std::cmp::Ordering::Equal {
                        return ord;
                    }
                }
                std::cmp::Ordering::Equal
            });
        }

        if let Some(limit) = query.limit {
            rows.truncate(limit);
        }

        let columns = match &query.columns {
            SelectColumns::All => {
                let mut names: Vec<String> = rows.first().map(|r| r.values.keys().cloned().collect()).unwrap_or_default();
                names.sort();
                names
            }
            SelectColumns::Named(names) => {
                rows = rows
                    .into_iter()
                    .map(|r| {
                        let mut projected = Row::new(r.entity_hash);
                        projected.block_num = r.block_num;
                        for name in names {
                            if let Some(v) = r.get(name) {
                                projected.put(name.clone(), v.clone());
                            }
                        }
                        projected
                    })
                    .collect();
                names.clone()
            }
        };

        Ok(QueryResult::Rows { columns, rows })
    }

    // ------------------------------------------------------------------
    // UPDATE (§4.5.3)
    // ------------------------------------------------------------------

    pub fn update(&mut self, table: &str, assignments: &[(String, Value)], where_clause: &Option<WhereClause>) -> DbResult<QueryResult> {
        let entity = self.load_entity(table)?;
        let pk = entity.primary_key().ok_or_else(|| DbError::PrimaryKeyRequired(table.to_string()))?.clone();
        let key_is_integer = matches!(pk.data_type, DataType::Int);

        let rows = self.scan_table(table)?;
        let targets = match where_clause {
            Some(wc) => filter_rows(rows, wc)?,
            None => rows,
        };

        let mut updated = 0usize;
        for mut row in targets {
            let old_key = IndexKey::from_value(
                row.get(&pk.name).ok_or_else(|| DbError::NonNullableValueNotGiven(pk.name.clone()))?,
                key_is_integer,
            )?;

            for (col, value) in assignments {
                let attr = entity.attribute(col).ok_or_else(|| DbError::UnknownAttribute(col.clone()))?;
                row.put(attr.name.clone(), coerce_value(attr.data_type, value.clone())?);
            }

            let new_key = IndexKey::from_value(
                row.get(&pk.name).ok_or_else(|| DbError::NonNullableValueNotGiven(pk.name.clone()))?,
                key_is_integer,
            )?;

            let bytes = encode_row(&row);
            let meta = BlockMeta::new(BlockType::Data, row.entity_hash, [0u8; EXTRA_SIZE]).overwriting(row.block_num);
            let block_num = self.store.save(&bytes, &meta)?;

            let index = self
                .catalog
                .pk_index_mut(table)
                .ok_or_else(|| DbError::UnknownTable(table.to_string()))?;
            if new_key != old_key {
                index.erase(&old_key);
            }
            index.put(new_key, block_num);
            updated += 1;
        }

        Ok(QueryResult::RowsAffected(updated))
    }

    // ------------------------------------------------------------------
    // DELETE (§4.5.4)
    // ------------------------------------------------------------------

    pub fn delete(&mut self, table: &str, where_clause: &Option<WhereClause>) -> DbResult<QueryResult> {
        let entity = self.load_entity(table)?;
        let pk = entity.primary_key().ok_or_else(|| DbError::PrimaryKeyRequired(table.to_string()))?.clone();
        let key_is_integer = matches!(pk.data_type, DataType::Int);

        let rows = self.scan_table(table)?;
        let targets = match where_clause {
            Some(wc) => filter_rows(rows, wc)?,
            None => rows,
        };

        let mut deleted = 0usize;
        for row in targets {
            let key = IndexKey::from_value(
                row.get(&pk.name).ok_or_else(|| DbError::NonNullableValueNotGiven(pk.name.clone()))?,
                key_is_integer,
            )?;
            self.store.release_chain(row.block_num, true)?;
            self.catalog
                .pk_index_mut(table)
                .ok_or_else(|| DbError::UnknownTable(table.to_string()))?
                .erase(&key);
            deleted += 1;
        }

        Ok(QueryResult::RowsAffected(deleted))
    }

    // ------------------------------------------------------------------
    // DUMP DATABASE
    // ------------------------------------------------------------------

    /// Reads every block in storage order and reports its header fields.
    /// Read-only: no catalog or table data is touched (§4.5, §2 C5).
    pub fn dump(&mut self) -> DbResult<String> {
        const COLS: [&str; 8] = ["Idx", "BlockNum", "Type", "Hash ID", "Version", "Next", "Count", "Extra"];
        const WIDTH: usize = 11;

        let mut out = String::new();
        let break_line = |out: &mut String| {
            out.push('+');
            for _ in 0..COLS.len() {
                out.push_str(&"-".repeat(WIDTH));
                out.push('+');
            }
            out.push('\n');
        };

        break_line(&mut out);
        out.push('|');
        for title in COLS {
            out.push_str(&format!("{:<width$}|", format!(" {}", title), width = WIDTH));
        }
        out.push('\n');
        break_line(&mut out);

        let mut index = 0usize;
        let mut count = 0usize;
        self.store.each(|block| {
            out.push('|');
            out.push_str(&format!("{:<width$}|", format!(" {}", index), width = WIDTH));
            out.push_str(&format!("{:<width$}|", format!(" {}", block.header.pos), width = WIDTH));
            out.push_str(&format!("{:<width$}|", format!(" {}", block_type_label(block.header.block_type)), width = WIDTH));
            out.push_str(&format!("{:<width$}|", format!(" {}", block.header.entity_hash), width = WIDTH));
            out.push_str(&format!("{:<width$}|", format!(" {}", block.header.version), width = WIDTH));
            out.push_str(&format!("{:<width$}|", format!(" {}", block.header.next), width = WIDTH));
            out.push_str(&format!("{:<width$}|", format!(" {}", block.header.count), width = WIDTH));
            out.push_str(&format!("{:<width$}|\n", format!(" {}", block.header.extra_as_str()), width = WIDTH));
            index += 1;
            count += 1;
            true
        })?;
        break_line(&mut out);
        out.push_str(&format!("{} rows in set\n", count));
        Ok(out)
    }
}

fn block_type_label(block_type: BlockType) -> &'static str {
    match block_type {
        BlockType::Meta => "Meta",
        BlockType::Entity => "Entity",
        BlockType::Data => "Data",
        BlockType::Index => "Index",
        BlockType::Free => "Free",
        BlockType::Unknown => "Unknown",
    }
}

fn filter_rows(rows: Vec<Row>, where_clause: &WhereClause) -> DbResult<Vec<Row>> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        if where_clause.matches(&row)? {
            out.push(row);
        }
    }
    Ok(out)
}

/// Assembles one inserted row: explicit columns first, then
/// auto-increment/default/null fallbacks for everything the statement left
/// out (§4.5.1).
fn build_row(entity: &mut Entity, columns: &[String], values: Vec<Value>) -> DbResult<Row> {
    let mut row = Row::new(entity_hash(&entity.name));
    for (name, value) in columns.iter().zip(values.into_iter()) {
        let attr = entity.attribute(name).ok_or_else(|| DbError::UnknownAttribute(name.clone()))?;
        row.put(attr.name.clone(), coerce_value(attr.data_type, value)?);
    }

    for attr in entity.attributes.clone() {
        if row.get(&attr.name).is_some() {
            if attr.auto_increment {
                if let Some(Value::Int(n)) = row.get(&attr.name) {
                    if *n >= entity.next_autoincr {
                        entity.next_autoincr = n + 1;
                    }
                }
            }
            continue;
        }
        if attr.auto_increment {
            row.put(attr.name.clone(), Value::Int(entity.next_autoincr));
            entity.next_autoincr += 1;
        } else if let Some(default) = &attr.default {
            row.put(attr.name.clone(), default.clone());
        } else if attr.nullable {
            // left unset: absence from the map means null (§3)
        } else {
            return Err(DbError::NonNullableValueNotGiven(attr.name.clone()));
        }
    }
    Ok(row)
}
