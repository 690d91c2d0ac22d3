use std::fs;
use std::path::Path;

use common::config::EngineConfig;
use common::err::{DbError, DbResult};
use tracing::info;

use crate::catalog::Catalog;
use crate::database::query_result::QueryResult;
use crate::database::table::Database;
use crate::sql::statement::Statement;
use crate::store::open_mode::OpenMode;
use crate::store::page_store::PageStore;

/// Owns the engine-wide config and at most one open `Database` at a time
/// (§4.5, §6.3 DESIGN NOTES: threaded explicitly rather than read from a
/// process-wide singleton).
pub struct DatabaseManager {
    config: EngineConfig,
    current: Option<Database>,
}

impl DatabaseManager {
    pub fn new(config: EngineConfig) -> Self {
        DatabaseManager { config, current: None }
    }

    fn path_for(&self, name: &str) -> String {
        Path::new(&self.config.storage_dir)
            .join(format!("{}{}", name, self.config.db_extension))
            .to_string_lossy()
            .into_owned()
    }

    fn current_name(&self) -> Option<&str> {
        self.current.as_ref().map(|d| d.name.as_str())
    }

    pub fn create_database(&mut self, name: &str) -> DbResult<QueryResult> {
        let path = self.path_for(name);
        let mut store = PageStore::open(&path, OpenMode::CreateNew, &self.config.engine_version, self.config.block_cache_capacity)?;
        store.create_meta_and_lookup()?;
        let catalog = Catalog::create(&mut store)?;
        Database::create(name, store, catalog).close()?;
        info!(name, "database created");
        Ok(QueryResult::Ack(format!("database {} created", name)))
    }

    pub fn drop_database(&mut self, name: &str) -> DbResult<QueryResult> {
        if self.current_name() == Some(name) {
            let db = self.current.take().expect("checked by current_name");
            db.close()?;
        }
        let path = self.path_for(name);
        if !Path::new(&path).exists() {
            return Err(DbError::DatabaseDoesNotExist(name.to_string()));
        }
        fs::remove_file(&path)?;
        Ok(QueryResult::Ack(format!("database {} dropped", name)))
    }

    pub fn use_database(&mut self, name: &str) -> DbResult<QueryResult> {
        if self.current_name() == Some(name) {
            return Ok(QueryResult::Ack(format!("using {}", name)));
        }
        if let Some(db) = self.current.take() {
            db.close()?;
        }

        let path = self.path_for(name);
        let mut store = PageStore::open(&path, OpenMode::OpenExisting, &self.config.engine_version, self.config.block_cache_capacity)?;
        let catalog = Catalog::open(&mut store)?;
        self.current = Some(Database::create(name, store, catalog));
        Ok(QueryResult::Ack(format!("using {}", name)))
    }

    pub fn show_databases(&self) -> DbResult<QueryResult> {
        let mut names = Vec::new();
        if Path::new(&self.config.storage_dir).is_dir() {
            for entry in fs::read_dir(&self.config.storage_dir)? {
                let entry = entry?;
                let file_name = entry.file_name().to_string_lossy().into_owned();
                if let Some(stripped) = file_name.strip_suffix(&self.config.db_extension) {
                    names.push(stripped.to_string());
                }
            }
        }
        names.sort();
        Ok(QueryResult::DatabaseNames(names))
    }

    pub fn dump_database(&mut self, name: &str) -> DbResult<QueryResult> {
        if self.current_name() == Some(name) {
            let db = self.current.as_mut().expect("checked by current_name");
            return Ok(QueryResult::Dump(db.dump()?));
        }

        let path = self.path_for(name);
        if !Path::new(&path).exists() {
            return Err(DbError::DatabaseDoesNotExist(name.to_string()));
        }
        let mut store = PageStore::open(&path, OpenMode::OpenExisting, &self.config.engine_version, self.config.block_cache_capacity)?;
        let catalog = Catalog::open(&mut store)?;
        let mut db = Database::create(name, store, catalog);
        let dump = db.dump()?;
        db.close()?;
        Ok(QueryResult::Dump(dump))
    }

    fn current_mut(&mut self) -> DbResult<&mut Database> {
        self.current.as_mut().ok_or(DbError::NoDatabaseInUse)
    }

    /// Runs one already-parsed statement (§9 DESIGN NOTES dispatch table).
    /// Database-scoped statements (CREATE/DROP TABLE, INSERT, SELECT,
    /// UPDATE, DELETE, DESCRIBE, SHOW TABLES/INDEXES) require a database to
    /// be in use; the rest operate on the storage directory directly.
    pub fn execute(&mut self, statement: Statement) -> DbResult<QueryResult> {
        match statement {
            Statement::CreateDatabase { name } => self.create_database(&name),
            Statement::DropDatabase { name } => self.drop_database(&name),
            Statement::UseDatabase { name } => self.use_database(&name),
            Statement::ShowDatabases => self.show_databases(),
            Statement::DumpDatabase { name } => self.dump_database(&name),

            Statement::CreateTable { name, columns } => self.current_mut()?.create_table(&name, &columns),
            Statement::DropTable { name } => self.current_mut()?.drop_table(&name),
            Statement::Describe { name } => self.current_mut()?.describe(&name),
            Statement::ShowTables => Ok(self.current_mut()?.show_tables()),
            Statement::ShowIndexes => Ok(self.current_mut()?.show_indexes()),
            Statement::ShowIndex { attribute, table } => self.current_mut()?.show_index(&attribute, &table),
            Statement::Insert { table, columns, rows } => self.current_mut()?.insert(&table, &columns, rows),
            Statement::Select { query } => self.current_mut()?.select(&query),
            Statement::Update { table, assignments, where_clause } => {
                self.current_mut()?.update(&table, &assignments, &where_clause)
            }
            Statement::Delete { table, where_clause } => self.current_mut()?.delete(&table, &where_clause),
        }
    }
}
