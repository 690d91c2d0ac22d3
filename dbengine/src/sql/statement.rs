use crate::filter::where_clause::WhereClause;
use crate::model::data_type::DataType;
use crate::model::value::Value;
use crate::sql::select_query::SelectQuery;

/// One column in a `CREATE TABLE` descriptor (§6.2).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: DataType,
    pub size: usize,
    pub not_null: bool,
    pub auto_increment: bool,
    pub primary_key: bool,
    pub default: Option<Value>,
}

/// A validated command descriptor (§9 DESIGN NOTES: a tagged variant
/// replaces the source's polymorphic statement hierarchy). Each variant
/// parses and runs via a free function keyed on the statement's leading
/// keywords (see `sql::parser`/`sql::dispatcher`).
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateDatabase { name: String },
    DropDatabase { name: String },
    UseDatabase { name: String },
    ShowDatabases,
    DumpDatabase { name: String },
    CreateTable { name: String, columns: Vec<ColumnDef> },
    DropTable { name: String },
    Describe { name: String },
    ShowTables,
    ShowIndexes,
    ShowIndex { attribute: String, table: String },
    Insert { table: String, columns: Vec<String>, rows: Vec<Vec<Value>> },
    Select { query: SelectQuery },
    Update { table: String, assignments: Vec<(String, Value)>, where_clause: Option<WhereClause> },
    Delete { table: String, where_clause: Option<WhereClause> },
}
