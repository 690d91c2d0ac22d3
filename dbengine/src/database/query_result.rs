use crate::model::attribute::Attribute;
use crate::model::row::Row;

/// Whatever a single `Statement` produces once executed (§4.5, §6.2). The
/// shell renders this; the engine never formats text itself.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Ack(String),
    RowsAffected(usize),
    Rows { columns: Vec<String>, rows: Vec<Row> },
    TableNames(Vec<String>),
    DatabaseNames(Vec<String>),
    Describe(Vec<Attribute>),
    Dump(String),
    IndexInfo { attribute: String, table: String, size: usize },
    IndexNames(Vec<String>),
}
