use crate::filter::where_clause::WhereClause;
use crate::join::join_type::JoinType;

/// Either `SELECT *` or an explicit projection list (§6.2).
#[derive(Debug, Clone, PartialEq)]
pub enum SelectColumns {
    All,
    Named(Vec<String>),
}

/// One `[LEFT|RIGHT] JOIN t2 ON t.c = t2.c` clause (§4.6). Attribute names
/// are stored unqualified — this engine flattens joined rows into a single
/// attribute-name map, so qualifiers are stripped at parse time.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub join_type: JoinType,
    pub right_table: String,
    pub left_attr: String,
    pub right_attr: String,
}

/// A validated, fully parsed `SELECT` descriptor (§4.5.2).
#[derive(Debug, Clone, PartialEq)]
pub struct SelectQuery {
    pub table: String,
    pub columns: SelectColumns,
    pub joins: Vec<JoinClause>,
    pub where_clause: Option<WhereClause>,
    pub order_by: Vec<String>,
    pub limit: Option<usize>,
}
