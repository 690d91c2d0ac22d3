use common::err::DbError;

use crate::model::value::Value;

/// Ordered map key for an `Index` (§3, §4.3): selected at construction time
/// from the primary-key attribute's declared data type. `Int` keys and
/// `Varchar` keys never compare against each other — mixing them is
/// `InvalidAttribute`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndexKey {
    Int(i64),
    Text(String),
}

impl IndexKey {
    pub fn from_value(value: &Value, key_is_integer: bool) -> Result<Self, DbError> {
        match (key_is_integer, value) {
            (true, Value::Int(i)) => Ok(IndexKey::Int(*i)),
            (false, Value::Text(s)) => Ok(IndexKey::Text(s.clone())),
            _ => Err(DbError::InvalidAttribute(
                "primary key value does not match the index's declared key type".to_string(),
            )),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, IndexKey::Int(_))
    }
}

impl std::fmt::Display for IndexKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKey::Int(i) => write!(f, "{}", i),
            IndexKey::Text(s) => write!(f, "{}", s),
        }
    }
}
