use std::cmp::Ordering;

use common::err::DbError;

/// A binary comparator (§4.7). Two-character operators are assembled by the
/// tokenizer from successive operator tokens (`<=`, `>=`, `!=`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparator {
    pub fn from_token(token: &str) -> Result<Self, DbError> {
        match token {
            "=" => Ok(Comparator::Eq),
            "!=" | "<>" => Ok(Comparator::Ne),
            "<" => Ok(Comparator::Lt),
            "<=" => Ok(Comparator::Le),
            ">" => Ok(Comparator::Gt),
            ">=" => Ok(Comparator::Ge),
            other => Err(DbError::InvalidOperator(other.to_string())),
        }
    }

    /// An odd count of leading `NOT`s inverts the comparator (§4.7):
    /// `<→≥`, `>→≤`, `=→≠`.
    pub fn inverted(self) -> Self {
        match self {
            Comparator::Eq => Comparator::Ne,
            Comparator::Ne => Comparator::Eq,
            Comparator::Lt => Comparator::Ge,
            Comparator::Ge => Comparator::Lt,
            Comparator::Gt => Comparator::Le,
            Comparator::Le => Comparator::Gt,
        }
    }

    pub fn apply(self, ordering: Ordering) -> bool {
        match self {
            Comparator::Eq => ordering == Ordering::Equal,
            Comparator::Ne => ordering != Ordering::Equal,
            Comparator::Lt => ordering == Ordering::Less,
            Comparator::Le => ordering != Ordering::Greater,
            Comparator::Gt => ordering == Ordering::Greater,
            Comparator::Ge => ordering != Ordering::Less,
        }
    }
}
