use common::err::{DbError, DbResult};

use crate::model::attribute::Attribute;
use crate::model::data_type::DataType;

/// A table schema: name, auto-increment counter, and ordered attribute list
/// (§3). Lives in the entity block, rewritten whenever `next_autoincr`
/// advances (§3 Lifecycles).
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: String,
    pub next_autoincr: i64,
    pub attributes: Vec<Attribute>,
    /// Block number this entity's own chain starts at; 0 before first save.
    pub block_num: u32,
}

impl Entity {
    pub fn new(name: impl Into<String>, attributes: Vec<Attribute>) -> DbResult<Self> {
        let pk_count = attributes.iter().filter(|a| a.primary_key).count();
        if pk_count > 1 {
            return Err(DbError::InvalidAttribute(
                "at most one attribute may be the primary key".to_string(),
            ));
        }
        if let Some(pk) = attributes.iter().find(|a| a.primary_key) {
            if !matches!(pk.data_type, DataType::Int | DataType::Varchar) {
                return Err(DbError::InvalidAttribute(
                    "primary key attribute must be INT or VARCHAR".to_string(),
                ));
            }
        }
        Ok(Entity {
            name: name.into(),
            next_autoincr: 1,
            attributes,
            block_num: 0,
        })
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn primary_key(&self) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.primary_key)
    }

    /// Declared key type that governs the per-table PK index (§4.3): `Int`
    /// attributes use an integer key, anything else a text key.
    pub fn primary_key_is_integer(&self) -> DbResult<bool> {
        let pk = self
            .primary_key()
            .ok_or_else(|| DbError::PrimaryKeyRequired(self.name.clone()))?;
        Ok(matches!(pk.data_type, DataType::Int))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn int_attr(name: &str) -> Attribute {
        Attribute::new(name, DataType::Int)
    }

    #[test]
    fn rejects_two_primary_keys() {
        let attrs = vec![
            int_attr("a").with_primary_key(true),
            int_attr("b").with_primary_key(true),
        ];
        assert!(Entity::new("T", attrs).is_err());
    }

    #[test]
    fn rejects_non_int_or_varchar_primary_key() {
        let attrs = vec![Attribute::new("a", DataType::Float).with_primary_key(true)];
        assert!(Entity::new("T", attrs).is_err());
    }

    #[test]
    fn primary_key_is_integer_reports_declared_type() {
        let attrs = vec![int_attr("id").with_primary_key(true)];
        let e = Entity::new("T", attrs).unwrap();
        assert!(e.primary_key_is_integer().unwrap());
    }
}
