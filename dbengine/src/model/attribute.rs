use crate::model::data_type::DataType;
use crate::model::value::Value;

/// One column of an `Entity` (§3). At most one attribute per entity may be
/// `primary_key`; that attribute's type must be `Int` or `Varchar` (enforced
/// by `Entity::new`).
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub data_type: DataType,
    /// Declared size; only meaningful for `Varchar`.
    pub size: usize,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub nullable: bool,
    pub default: Option<Value>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Attribute {
            name: name.into(),
            data_type,
            size: 0,
            primary_key: false,
            auto_increment: false,
            nullable: true,
            default: None,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_primary_key(mut self, v: bool) -> Self {
        self.primary_key = v;
        if v {
            self.nullable = false;
        }
        self
    }

    pub fn with_auto_increment(mut self, v: bool) -> Self {
        self.auto_increment = v;
        self
    }

    pub fn with_nullable(mut self, v: bool) -> Self {
        self.nullable = v;
        self
    }

    pub fn with_default(mut self, v: Option<Value>) -> Self {
        self.default = v;
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn primary_key_implies_not_nullable() {
        let a = Attribute::new("id", DataType::Int).with_primary_key(true);
        assert!(!a.nullable);
    }
}
