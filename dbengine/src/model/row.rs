use std::collections::BTreeMap;

use crate::model::value::Value;

/// A map from attribute name to value (§3). Carries its owning entity hash
/// and the block number where it lives (0 before first save) so `UPDATE`
/// can overwrite in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub entity_hash: u64,
    pub block_num: u32,
    pub values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new(entity_hash: u64) -> Self {
        Row {
            entity_hash,
            block_num: 0,
            values: BTreeMap::new(),
        }
    }

    pub fn get(&self, attr: &str) -> Option<&Value> {
        self.values.get(attr)
    }

    pub fn put(&mut self, attr: impl Into<String>, value: Value) {
        self.values.insert(attr.into(), value);
    }

    /// Merges `other` into a copy of `self`, left-side wins on name
    /// collision (§4.6 combined row semantics).
    pub fn merged_with(&self, other: &Row) -> Row {
        let mut out = self.clone();
        for (k, v) in &other.values {
            out.values.entry(k.clone()).or_insert_with(|| v.clone());
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_prefers_left_on_collision() {
        let mut left = Row::new(1);
        left.put("name", Value::Text("left".to_string()));
        let mut right = Row::new(2);
        right.put("name", Value::Text("right".to_string()));
        right.put("extra", Value::Int(1));

        let merged = left.merged_with(&right);
        assert_eq!(merged.get("name"), Some(&Value::Text("left".to_string())));
        assert_eq!(merged.get("extra"), Some(&Value::Int(1)));
    }
}
