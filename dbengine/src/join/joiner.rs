use common::err::{DbError, DbResult};

use crate::join::join_type::JoinType;
use crate::model::row::Row;
use crate::model::value::Value;

/// Runs one join step (§4.6). Only `Left` and `Right` are defined; `Right`
/// is specified as `Left` with the two collections swapped.
#[allow(clippy::too_many_arguments)]
pub fn execute_join(
    join_type: JoinType,
    left_rows: &[Row],
    left_attr: &str,
    right_rows: &[Row],
    right_attr: &str,
    right_attr_names: &[String],
    left_attr_names: &[String],
) -> DbResult<Vec<Row>> {
    match join_type {
        JoinType::Left => Ok(left_join(left_rows, left_attr, right_rows, right_attr, right_attr_names)),
        JoinType::Right => Ok(left_join(right_rows, right_attr, left_rows, left_attr, left_attr_names)),
        JoinType::Inner => Err(DbError::NotImplemented("INNER JOIN".to_string())),
        JoinType::Cross => Err(DbError::NotImplemented("CROSS JOIN".to_string())),
        JoinType::Full => Err(DbError::NotImplemented("FULL JOIN".to_string())),
    }
}

/// For each row in `primary`, emits one combined row per matching row in
/// `other`, or one combined row with every `other_attr_names` column set to
/// the literal text `"NULL"` if nothing matches (§4.6).
fn left_join(primary: &[Row], primary_attr: &str, other: &[Row], other_attr: &str, other_attr_names: &[String]) -> Vec<Row> {
    let mut out = Vec::new();
    for p in primary {
        let key = p.get(primary_attr);
        let matches: Vec<&Row> = other
            .iter()
            .filter(|o| match (key, o.get(other_attr)) {
                (Some(a), Some(b)) => a.compare(b) == std::cmp::Ordering::Equal,
                _ => false,
            })
            .collect();

        if matches.is_empty() {
            let mut synthetic = Row::new(p.entity_hash);
            for name in other_attr_names {
                synthetic.put(name.clone(), Value::Text("NULL".to_string()));
            }
            out.push(p.merged_with(&synthetic));
        } else {
            for m in matches {
                out.push(p.merged_with(m));
            }
        }
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;

    fn row(id: i64, entity_hash: u64, extra: &[(&str, Value)]) -> Row {
        let mut r = Row::new(entity_hash);
        r.put("id", Value::Int(id));
        for (k, v) in extra {
            r.put(*k, v.clone());
        }
        r
    }

    #[test]
    fn left_join_fills_null_when_nothing_matches() {
        let authors = vec![
            row(1, 1, &[("name", Value::Text("A".to_string()))]),
            row(2, 1, &[("name", Value::Text("B".to_string()))]),
        ];
        let mut book = Row::new(2);
        book.put("author_id", Value::Int(1));
        book.put("title", Value::Text("X".to_string()));
        let books = vec![book];

        let joined = execute_join(
            JoinType::Left,
            &authors,
            "id",
            &books,
            "author_id",
            &["author_id".to_string(), "title".to_string()],
            &["id".to_string(), "name".to_string()],
        )
        .unwrap();

        assert_eq!(joined.len(), 2);
        let b = joined.iter().find(|r| r.get("name") == Some(&Value::Text("B".to_string()))).unwrap();
        assert_eq!(b.get("title"), Some(&Value::Text("NULL".to_string())));
        let a = joined.iter().find(|r| r.get("name") == Some(&Value::Text("A".to_string()))).unwrap();
        assert_eq!(a.get("title"), Some(&Value::Text("X".to_string())));
    }

    #[test]
    fn inner_join_is_not_implemented() {
        let err = execute_join(JoinType::Inner, &[], "a", &[], "b", &[], &[]);
        assert!(matches!(err, Err(DbError::NotImplemented(_))));
    }
}
