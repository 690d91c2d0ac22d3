use common::err::{DbError, DbResult};

use crate::codec::field::{decode_field, encode_field, tokenize, truncate_at_nul};
use crate::model::row::Row;
use crate::model::value::Value;

/// Encodes a `Row` (§4.2): entity hash, field count, then `(name, value)`
/// pairs in map order.
pub fn encode_row(row: &Row) -> Vec<u8> {
    let mut tokens = vec![row.entity_hash.to_string(), row.values.len().to_string()];
    for (name, value) in &row.values {
        tokens.push(encode_field(&Value::Text(name.clone())));
        tokens.push(encode_field(value));
    }
    let mut out = tokens.join(" ").into_bytes();
    out.push(0);
    out
}

pub fn decode_row(bytes: &[u8]) -> DbResult<Row> {
    let text = String::from_utf8_lossy(truncate_at_nul(bytes)).into_owned();
    let tokens = tokenize(&text);
    let mut iter = tokens.into_iter();

    let entity_hash: u64 = iter
        .next()
        .ok_or(DbError::NoDecodePerformed)?
        .parse()
        .map_err(|_| DbError::NoDecodePerformed)?;
    let field_count: usize = iter
        .next()
        .ok_or(DbError::NoDecodePerformed)?
        .parse()
        .map_err(|_| DbError::NoDecodePerformed)?;

    let mut row = Row::new(entity_hash);
    for _ in 0..field_count {
        let name = match decode_field(iter.next().ok_or(DbError::NoDecodePerformed)?)? {
            Some(Value::Text(s)) => s,
            _ => return Err(DbError::NoDecodePerformed),
        };
        let value = decode_field(iter.next().ok_or(DbError::NoDecodePerformed)?)?
            .ok_or(DbError::NoDecodePerformed)?;
        row.put(name, value);
    }
    Ok(row)
}
