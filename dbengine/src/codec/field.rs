use common::err::{DbError, DbResult};

use crate::model::value::Value;

/// Stands in for an embedded space so a text value survives whitespace
/// tokenization (§4.2).
pub const SPACE_SENTINEL: &str = "#_#";

/// Explicit-null field token; carries no data of its own.
const NULL_TAG: char = 'N';

/// Truncates `bytes` at the first NUL, the decoder's end-of-payload marker
/// (§4.2) — block tails are zero-initialized, not length-prefixed.
pub fn truncate_at_nul(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(i) => &bytes[..i],
        None => bytes,
    }
}

/// Splits a decoded payload string into whitespace-separated field tokens.
pub fn tokenize(payload: &str) -> Vec<&str> {
    payload.split_whitespace().collect()
}

pub fn quote_text(s: &str) -> String {
    s.replace(' ', SPACE_SENTINEL)
}

pub fn unquote_text(s: &str) -> String {
    s.replace(SPACE_SENTINEL, " ")
}

/// Encodes one value as `<canonical-text><tag>`, using `tag` to disambiguate
/// a `Text` value representing a `VARCHAR` (`V`) from one representing a
/// `DATETIME` (`D`) — `Value` itself has no datetime variant.
pub fn encode_field_tagged(value: &Value, tag: char) -> String {
    match value {
        Value::Bool(b) => format!("{}B", b),
        Value::Int(i) => format!("{}I", i),
        Value::Float(v) => format!("{}F", v),
        Value::Text(s) => format!("{}{}", quote_text(s), tag),
    }
}

/// Encodes using the tag implied by the value's own variant (`V` for text).
pub fn encode_field(value: &Value) -> String {
    match value {
        Value::Text(_) => encode_field_tagged(value, 'V'),
        other => encode_field_tagged(other, ' '),
    }
}

pub fn encode_null() -> String {
    NULL_TAG.to_string()
}

/// Decodes one whitespace-delimited token back into a value, or `None` for
/// the explicit-null token.
pub fn decode_field(token: &str) -> DbResult<Option<Value>> {
    if token.len() == 1 && token.chars().next() == Some(NULL_TAG) {
        return Ok(None);
    }
    let mut chars = token.chars();
    let tag = chars
        .next_back()
        .ok_or_else(|| DbError::NoDecodePerformed)?;
    let data = &token[..token.len() - 1];

    let value = match tag {
        'B' => Value::Bool(data.parse::<bool>().map_err(|e| DbError::ReadError(e.to_string()))?),
        'I' => Value::Int(data.parse::<i64>().map_err(|e| DbError::ReadError(e.to_string()))?),
        'F' => Value::Float(data.parse::<f64>().map_err(|e| DbError::ReadError(e.to_string()))?),
        'V' | 'D' => Value::Text(unquote_text(data)),
        other => return Err(DbError::ReadError(format!("unknown field tag: {}", other))),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_every_value_kind() {
        for v in [
            Value::Bool(true),
            Value::Int(-42),
            Value::Float(3.5),
            Value::Text("hello".to_string()),
        ] {
            let encoded = encode_field(&v);
            let decoded = decode_field(&encoded).unwrap().unwrap();
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn embedded_spaces_survive_tokenization() {
        let v = Value::Text("Alice Smith".to_string());
        let encoded = encode_field_tagged(&v, 'V');
        assert!(!encoded.contains(' '));
        let decoded = decode_field(&encoded).unwrap().unwrap();
        assert_eq!(decoded, v);
    }

    #[test]
    fn null_token_decodes_to_none() {
        assert_eq!(decode_field(&encode_null()).unwrap(), None);
    }

    #[test]
    fn truncate_at_nul_stops_at_first_zero_byte() {
        let bytes = b"hello\0garbage";
        assert_eq!(truncate_at_nul(bytes), b"hello");
    }

    #[test]
    fn datetime_tag_decodes_as_text() {
        let encoded = "2024-01-01T00:00:00D";
        let decoded = decode_field(encoded).unwrap().unwrap();
        assert_eq!(decoded, Value::Text("2024-01-01T00:00:00".to_string()));
    }
}
