use common::err::{DbError, DbResult};

use crate::codec::field::{quote_text, tokenize, truncate_at_nul, unquote_text};
use crate::index::index_key::IndexKey;
use crate::index::table_index::Index;

/// Encodes an `Index` (§4.3): name, key-type tag, head block number, then
/// `(key, value_block_num)` per entry.
pub fn encode_index(index: &Index) -> Vec<u8> {
    let mut tokens = vec![
        index.name().to_string(),
        if index.key_is_integer() { "I".to_string() } else { "V".to_string() },
        index.block_num().to_string(),
    ];
    index.each_kv(|k, block_num| {
        let key_token = match k {
            IndexKey::Int(i) => i.to_string(),
            IndexKey::Text(s) => quote_text(s),
        };
        tokens.push(key_token);
        tokens.push(block_num.to_string());
        true
    });
    let mut out = tokens.join(" ").into_bytes();
    out.push(0);
    out
}

/// Decodes an index's fields and entries. `attribute_name` is supplied by
/// the caller (the catalog knows it from the entity, it is not itself part
/// of the encoded stream).
pub fn decode_index(bytes: &[u8], attribute_name: &str) -> DbResult<Index> {
    let text = String::from_utf8_lossy(truncate_at_nul(bytes)).into_owned();
    let mut tokens = tokenize(&text).into_iter();

    let name = tokens.next().ok_or(DbError::NoDecodePerformed)?.to_string();
    let key_is_integer = match tokens.next().ok_or(DbError::NoDecodePerformed)? {
        "I" => true,
        "V" => false,
        _ => return Err(DbError::NoDecodePerformed),
    };
    let block_num: u32 = tokens
        .next()
        .ok_or(DbError::NoDecodePerformed)?
        .parse()
        .map_err(|_| DbError::NoDecodePerformed)?;

    let mut index = Index::new(name, attribute_name, key_is_integer, block_num);
    loop {
        let key_tok = match tokens.next() {
            Some(t) => t,
            None => break,
        };
        let value_tok = tokens.next().ok_or(DbError::NoDecodePerformed)?;
        let value: u32 = value_tok.parse().map_err(|_| DbError::NoDecodePerformed)?;
        let key = if key_is_integer {
            IndexKey::Int(key_tok.parse().map_err(|_| DbError::NoDecodePerformed)?)
        } else {
            IndexKey::Text(unquote_text(key_tok))
        };
        index.put(key, value);
    }
    index.clear_dirty();
    Ok(index)
}
