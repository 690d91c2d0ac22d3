use common::err::{DbError, DbResult};

use crate::codec::field::{decode_field, encode_field, encode_null, tokenize, truncate_at_nul};
use crate::model::attribute::Attribute;
use crate::model::data_type::DataType;
use crate::model::entity::Entity;
use crate::model::value::Value;

/// Encodes an `Entity` into the whitespace field stream stored in its
/// entity block chain (§4.2): name, autoincr counter, attribute count, then
/// one group of fields per attribute.
pub fn encode_entity(entity: &Entity) -> Vec<u8> {
    let mut tokens = vec![
        encode_field(&Value::Text(entity.name.clone())),
        encode_field(&Value::Int(entity.next_autoincr)),
        encode_field(&Value::Int(entity.attributes.len() as i64)),
    ];
    for attr in &entity.attributes {
        tokens.push(encode_field(&Value::Text(attr.name.clone())));
        tokens.push(attr.data_type.tag().to_string());
        tokens.push(encode_field(&Value::Int(attr.size as i64)));
        tokens.push(encode_field(&Value::Bool(attr.primary_key)));
        tokens.push(encode_field(&Value::Bool(attr.auto_increment)));
        tokens.push(encode_field(&Value::Bool(attr.nullable)));
        tokens.push(encode_field(&Value::Bool(attr.has_default())));
        match &attr.default {
            Some(v) => tokens.push(encode_field(v)),
            None => tokens.push(encode_null()),
        }
    }
    let mut out = tokens.join(" ").into_bytes();
    out.push(0);
    out
}

pub fn decode_entity(bytes: &[u8]) -> DbResult<Entity> {
    let text = String::from_utf8_lossy(truncate_at_nul(bytes)).into_owned();
    let tokens = tokenize(&text);
    let mut iter = tokens.into_iter();

    let name = text_field(iter.next())?;
    let next_autoincr = int_field(iter.next())?;
    let attr_count = int_field(iter.next())? as usize;

    let mut attributes = Vec::with_capacity(attr_count);
    for _ in 0..attr_count {
        let attr_name = text_field(iter.next())?;
        let type_tag = iter
            .next()
            .ok_or(DbError::NoDecodePerformed)?
            .chars()
            .next()
            .ok_or(DbError::NoDecodePerformed)?;
        let data_type = DataType::from_tag(type_tag)?;
        let size = int_field(iter.next())? as usize;
        let primary_key = bool_field(iter.next())?;
        let auto_increment = bool_field(iter.next())?;
        let nullable = bool_field(iter.next())?;
        let _has_default = bool_field(iter.next())?;
        let default = decode_field(iter.next().ok_or(DbError::NoDecodePerformed)?)?;

        attributes.push(
            Attribute::new(attr_name, data_type)
                .with_size(size)
                .with_primary_key(primary_key)
                .with_auto_increment(auto_increment)
                .with_nullable(nullable)
                .with_default(default),
        );
    }

    Ok(Entity {
        name,
        next_autoincr,
        attributes,
        block_num: 0,
    })
}

fn text_field(token: Option<&str>) -> DbResult<String> {
    match decode_field(token.ok_or(DbError::NoDecodePerformed)?)? {
        Some(Value::Text(s)) => Ok(s),
        _ => Err(DbError::NoDecodePerformed),
    }
}

fn int_field(token: Option<&str>) -> DbResult<i64> {
    match decode_field(token.ok_or(DbError::NoDecodePerformed)?)? {
        Some(Value::Int(i)) => Ok(i),
        _ => Err(DbError::NoDecodePerformed),
    }
}

fn bool_field(token: Option<&str>) -> DbResult<bool> {
    match decode_field(token.ok_or(DbError::NoDecodePerformed)?)? {
        Some(Value::Bool(b)) => Ok(b),
        _ => Err(DbError::NoDecodePerformed),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_an_entity_with_mixed_attributes() {
        let attrs = vec![
            Attribute::new("id", DataType::Int)
                .with_primary_key(true)
                .with_auto_increment(true),
            Attribute::new("name", DataType::Varchar)
                .with_size(50)
                .with_nullable(false),
            Attribute::new("age", DataType::Int).with_default(Some(Value::Int(0))),
        ];
        let entity = Entity::new("Users", attrs).unwrap();

        let bytes = encode_entity(&entity);
        let back = decode_entity(&bytes).unwrap();

        assert_eq!(back.name, "Users");
        assert_eq!(back.next_autoincr, entity.next_autoincr);
        assert_eq!(back.attributes, entity.attributes);
    }
}
