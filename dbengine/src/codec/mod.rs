pub mod entity_codec;
pub mod field;
pub mod index_codec;
pub mod row_codec;

pub use field::{decode_field, encode_field};
