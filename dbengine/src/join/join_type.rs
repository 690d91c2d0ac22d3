/// Join kind named in the `ON` clause (§4.6). Only `Left`/`Right` are
/// implemented; the rest surface `NotImplemented`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Left,
    Right,
    Inner,
    Cross,
    Full,
}
