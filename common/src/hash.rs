use std::hash::{Hash, Hasher};

use fnv::FnvHasher;

/// Reserved entity-name sentinels for the meta and lookup blocks (§3).
pub const META_SENTINEL: &str = "#Meta#";
pub const LOOKUP_SENTINEL: &str = "#Lookup#";

/// Stable hash of a table/entity name (or one of the reserved sentinels)
/// stored in every block header's `entity_hash` field. FNV is used because
/// it is fast and, unlike `SipHash` (the default `Hash` impl), stable
/// across process runs — the hash is persisted to disk and compared again
/// after reopening the file.
pub fn entity_hash(name: &str) -> u64 {
    let mut hasher = FnvHasher::default();
    name.hash(&mut hasher);
    hasher.finish()
}
