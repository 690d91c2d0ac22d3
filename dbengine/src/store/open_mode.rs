/// How `PageStore::open` should treat the target file (§4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    CreateNew,
    OpenExisting,
}
