pub mod db_error;

pub use db_error::DbError;

/// Alias used throughout the engine: every public operation returns one of
/// these. The `Ok`/`Err` discriminant is the "status", `T` is the optional
/// payload (row count, block number, row set, ...).
pub type DbResult<T> = Result<T, DbError>;
