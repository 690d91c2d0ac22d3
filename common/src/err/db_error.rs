use std::io;

use thiserror::Error;

/// Tagged error kind for every operation the engine exposes. Each variant
/// groups to one of the §7 kinds (Parse / Catalog / Schema / I/O / Index /
/// Control); the payload carries the offending token, name, or message.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DbError {
    // ------------------------------------------------------------------
    // Parse
    // ------------------------------------------------------------------
    #[error("expected keyword: {0}")]
    KeywordExpected(String),
    #[error("expected identifier, found: {0}")]
    IdentifierExpected(String),
    #[error("unexpected keyword: {0}")]
    UnexpectedKeyword(String),
    #[error("expected a value, found: {0}")]
    ValueExpected(String),
    #[error("expected an operator, found: {0}")]
    OperatorExpected(String),
    #[error("expected punctuation: {0}")]
    PunctuationExpected(String),
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    #[error("invalid operator: {0}")]
    InvalidOperator(String),
    #[error("syntax error: {0}")]
    SyntaxError(String),

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------
    #[error("database already exists: {0}")]
    DatabaseExists(String),
    #[error("database does not exist: {0}")]
    DatabaseDoesNotExist(String),
    #[error("table already exists: {0}")]
    TableExists(String),
    #[error("unknown table: {0}")]
    UnknownTable(String),
    #[error("unknown entity: {0}")]
    UnknownEntity(String),
    #[error("no database in use")]
    NoDatabaseInUse,
    #[error("primary key required for table: {0}")]
    PrimaryKeyRequired(String),

    // ------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),
    #[error("non-nullable value not given for: {0}")]
    NonNullableValueNotGiven(String),

    // ------------------------------------------------------------------
    // I/O
    // ------------------------------------------------------------------
    #[error("read error: {0}")]
    ReadError(String),
    #[error("write error: {0}")]
    WriteError(String),
    #[error("seek error: {0}")]
    SeekError(String),
    #[error("storage full")]
    StorageFull,
    #[error("no encode performed")]
    NoEncodePerformed,
    #[error("no decode performed")]
    NoDecodePerformed,
    #[error("file does not exist: {0}")]
    FileDoesNotExist(String),

    // ------------------------------------------------------------------
    // Index
    // ------------------------------------------------------------------
    #[error("index already exists: {0}")]
    IndexExists(String),
    #[error("unknown index: {0}")]
    UnknownIndex(String),
    #[error("can't create index: {0}")]
    CantCreateIndex(String),

    // ------------------------------------------------------------------
    // Control
    // ------------------------------------------------------------------
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
    #[error("user terminated")]
    UserTerminated,
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("no error")]
    NoError,
    #[error("unknown error: {0}")]
    UnknownError(String),
}

impl From<io::Error> for DbError {
    fn from(error: io::Error) -> Self {
        use io::ErrorKind::*;
        match error.kind() {
            NotFound => DbError::FileDoesNotExist(error.to_string()),
            UnexpectedEof => DbError::SeekError(error.to_string()),
            _ => DbError::ReadError(error.to_string()),
        }
    }
}
