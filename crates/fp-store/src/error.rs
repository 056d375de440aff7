use std::fmt;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// A referenced chart, person, or day pillar has no record.
    NotFound { kind: &'static str, key: String },
    /// A stored chart has fewer than the four required pillars.
    IncompleteChart { person: String, pillars: usize },
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(e) => write!(f, "SQLite error: {e}"),
            StoreError::NotFound { kind, key } => write!(f, "{kind} not found: {key}"),
            StoreError::IncompleteChart { person, pillars } => {
                write!(f, "incomplete chart for {person}: {pillars} of 4 pillars")
            }
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

/// Symbol text read back from the database failed to re-parse — the row
/// is corrupt, not the caller's input.
impl From<fp_core::InvalidSymbol> for StoreError {
    fn from(e: fp_core::InvalidSymbol) -> Self {
        StoreError::InvalidData(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
