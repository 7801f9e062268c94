//! Persistence medium contract and implementations.
//!
//! # Responsibility
//! - Define the synchronous string key-value interface the store writes to.
//! - Provide an in-memory medium (tests, ephemeral shells) and a SQLite one.
//!
//! # Invariants
//! - `set` either stores the full value or fails without partial writes.
//! - Media are capacity-bounded; a rejected write surfaces as an error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryMedium;
pub use sqlite::SqliteMedium;

pub type MediumResult<T> = Result<T, MediumError>;

/// Failure reported by a key-value medium.
#[derive(Debug)]
pub enum MediumError {
    /// Write would exceed the medium capacity.
    QuotaExceeded {
        key: String,
        required_bytes: usize,
        quota_bytes: usize,
    },
    Db(DbError),
}

impl Display for MediumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded {
                key,
                required_bytes,
                quota_bytes,
            } => write!(
                f,
                "storage quota exceeded writing `{key}`: {required_bytes} bytes required, {quota_bytes} available"
            ),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MediumError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::QuotaExceeded { .. } => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for MediumError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for MediumError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueMedium {
    fn get(&self, key: &str) -> MediumResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> MediumResult<()>;
}

impl<M: KeyValueMedium + ?Sized> KeyValueMedium for &mut M {
    fn get(&self, key: &str) -> MediumResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> MediumResult<()> {
        (**self).set(key, value)
    }
}
