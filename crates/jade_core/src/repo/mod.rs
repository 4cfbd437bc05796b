//! Storage contracts for the atom graph and the product catalog.
//!
//! Services depend on the traits here, never on SQLite directly. Reads of
//! missing rows give `Ok(None)` or an empty list, never an error.

pub mod atom_repo;
pub mod product_repo;

use crate::db::DbError;
use crate::model::atom::{AtomId, AtomValidationError};
use crate::model::relationship::RelationshipValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    AtomValidation(AtomValidationError),
    RelationshipValidation(RelationshipValidationError),
    Db(DbError),
    /// A write referenced an atom id that does not exist.
    NotFound(AtomId),
    /// A value that does not fit the model, on write or on read.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtomValidation(err) => write!(f, "atom rejected: {err}"),
            Self::RelationshipValidation(err) => write!(f, "relationship rejected: {err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "no atom with id `{id}`"),
            Self::InvalidData(message) => write!(f, "stored row is invalid: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::AtomValidation(err) => Some(err),
            Self::RelationshipValidation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<AtomValidationError> for RepoError {
    fn from(value: AtomValidationError) -> Self {
        Self::AtomValidation(value)
    }
}

impl From<RelationshipValidationError> for RepoError {
    fn from(value: RelationshipValidationError) -> Self {
        Self::RelationshipValidation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
