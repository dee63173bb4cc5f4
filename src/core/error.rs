use std::fmt;
use thiserror::Error;

/// Which side of a match a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Patient,
    Provider,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Patient => f.write_str("patient"),
            EntityKind::Provider => f.write_str("provider"),
        }
    }
}

/// Contract violations raised by the scorer and ranker
///
/// Missing optional attributes never produce an error; they score zero.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    #[error("{entity} record{} has no id", index_suffix(.index))]
    MissingIdentity {
        entity: EntityKind,
        /// Position in the input list, when the record came from one
        index: Option<usize>,
    },
}

fn index_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at position {}", i),
        None => String::new(),
    }
}

impl MatchError {
    pub fn missing_identity(entity: EntityKind, index: Option<usize>) -> Self {
        MatchError::MissingIdentity { entity, index }
    }

    /// Same error, attributed to a position in an input list
    pub fn at_index(self, index: usize) -> Self {
        match self {
            MatchError::MissingIdentity { entity, .. } => MatchError::MissingIdentity {
                entity,
                index: Some(index),
            },
        }
    }
}
