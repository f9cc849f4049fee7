use std::path::PathBuf;

use crate::model::VehicleId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record carries the requested id
    #[error("vehicle {0} not found")]
    NotFound(VehicleId),

    /// The backing file exists but could not be read or parsed
    #[error("backing file {} unavailable: {reason}", path.display())]
    Unavailable { path: PathBuf, reason: String },

    /// The highest id is already `u64::MAX`, so no new id can be assigned
    #[error("no vehicle ids left to assign")]
    IdsExhausted,

    /// Writing the collection back failed; nothing was saved
    #[error("failed to persist {}: {reason}", path.display())]
    Persistence { path: PathBuf, reason: String },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
