use thiserror::Error;
use uuid::Uuid;

use crate::model::ItemKind;

#[derive(Error, Debug)]
pub enum DriveError {
    #[error("Item not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Expected a {expected} but {id} is a {actual}")]
    TypeMismatch {
        id: Uuid,
        expected: ItemKind,
        actual: ItemKind,
    },

    #[error("Placing {id} under {target} would make it its own ancestor")]
    Cycle { id: Uuid, target: Uuid },
}

pub type Result<T> = std::result::Result<T, DriveError>;
