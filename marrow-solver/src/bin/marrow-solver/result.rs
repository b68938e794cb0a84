use marrow_core::search::SearchError;
use marrow_core::ConstraintOperationError;
use thiserror::Error;

pub(crate) type MarrowResult<T> = Result<T, MarrowError>;

#[derive(Error, Debug)]
pub(crate) enum MarrowError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to build the model, more details: {0}")]
    Model(#[from] ConstraintOperationError),
    #[error("Failed to search, more details: {0}")]
    Search(#[from] SearchError),
    #[error("The {engine} engine needs a model with an objective.")]
    MissingObjective { engine: &'static str },
}
