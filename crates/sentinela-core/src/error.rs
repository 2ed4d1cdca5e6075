use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown occurrence kind: {0}")]
    UnknownKind(String),

    #[error("no alert row at index {index} (list has {len})")]
    RowOutOfRange { index: usize, len: usize },

    #[error("no map marker at index {0}")]
    MarkerOutOfRange(usize),
}
