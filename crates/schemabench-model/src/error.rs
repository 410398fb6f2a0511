use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("empty {field} in column identifier")]
    EmptyIdentifier { field: &'static str },
}

pub type Result<T> = std::result::Result<T, ModelError>;
