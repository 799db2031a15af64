use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid identifier: {0:?}")]
    InvalidId(String),
    #[error("{entity} is missing required field `{field}`")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity} field `{field}` must not be negative")]
    NegativeValue {
        entity: &'static str,
        field: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
