use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown environment: {0} (expected: development|staging|production)")]
    UnknownEnvironment(String),

    #[error("unknown health state: {0}")]
    UnknownHealthState(String),

    #[error("invalid probe spec: {0}")]
    InvalidSpec(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
