use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrubStateError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot read configuration: {0}")]
    ConfigRead(String),

    #[error("cannot write configuration: {0}")]
    ConfigWrite(String),

    #[error("state file load error: {0}")]
    StateLoad(String),

    #[error("state file validation error: {0}")]
    StateValidation(String),
}
