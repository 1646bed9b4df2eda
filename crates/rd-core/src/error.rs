use thiserror::Error;

pub type RdResult<T> = Result<T, RdError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
