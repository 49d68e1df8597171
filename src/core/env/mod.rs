mod vars;

pub use vars::EnvVarManager;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("invalid variable name: {0}")]
    InvalidName(String),
    #[error("{0}: not set")]
    VarNotFound(String),
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}
