use crate::proxy::Envelope;

/// Failures the dispatcher reports to callers. Each becomes an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("{0} is not enabled")]
    ModuleDisabled(String),
    #[error("invalid id")]
    InvalidId,
    #[error("invalid quantity")]
    InvalidQuantity,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("unknown domain {0:?}")]
    UnknownDomain(String),
    #[error("no route for {method} {path}")]
    NoRoute { method: String, path: String },
}

impl DispatchError {
    pub fn code(&self) -> u16 {
        match self {
            DispatchError::UnknownDomain(_) | DispatchError::NoRoute { .. } => 404,
            _ => 400,
        }
    }
}

impl From<DispatchError> for Envelope {
    fn from(e: DispatchError) -> Self {
        Envelope::error(e.to_string(), e.code())
    }
}
