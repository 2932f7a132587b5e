pub type BdResult<T> = Result<T, BdError>;

#[derive(thiserror::Error, Debug)]
pub enum BdError {
    #[error("config error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("io error: {0}")]
    Io(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BdError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }

    /// `true` for errors that only invalidate a single frame document.
    pub fn is_frame_local(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
