use thiserror::Error;

/// Errors raised while building or dispatching a tracking hit.
///
/// Every variant except `Transport` is raised before any network activity,
/// so an invalid request is never partially sent.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid custom variable slot {0}, has to be between 1 and 5")]
    InvalidSlot(u8),

    #[error("visitor id must be exactly 16 characters long, got {length}")]
    InvalidVisitorId { length: usize },

    #[error("invalid attribution info: {0}")]
    InvalidAttribution(String),

    #[error("invalid action type '{0}', expected 'download' or 'link'")]
    InvalidActionType(String),

    #[error("invalid value for header {name}: {value:?}")]
    InvalidHeader { name: &'static str, value: String },

    #[error("invalid collector base url '{0}'")]
    InvalidBaseUrl(String),

    #[error("failed to serialize custom variables")]
    Serialization(#[from] serde_json::Error),

    #[error("tracking request failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TrackerError {
    /// Wrap a transport failure, keeping the original error as the source.
    pub fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport(Box::new(err))
    }

    /// True for errors detected locally, before anything was sent.
    pub fn is_validation(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
