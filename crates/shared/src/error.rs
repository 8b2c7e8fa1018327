use thiserror::Error;

/// Failure of a single directory API call, normalized from the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never produced a usable response: unreachable host,
    /// connection reset, or a body that is not the expected JSON.
    #[error("transport failure: {0}")]
    Transport(String),
    /// Non-success status without a parsable `detail` message.
    #[error("server responded with HTTP {status}")]
    Http { status: u16 },
    /// Non-success status whose body carried a human-readable `detail`.
    #[error("{detail}")]
    Validation { status: u16, detail: String },
}

impl GatewayError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Validation { detail, .. } => Some(detail),
            Self::Transport(_) | Self::Http { .. } => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status } | Self::Validation { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// Banner text: a server-supplied detail verbatim, otherwise `context`
    /// followed by the failure.
    pub fn display_message(&self, context: &str) -> String {
        match self {
            Self::Validation { detail, .. } => detail.clone(),
            Self::Transport(_) | Self::Http { .. } => format!("{context}: {self}"),
        }
    }
}
