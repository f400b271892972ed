use thiserror::Error;

/// Gateway-wide error model for uniform JSON-RPC mapping.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("{0}")]
    InvalidParams(String),
    #[error("{0}")]
    Message(String),
}

impl GatewayError {
    /// JSON-RPC error code for this failure.
    pub fn code(&self) -> i32 {
        match self {
            GatewayError::InvalidParams(_) => -32602,
            GatewayError::UnknownTool(_) | GatewayError::Message(_) => -32000,
        }
    }
}

impl From<anyhow::Error> for GatewayError {
    fn from(e: anyhow::Error) -> Self {
        GatewayError::Message(e.to_string())
    }
}
