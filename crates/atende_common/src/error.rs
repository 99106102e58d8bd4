// --- File: crates/atende_common/src/error.rs ---
use thiserror::Error;

/// The base error type for all atende crates.
///
/// The transport-related variants are deliberately split three ways
/// (timeout, connection, server) so callers can render a different message
/// for each kind.
#[derive(Error, Debug)]
pub enum AtendeError {
    /// The remote call exceeded the client timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server could not be reached at all
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The server answered with a non-success status
    #[error("Server error (status {status}): {message}")]
    Server { status: u16, message: String },

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    Parse(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error occurred during validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Error occurred while reading or writing local durable storage
    #[error("Storage error: {0}")]
    Storage(String),

    /// Error that doesn't fit into any other category
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AtendeError {
    /// User-facing message for this error, in the product locale.
    ///
    /// Remote business errors pass their own message through when one is
    /// present; otherwise a generic fallback is chosen per status code.
    pub fn user_message(&self) -> String {
        match self {
            AtendeError::Timeout(_) => {
                "O servidor demorou demais para responder. Tente novamente.".to_string()
            }
            AtendeError::ConnectionFailed(_) => {
                "Não foi possível conectar ao servidor. Verifique sua conexão.".to_string()
            }
            AtendeError::Server { status, message } => {
                if !message.is_empty() {
                    message.clone()
                } else {
                    match status {
                        400 => "Requisição inválida.".to_string(),
                        401 | 403 => "Acesso não autorizado.".to_string(),
                        404 => "Registro não encontrado.".to_string(),
                        _ => "Ocorreu um erro no servidor. Tente novamente.".to_string(),
                    }
                }
            }
            AtendeError::Validation(message) => message.clone(),
            _ => "Ocorreu um erro inesperado.".to_string(),
        }
    }
}

// Common error conversions
impl From<reqwest::Error> for AtendeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AtendeError::Timeout(err.to_string())
        } else if err.is_connect() {
            AtendeError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            AtendeError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            AtendeError::Server {
                status: status.as_u16(),
                message: String::new(),
            }
        } else {
            AtendeError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AtendeError {
    fn from(err: serde_json::Error) -> Self {
        AtendeError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for AtendeError {
    fn from(err: std::io::Error) -> Self {
        AtendeError::Storage(err.to_string())
    }
}
