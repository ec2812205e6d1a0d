use thiserror::Error;

#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("No '{0}:{{' block found in response")]
    MarkerNotFound(String),

    #[error("Block '{0}' is not terminated by a matching '}}'")]
    Unterminated(String),

    #[error("Malformed object literal at byte {position}: {reason}")]
    Malformed { position: usize, reason: &'static str },

    #[error("Expected an object literal, found {0}")]
    NotAnObject(&'static str),

    #[error("Object literal is not valid JSON after key quoting")]
    Json(#[from] serde_json::Error),
}
