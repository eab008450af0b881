use thiserror::Error;

use crate::actions::Action;

/// Ways a word lookup can fail. Each one surfaces as a single error item.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Connecting, sending or reading failed, or the server answered with a
    /// non-success status.
    #[error("{0}")]
    Transport(String),
    /// The body could not be parsed as JSON.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    /// The API reported a failure through `errno`.
    #[error("{message} (error code {code})")]
    Api { code: i64, message: String },
    /// The JSON lacks fields needed to build results.
    #[error("{0}")]
    Mapping(String),
}

impl LookupError {
    /// Render the failure as a result item for the query `word`.
    pub fn to_action(&self, word: &str) -> Action {
        match self {
            LookupError::Transport(_) | LookupError::Decode(_) => {
                Action::error(word, self.to_string())
            }
            LookupError::Api { code, message } => {
                Action::error(message.as_str(), format!("Error code {code}"))
            }
            LookupError::Mapping(msg) => Action::error("Error presenting", msg.as_str()),
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        LookupError::Transport(e.to_string())
    }
}
