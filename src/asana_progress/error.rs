use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("No Asana access token was provided")]
    MissingCredential,

    #[error("Could not connect to the Asana API: {0}")]
    Connectivity(String),

    #[error("Asana API error: {message}")]
    Api {
        status: Option<u16>,
        message: String,
    },

    #[error("Could not persist the access token: {0}")]
    Persistence(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl TrackerError {
    pub fn api(message: impl Into<String>) -> Self {
        TrackerError::Api {
            status: None,
            message: message.into(),
        }
    }

    pub fn api_status(status: u16, message: impl Into<String>) -> Self {
        TrackerError::Api {
            status: Some(status),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
