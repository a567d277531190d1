use thiserror::Error;

/// Hotload unified error type
#[derive(Error, Debug)]
pub enum HotloadError {
    /// A named app, deployment or access key does not exist for the caller
    #[error("{0}")]
    NotFound(String),

    /// A command failed a local precondition before any network effect
    #[error("{0}")]
    Validation(String),

    /// The management service rejected the call
    #[error("{0}")]
    Remote(String),

    /// Staging release content failed
    #[error("Packaging failed: {0}")]
    Packaging(String),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output error: {0}")]
    Output(String),
}

impl HotloadError {
    pub fn app_not_found(name: &str) -> Self {
        Self::NotFound(format!("App \"{}\" does not exist.", name))
    }

    pub fn deployment_not_found(name: &str) -> Self {
        Self::NotFound(format!("Deployment \"{}\" does not exist.", name))
    }

    pub fn access_key_not_found(name: &str) -> Self {
        Self::NotFound(format!("Access key \"{}\" does not exist.", name))
    }
}

impl From<reqwest::Error> for HotloadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

pub type HotloadResult<T> = Result<T, HotloadError>;
