use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures of a privileged command that never reached a verdict.
///
/// An explicit rejection from the control plane is not an error; it comes
/// back as a response with `success: false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The call failed in transport: timeout, DNS, TLS, refused connection,
    /// non-success HTTP status or an unreadable response body. The remote
    /// outcome is unknown.
    #[error("network error: {detail}")]
    Network { detail: String },

    /// The configured endpoint cannot express this command.
    #[error("unsupported command: {0}")]
    Unsupported(String),
}

impl CommandError {
    pub fn network(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
        }
    }

    /// Short message suitable for showing to the operator.
    ///
    /// The transport detail is kept out of it and only goes to the logs.
    #[must_use]
    pub fn operator_message(&self) -> String {
        match self {
            Self::Network { .. } => {
                "Could not reach the control plane. The command may not have been applied; \
                 check the status feed before retrying."
                    .to_string()
            }
            Self::Unsupported(reason) => reason.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("WebSocket error: {0}")]
    WebSocket(Box<tokio_tungstenite::tungstenite::Error>),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("command rejected: {0}")]
    Rejected(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        Error::WebSocket(Box::new(err))
    }
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
