use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures of a single identification request.
#[derive(Debug, Error)]
pub enum Error {
    /// The bytes are not an image we can decode.
    #[error("cannot decode image: {0}")]
    Decode(String),
    /// The prediction endpoint was unreachable or answered with something unusable.
    #[error("prediction failed: {0}")]
    PredictionTransport(String),
    /// The predicted label has no entry in the species table.
    #[error("no species record for label '{0}'")]
    UnknownLabel(String),
    /// The local model could not be loaded or produced unusable scores.
    #[error("model error: {0}")]
    Model(String),
    /// The configuration file is unreadable or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Reading the input image from disk failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
