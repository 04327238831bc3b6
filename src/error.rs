use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] Box<ureq::Error>),
    #[error("invalid response: {0}")]
    Decode(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] ureq::serde_json::Error),
    #[error("N2YO error: {0}")]
    Api(String),
    #[error("request task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Request(Box::new(err))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("no satellites to track")]
    NoTracks,
    #[error("{name} has no positions")]
    EmptySeries { name: String },
    #[error("{name} has {actual} positions, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
}
