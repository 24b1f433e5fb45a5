use artscout_api::ApiError;
use artscout_store::StoreError;
use thiserror::Error;

/// All the ways things can go wrong in ArtScout
///
/// We use thiserror here because it generates the boilerplate for us.
/// Life's too short to manually implement Display and Error traits.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request failed with status {status}: {message}")]
    HttpError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    ParseError(String),

    #[error("Storage error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(e) => Error::NetworkError(e.to_string()),
            ApiError::Http { status, body } => Error::HttpError {
                status,
                message: body,
            },
            ApiError::Parse(e) => Error::ParseError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_errors_keep_their_kind() {
        let err: Error = ApiError::Http {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert!(matches!(err, Error::HttpError { status: 500, .. }));
        assert_eq!(err.to_string(), "Request failed with status 500: boom");

        let parse = serde_json::from_str::<u32>("{").unwrap_err();
        let err: Error = ApiError::Parse(parse).into();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
