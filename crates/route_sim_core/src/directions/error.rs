use std::fmt;

/// Errors encountered while fetching a route.
///
/// Every variant is recoverable: the caller falls back to a straight-line route
/// and shows the `Display` text as a warning.
#[derive(Debug)]
pub enum DirectionsError {
    #[cfg(feature = "http")]
    Http(reqwest::Error),
    #[cfg(feature = "http")]
    Json(reqwest::Error),
    /// Non-2xx response from the proxy; `message` comes from its `{error}` body.
    Status { status: u16, message: Option<String> },
    /// The provider answered with a non-zero result code.
    Api { code: i64, message: Option<String> },
    NoRoute,
    /// The body was not a directions document.
    InvalidResponse(String),
    InvalidUrl(String),
    Unavailable(String),
}

impl fmt::Display for DirectionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "http")]
            DirectionsError::Http(err) => write!(f, "directions request failed: {err}"),
            #[cfg(feature = "http")]
            DirectionsError::Json(err) => write!(f, "invalid directions response: {err}"),
            DirectionsError::Status {
                message: Some(message),
                ..
            } => write!(f, "{message}"),
            DirectionsError::Status {
                status,
                message: None,
            } => write!(f, "API request failed: {status}"),
            DirectionsError::Api {
                code,
                message: Some(message),
            } => write!(f, "No route found (code {code}: {message})"),
            DirectionsError::Api {
                code,
                message: None,
            } => write!(f, "No route found (code {code})"),
            DirectionsError::NoRoute => write!(f, "No route found"),
            DirectionsError::InvalidResponse(message) => {
                write!(f, "invalid directions response: {message}")
            }
            DirectionsError::InvalidUrl(message) => {
                write!(f, "failed to build directions URL: {message}")
            }
            DirectionsError::Unavailable(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for DirectionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "http")]
            DirectionsError::Http(err) | DirectionsError::Json(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for DirectionsError {
    fn from(err: reqwest::Error) -> Self {
        DirectionsError::Http(err)
    }
}
