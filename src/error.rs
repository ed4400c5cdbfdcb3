//! Domain error types.
//!
//! Application plumbing uses `anyhow::Result`; these enums carry the cases
//! the session needs to tell apart (recover locally vs. end the session).

use rspotify::http::HttpError;
use rspotify::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    /// Malformed or out-of-range user input. Recovered by returning to the menu.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// A search returned nothing. Recovered by returning to the menu.
    #[error("No {0} found!")]
    NoResults(&'static str),

    /// A recommendation was requested without any seeds selected.
    #[error("Select at least one genre, artist or track first.")]
    NoSeeds,

    /// The catalog only accepts a bounded number of seeds per request.
    #[error("You can only send {cap} seed values in one recommendation request, got {requested}")]
    TooManySeeds { requested: usize, cap: usize },

    /// Token exchange or catalog request failure. Ends the session.
    /// `status` is the HTTP status when the service answered with one.
    #[error("{operation} failed: {message}")]
    Upstream {
        operation: String,
        message: String,
        status: Option<u16>,
    },

    /// Mail could not be delivered. Reported, never fatal.
    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),
}

impl FinderError {
    pub fn upstream(operation: impl Into<String>, error: impl std::fmt::Display) -> Self {
        Self::Upstream {
            operation: operation.into(),
            message: error.to_string(),
            status: None,
        }
    }

    /// Upstream failure from a Spotify call, keeping the response status.
    pub fn spotify(operation: impl Into<String>, error: &ClientError) -> Self {
        let status = match error {
            ClientError::Http(http) => match http.as_ref() {
                HttpError::StatusCode(response) => Some(response.status().as_u16()),
                _ => None,
            },
            _ => None,
        };
        Self::Upstream {
            operation: operation.into(),
            message: error.to_string(),
            status,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => *status,
            _ => None,
        }
    }

    /// Errors the session recovers from by printing a message and going back to the menu.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidSelection(_) | Self::NoResults(_) | Self::NoSeeds | Self::MailDelivery(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_errors_end_the_session() {
        let err = FinderError::upstream("search artists", "HTTP status client error (401)");
        assert!(!err.is_recoverable());
        assert_eq!(
            err.to_string(),
            "search artists failed: HTTP status client error (401)"
        );
        assert_eq!(err.status(), None);
    }

    #[test]
    fn spotify_errors_without_a_response_carry_no_status() {
        let err = FinderError::spotify(
            "Artist search",
            &ClientError::Io(std::io::Error::other("connection reset")),
        );
        assert!(matches!(err, FinderError::Upstream { status: None, .. }));
        assert!(err.to_string().starts_with("Artist search failed: "));
        assert_eq!(FinderError::NoSeeds.status(), None);
    }

    #[test]
    fn selection_errors_are_recoverable() {
        assert!(FinderError::InvalidSelection("abc".into()).is_recoverable());
        assert!(FinderError::NoResults("artists").is_recoverable());
        assert!(FinderError::NoSeeds.is_recoverable());
        assert_eq!(FinderError::NoResults("tracks").to_string(), "No tracks found!");
    }
}
