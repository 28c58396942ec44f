//! Error taxonomy for the matching core
//!
//! Validation failures and backend initialization failures are typed so
//! callers can tell them apart from ordinary I/O errors. An empty result
//! set is never an error; it is a valid search outcome.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    /// A mandatory input field is absent. Surfaced immediately, no partial
    /// processing is attempted.
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),

    /// The encoding backend failed to initialize. Fatal for the session;
    /// raised at engine construction, before any search or registration.
    #[error("encoding backend unavailable: {0}")]
    EncodingUnavailable(String),
}
