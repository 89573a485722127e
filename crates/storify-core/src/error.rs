//! Error taxonomy for the story client.
//!
//! Every failure is local and recoverable: accessors return one of these
//! instead of panicking, and the caller branches on the variant.

use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T> = std::result::Result<T, StorifyError>;

#[derive(Debug, Error)]
pub enum StorifyError {
    /// User or slug is empty or malformed, or the story URL built from them
    /// does not match the canonical pattern.
    #[error("invalid story identity")]
    InvalidIdentity,

    /// An accessor was called while the identity does not pass remote validation.
    #[error("story is not validated")]
    NotValidated,

    /// The transport could not fetch `url`.
    #[error("request to {url} failed: {source}")]
    TransportFailure {
        url: String,
        #[source]
        source: TransportError,
    },

    /// Body was not JSON, lacked the success marker, or was empty.
    #[error("bad remote response: {0}")]
    BadRemoteResponse(String),

    /// `resolve` was called with a key that names no URL template.
    #[error("unknown URL kind: {0:?}")]
    UnknownUrlKind(String),
}
