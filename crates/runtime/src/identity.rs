//! Client identity decoding.
//!
//! Transports hand the contract a base64-encoded X.509 subject string of
//! the form `x509::CN=<name>,<attributes>::<issuer>`. Only the common name
//! matters for ownership checks; everything after the first comma is
//! issuer/attribute detail.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use kitty_core::Identity;

const SUBJECT_PREFIX: &str = "x509::CN=";

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("client ID is not valid base64")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("client ID is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("client ID lacks the `{SUBJECT_PREFIX}` subject prefix")]
    MissingPrefix,

    #[error("client ID carries an empty common name")]
    EmptyName,
}

/// Extracts the common name from a base64-encoded client ID.
pub fn decode_client_id(encoded: &str) -> Result<Identity, IdentityError> {
    let decoded = String::from_utf8(STANDARD.decode(encoded)?)?;
    let subject = decoded
        .strip_prefix(SUBJECT_PREFIX)
        .ok_or(IdentityError::MissingPrefix)?;
    let name = subject.split(',').next().unwrap_or_default();
    if name.is_empty() {
        return Err(IdentityError::EmptyName);
    }
    Ok(Identity::from(name))
}
