// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate text decoding.
//!
//! Metadata and XML-DSig key info carry certificates as base64 text, usually
//! wrapped across several lines.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("certificate text was empty")]
    Empty,

    #[error("certificate text is not valid base64: {0}")]
    InvalidBase64(String),
}

/// Decode base64 certificate text into DER bytes.
///
/// Whitespace anywhere in the input is ignored.
pub fn decode_certificate_text(text: &str) -> Result<Vec<u8>, EncodingError> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(EncodingError::Empty);
    }

    STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| EncodingError::InvalidBase64(e.to_string()))
}
