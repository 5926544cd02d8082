// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrustError {
    #[error("malformed certificate: {0}")]
    MalformedCertificate(String),

    #[error("message carries no signature")]
    MissingSignature,

    #[error("signature carries no embedded certificate")]
    MissingKeyMaterial,

    #[error("signature engine failed: {0}")]
    SignatureEngine(#[from] SignatureEngineError),
}

/// Structural failures of a signature engine.
///
/// A signature that simply does not verify is not an error; engines report it as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SignatureEngineError {
    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unusable public key: {0}")]
    InvalidKey(String),

    #[error("malformed signature value: {0}")]
    InvalidSignatureEncoding(String),
}

pub type Result<T> = std::result::Result<T, TrustError>;
