// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Embedded signing certificate extraction and signature verification.

use fedtrust_abstractions::SignedMessage;

use crate::certificate::CertificateRecord;
use crate::signature_engine::SignatureEngine;
use crate::{Result, TrustError};

/// Decode the first certificate in the message signature's `KeyInfo`.
///
/// Only the first embedded certificate is consulted, even when several are present.
pub fn certificate_from_signature<M>(message: &M) -> Result<CertificateRecord>
where
    M: SignedMessage + ?Sized,
{
    let signature = message.signature().ok_or(TrustError::MissingSignature)?;
    let der = signature
        .first_certificate()
        .ok_or(TrustError::MissingKeyMaterial)?;

    CertificateRecord::from_der(der)
}

/// Like [`certificate_from_signature`], with a missing signature or certificate as `None`.
pub(crate) fn embedded_certificate<M>(message: &M) -> Result<Option<CertificateRecord>>
where
    M: SignedMessage + ?Sized,
{
    match certificate_from_signature(message) {
        Ok(cert) => Ok(Some(cert)),
        Err(TrustError::MissingSignature) => {
            tracing::debug!("message is unsigned");
            Ok(None)
        }
        Err(TrustError::MissingKeyMaterial) => {
            tracing::debug!("signature has no embedded certificate");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Verify the message signature with its own embedded certificate.
///
/// Unsigned messages and signatures without an embedded certificate read as `false`.
/// Only a structural failure inside the engine is an error.
pub fn verify_signature<M, E>(message: &M, engine: &E) -> Result<bool>
where
    M: SignedMessage + ?Sized,
    E: SignatureEngine + ?Sized,
{
    let Some(signature) = message.signature() else {
        tracing::debug!("message is unsigned");
        return Ok(false);
    };

    let Some(der) = signature.first_certificate() else {
        tracing::debug!("signature has no embedded certificate");
        return Ok(false);
    };

    let cert = CertificateRecord::from_der(der)?;

    let verified = engine.check_signature(signature, &cert).map_err(|e| {
        tracing::warn!(engine = engine.name(), "signature engine failed: {e}");
        TrustError::SignatureEngine(e)
    })?;

    tracing::debug!(
        engine = engine.name(),
        subject = cert.subject_name(),
        verified,
        "signature checked"
    );
    Ok(verified)
}
