// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signature-over-bytes verification.
//!
//! [`SignatureEngine`] is the seam to whatever checks XML-DSig signature values.
//! [`X509SignatureEngine`] covers the common RSA and ECDSA algorithm identifiers,
//! verifying canonical `SignedInfo` bytes with the embedded certificate's key.
//! The same primitives check certificate signatures for the stricter anchor match.

use fedtrust_abstractions::SignatureBlock;
use rsa::pkcs1v15;
use rsa::pkcs8::DecodePublicKey as _;
use rsa::RsaPublicKey;
use sha1::Sha1;
use sha2::digest::const_oid::AssociatedOid;
use sha2::digest::Digest;
use sha2::{Sha256, Sha384, Sha512};
use signature::Verifier as _;

use crate::certificate::CertificateRecord;
use crate::error::SignatureEngineError;

pub const ALG_RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
pub const ALG_RSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha256";
pub const ALG_RSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha384";
pub const ALG_RSA_SHA512: &str = "http://www.w3.org/2001/04/xmldsig-more#rsa-sha512";
pub const ALG_ECDSA_SHA256: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha256";
pub const ALG_ECDSA_SHA384: &str = "http://www.w3.org/2001/04/xmldsig-more#ecdsa-sha384";

/// Checks a signature block against a certificate's public key.
///
/// Contract:
/// - `Ok(true)`: the signature value verifies.
/// - `Ok(false)`: the signature is well-formed but does not verify.
/// - `Err(...)`: the signature or key could not be interpreted at all.
pub trait SignatureEngine: Sync {
    fn name(&self) -> &'static str;

    fn check_signature(
        &self,
        signature: &SignatureBlock,
        certificate: &CertificateRecord,
    ) -> Result<bool, SignatureEngineError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct X509SignatureEngine;

impl SignatureEngine for X509SignatureEngine {
    fn name(&self) -> &'static str {
        "x509"
    }

    fn check_signature(
        &self,
        signature: &SignatureBlock,
        certificate: &CertificateRecord,
    ) -> Result<bool, SignatureEngineError> {
        let algorithm = Algorithm::from_xmldsig_uri(&signature.signature_method)?;

        // XML-DSig carries ECDSA values as raw r || s.
        verify_with_spki(
            certificate.spki_der(),
            algorithm,
            &signature.signed_info,
            &signature.signature_value,
            EcdsaEncoding::Raw,
        )
    }
}

/// Whether `issuer`'s key verifies the signature on `certificate`.
pub(crate) fn verify_issued_by(
    certificate: &CertificateRecord,
    issuer: &CertificateRecord,
) -> Result<bool, SignatureEngineError> {
    let algorithm = Algorithm::from_certificate_oid(certificate.signature_oid())?;

    verify_with_spki(
        issuer.spki_der(),
        algorithm,
        certificate.tbs_der(),
        certificate.signature(),
        EcdsaEncoding::Der,
    )
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Algorithm {
    RsaSha1,
    RsaSha256,
    RsaSha384,
    RsaSha512,
    EcdsaP256Sha256,
    EcdsaP384Sha384,
}

impl Algorithm {
    fn from_xmldsig_uri(uri: &str) -> Result<Self, SignatureEngineError> {
        match uri.trim() {
            ALG_RSA_SHA1 => Ok(Self::RsaSha1),
            ALG_RSA_SHA256 => Ok(Self::RsaSha256),
            ALG_RSA_SHA384 => Ok(Self::RsaSha384),
            ALG_RSA_SHA512 => Ok(Self::RsaSha512),
            ALG_ECDSA_SHA256 => Ok(Self::EcdsaP256Sha256),
            ALG_ECDSA_SHA384 => Ok(Self::EcdsaP384Sha384),
            other => Err(SignatureEngineError::UnsupportedAlgorithm(other.to_string())),
        }
    }

    fn from_certificate_oid(oid: &str) -> Result<Self, SignatureEngineError> {
        match oid {
            "1.2.840.113549.1.1.5" => Ok(Self::RsaSha1),
            "1.2.840.113549.1.1.11" => Ok(Self::RsaSha256),
            "1.2.840.113549.1.1.12" => Ok(Self::RsaSha384),
            "1.2.840.113549.1.1.13" => Ok(Self::RsaSha512),
            "1.2.840.10045.4.3.2" => Ok(Self::EcdsaP256Sha256),
            "1.2.840.10045.4.3.3" => Ok(Self::EcdsaP384Sha384),
            other => Err(SignatureEngineError::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum EcdsaEncoding {
    Raw,
    Der,
}

fn verify_with_spki(
    spki_der: &[u8],
    algorithm: Algorithm,
    message: &[u8],
    signature: &[u8],
    encoding: EcdsaEncoding,
) -> Result<bool, SignatureEngineError> {
    match algorithm {
        Algorithm::RsaSha1 => verify_rsa::<Sha1>(spki_der, message, signature),
        Algorithm::RsaSha256 => verify_rsa::<Sha256>(spki_der, message, signature),
        Algorithm::RsaSha384 => verify_rsa::<Sha384>(spki_der, message, signature),
        Algorithm::RsaSha512 => verify_rsa::<Sha512>(spki_der, message, signature),
        Algorithm::EcdsaP256Sha256 => {
            let key = p256::ecdsa::VerifyingKey::from_public_key_der(spki_der)
                .map_err(|e| SignatureEngineError::InvalidKey(format!("bad P-256 public key: {e}")))?;
            let sig = match encoding {
                EcdsaEncoding::Raw => p256::ecdsa::Signature::from_slice(signature),
                EcdsaEncoding::Der => p256::ecdsa::Signature::from_der(signature),
            };
            match sig {
                Ok(sig) => Ok(key.verify(message, &sig).is_ok()),
                Err(e) => ecdsa_decode_failure(encoding, signature, 64, e),
            }
        }
        Algorithm::EcdsaP384Sha384 => {
            let key = p384::ecdsa::VerifyingKey::from_public_key_der(spki_der)
                .map_err(|e| SignatureEngineError::InvalidKey(format!("bad P-384 public key: {e}")))?;
            let sig = match encoding {
                EcdsaEncoding::Raw => p384::ecdsa::Signature::from_slice(signature),
                EcdsaEncoding::Der => p384::ecdsa::Signature::from_der(signature),
            };
            match sig {
                Ok(sig) => Ok(key.verify(message, &sig).is_ok()),
                Err(e) => ecdsa_decode_failure(encoding, signature, 96, e),
            }
        }
    }
}

// A raw r || s of the right width whose scalars are out of range cannot verify; anything else is malformed.
fn ecdsa_decode_failure(
    encoding: EcdsaEncoding,
    signature: &[u8],
    raw_len: usize,
    error: signature::Error,
) -> Result<bool, SignatureEngineError> {
    if encoding == EcdsaEncoding::Raw && signature.len() == raw_len {
        tracing::debug!("ECDSA scalars out of range: {error}");
        return Ok(false);
    }
    Err(SignatureEngineError::InvalidSignatureEncoding(format!(
        "bad ECDSA signature bytes: {error}"
    )))
}

fn verify_rsa<D>(spki_der: &[u8], message: &[u8], signature: &[u8]) -> Result<bool, SignatureEngineError>
where
    D: Digest + AssociatedOid,
{
    let key = RsaPublicKey::from_public_key_der(spki_der)
        .map_err(|e| SignatureEngineError::InvalidKey(format!("bad RSA public key: {e}")))?;
    let vk = pkcs1v15::VerifyingKey::<D>::new(key);
    let sig = pkcs1v15::Signature::try_from(signature)
        .map_err(|e| SignatureEngineError::InvalidSignatureEncoding(format!("bad RSA signature bytes: {e}")))?;
    Ok(vk.verify(message, &sig).is_ok())
}
