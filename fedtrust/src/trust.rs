// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Trust decisions over federation metadata.
//!
//! Each decision returns `Ok(false)` when nothing matched, including when the
//! message has no signature or no embedded certificate. Errors are reserved
//! for undecodable certificates.

use fedtrust_abstractions::{FederationParticipant, SignedMessage};

use crate::certificate::{CertificateRecord, TrustAnchorSet};
use crate::key_name::{match_cert_to_key_name, matches_key_name};
use crate::metadata_keys::{certificates_from_idp_metadata, certificates_from_sp_metadata, key_names_from_sp_metadata};
use crate::signature::embedded_certificate;
use crate::signature_engine::verify_issued_by;
use crate::Result;

/// How a trust anchor vouches for a certificate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AnchorMatch {
    /// The anchor's subject name equals the certificate's issuer name.
    #[default]
    IssuerName,
    /// As `IssuerName`, and the anchor's key verifies the certificate's signature.
    IssuerNameAndSignature,
}

/// Options for anchor-based trust. Both modes look one hop up only.
#[derive(Debug, Clone, Default)]
pub struct PkixOptions {
    pub anchor_match: AnchorMatch,
}

/// Trust in the context of a secure connection from a service provider.
///
/// Trusted when a presented certificate equals a certificate in the SP metadata,
/// or failing that, when a declared key name matches a presented certificate.
pub fn validate_client_cert<P>(sp_metadata: &P, client_certs: &[CertificateRecord]) -> Result<bool>
where
    P: FederationParticipant + ?Sized,
{
    let from_metadata = certificates_from_sp_metadata(sp_metadata)?;

    for client_cert in client_certs {
        if from_metadata.iter().any(|m| m == client_cert) {
            tracing::debug!(
                subject = client_cert.subject_name(),
                thumbprint = %client_cert.thumbprint_sha1_hex(),
                "client certificate trusted by direct certificate match"
            );
            return Ok(true);
        }
    }

    for key_name in key_names_from_sp_metadata(sp_metadata) {
        for client_cert in client_certs {
            if matches_key_name(client_cert, &key_name) {
                tracing::debug!(
                    subject = client_cert.subject_name(),
                    key_name = %key_name,
                    "client certificate trusted by key name match"
                );
                return Ok(true);
            }
        }
    }

    tracing::debug!(presented = client_certs.len(), "client certificate not trusted");
    Ok(false)
}

/// Trust in a signed response from an identity provider, by exact certificate match.
///
/// The embedded certificate must be byte-identical to one in the IdP metadata.
/// Key names are not consulted.
pub fn validate_with_embedded_cert<M, P>(message: &M, idp_metadata: &P) -> Result<bool>
where
    M: SignedMessage + ?Sized,
    P: FederationParticipant + ?Sized,
{
    let from_metadata = certificates_from_idp_metadata(idp_metadata)?;

    let Some(cert) = embedded_certificate(message)? else {
        return Ok(false);
    };

    let trusted = from_metadata.iter().any(|m| *m == cert);
    tracing::debug!(
        subject = cert.subject_name(),
        trusted,
        "embedded certificate checked against metadata certificates"
    );
    Ok(trusted)
}

/// Trust in a signed response via key name plus trust anchor, with default options.
pub fn validate_pkix<M, P>(message: &M, idp_metadata: &P, anchors: &TrustAnchorSet) -> Result<bool>
where
    M: SignedMessage + ?Sized,
    P: FederationParticipant + ?Sized,
{
    validate_pkix_with_options(message, idp_metadata, anchors, &PkixOptions::default())
}

/// Trust in a signed response via key name plus trust anchor.
///
/// The embedded certificate's subject must match a key name in the IdP metadata.
/// Only then are the anchors consulted, for one whose subject is the certificate's issuer.
pub fn validate_pkix_with_options<M, P>(
    message: &M,
    idp_metadata: &P,
    anchors: &TrustAnchorSet,
    options: &PkixOptions,
) -> Result<bool>
where
    M: SignedMessage + ?Sized,
    P: FederationParticipant + ?Sized,
{
    let Some(cert) = embedded_certificate(message)? else {
        return Ok(false);
    };

    if !match_cert_to_key_name(&cert, idp_metadata) {
        tracing::debug!(subject = cert.subject_name(), "no key name matches embedded certificate");
        return Ok(false);
    }

    let trusted = validate_cert_path_with_options(&cert, anchors, options);
    tracing::debug!(
        subject = cert.subject_name(),
        issuer = cert.issuer_name(),
        trusted,
        "embedded certificate checked against trust anchors"
    );
    Ok(trusted)
}

/// Whether an anchor's subject is the certificate's issuer.
pub fn validate_cert_path(certificate: &CertificateRecord, anchors: &TrustAnchorSet) -> bool {
    validate_cert_path_with_options(certificate, anchors, &PkixOptions::default())
}

pub fn validate_cert_path_with_options(
    certificate: &CertificateRecord,
    anchors: &TrustAnchorSet,
    options: &PkixOptions,
) -> bool {
    anchors
        .iter()
        .filter(|anchor| anchor.subject_name() == certificate.issuer_name())
        .any(|anchor| match options.anchor_match {
            AnchorMatch::IssuerName => true,
            AnchorMatch::IssuerNameAndSignature => match verify_issued_by(certificate, anchor) {
                Ok(verified) => verified,
                Err(e) => {
                    tracing::debug!(anchor = anchor.subject_name(), "anchor cannot check certificate signature: {e}");
                    false
                }
            },
        })
}
