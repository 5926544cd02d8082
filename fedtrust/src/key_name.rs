// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Matching a certificate subject against a declared `KeyName`.
//!
//! Participants register either the full subject DN or a bare identifier
//! (e.g. `urn:uni:ac:uk:idp` for a certificate with subject
//! `CN=urn:uni:ac:uk:idp, OU=Unknown, O=Unknown`). Both strings are compared
//! exactly, without canonicalization.

use fedtrust_abstractions::FederationParticipant;

use crate::certificate::CertificateRecord;
use crate::metadata_keys::key_names_from_idp_metadata;

/// Whether `key_name` names the certificate's subject.
///
/// Tries the full subject DN first, then the value of the leading RDN.
/// A subject without a `=` in its leading component never matches on the second step.
pub fn matches_key_name(certificate: &CertificateRecord, key_name: &str) -> bool {
    let subject = certificate.subject_name();

    tracing::debug!(subject, key_name, "trying subject DN");
    if subject == key_name {
        tracing::debug!("matched DN");
        return true;
    }

    let Some(cn) = leading_common_name(subject) else {
        return false;
    };

    tracing::debug!(cn, key_name, "trying CN");
    if cn == key_name {
        tracing::debug!("matched CN");
        return true;
    }

    false
}

/// Whether any `KeyName` in the participant's identity-provider roles matches the certificate.
pub fn match_cert_to_key_name<P>(certificate: &CertificateRecord, metadata: &P) -> bool
where
    P: FederationParticipant + ?Sized,
{
    key_names_from_idp_metadata(metadata)
        .iter()
        .any(|key_name| matches_key_name(certificate, key_name))
}

/// Value of the leading RDN: text before the first `,`, after its first `=`.
///
/// An empty value is treated as absent. The split ignores `\,` escapes, so a
/// leading value containing a comma (`CN=Example\, Inc., O=x`) is cut short at it.
pub(crate) fn leading_common_name(subject: &str) -> Option<&str> {
    let leading = subject.split(',').next()?;
    leading
        .split_once('=')
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}
