// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Key material extraction from federation metadata.
//!
//! The same walk applies to identity-provider and service-provider roles:
//! `RoleDescriptor / KeyDescriptor / KeyInfo / {X509Data/X509Certificate, KeyName}`.
//! Results keep document order and are not deduplicated.

use fedtrust_abstractions::{FederationParticipant, RoleDescriptor};

use crate::certificate::CertificateRecord;
use crate::Result;

/// Decode every certificate embedded in the given roles.
///
/// No roles or no key descriptors yields an empty list. A single undecodable
/// certificate fails the whole extraction; nothing is skipped.
pub fn certificates_from_roles(roles: &[RoleDescriptor]) -> Result<Vec<CertificateRecord>> {
    let mut certs = Vec::new();

    for role in roles {
        for key in &role.key_descriptors {
            let Some(key_info) = &key.key_info else {
                continue;
            };

            for der in key_info.certificates() {
                certs.push(CertificateRecord::from_der(der)?);
            }
        }
    }

    Ok(certs)
}

/// Collect every declared `KeyName` in the given roles.
pub fn key_names_from_roles(roles: &[RoleDescriptor]) -> Vec<String> {
    roles
        .iter()
        .flat_map(|role| role.key_descriptors.iter())
        .filter_map(|key| key.key_info.as_ref())
        .flat_map(|key_info| key_info.key_names.iter().cloned())
        .collect()
}

pub fn certificates_from_idp_metadata<P>(metadata: &P) -> Result<Vec<CertificateRecord>>
where
    P: FederationParticipant + ?Sized,
{
    certificates_from_roles(metadata.idp_sso_descriptors())
}

pub fn certificates_from_sp_metadata<P>(metadata: &P) -> Result<Vec<CertificateRecord>>
where
    P: FederationParticipant + ?Sized,
{
    certificates_from_roles(metadata.sp_sso_descriptors())
}

pub fn key_names_from_idp_metadata<P>(metadata: &P) -> Vec<String>
where
    P: FederationParticipant + ?Sized,
{
    key_names_from_roles(metadata.idp_sso_descriptors())
}

pub fn key_names_from_sp_metadata<P>(metadata: &P) -> Vec<String>
where
    P: FederationParticipant + ?Sized,
{
    key_names_from_roles(metadata.sp_sso_descriptors())
}
