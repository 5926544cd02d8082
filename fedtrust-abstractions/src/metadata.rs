// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Federation metadata records.
//!
//! These mirror the SAML 2.0 metadata shape the trust core walks:
//! `EntityDescriptor / {IDP,SP}SSODescriptor / KeyDescriptor / KeyInfo / {KeyName, X509Data}`.
//! Records own their data and expose it read-only. Any other metadata model can
//! take part by implementing [`FederationParticipant`].

use crate::encoding::{decode_certificate_text, EncodingError};

/// Declared purpose of a key descriptor (`use` attribute).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyUse {
    Signing,
    Encryption,
}

/// One `X509Data` element: zero or more DER-encoded certificates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct X509Data {
    /// Raw certificate bytes, in document order. Not decoded here.
    pub certificates: Vec<Vec<u8>>,
}

impl X509Data {
    pub fn new(certificates: Vec<Vec<u8>>) -> Self {
        Self { certificates }
    }

    /// Build from base64 certificate text as it appears in an XML document.
    pub fn from_base64<I, S>(texts: I) -> Result<Self, EncodingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let certificates = texts
            .into_iter()
            .map(|t| decode_certificate_text(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { certificates })
    }
}

/// A `KeyInfo` block: declared key names and embedded certificates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInfo {
    pub key_names: Vec<String>,
    pub x509_data: Vec<X509Data>,
}

impl KeyInfo {
    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_names.push(key_name.into());
        self
    }

    pub fn with_certificate(mut self, der: Vec<u8>) -> Self {
        self.x509_data.push(X509Data::new(vec![der]));
        self
    }

    pub fn with_x509_data(mut self, data: X509Data) -> Self {
        self.x509_data.push(data);
        self
    }

    /// All embedded certificate blobs, flattened across `X509Data` elements.
    pub fn certificates(&self) -> impl Iterator<Item = &[u8]> {
        self.x509_data
            .iter()
            .flat_map(|d| d.certificates.iter().map(Vec::as_slice))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDescriptor {
    pub key_use: Option<KeyUse>,
    pub key_info: Option<KeyInfo>,
}

impl KeyDescriptor {
    pub fn new(key_info: KeyInfo) -> Self {
        Self {
            key_use: None,
            key_info: Some(key_info),
        }
    }

    pub fn signing(key_info: KeyInfo) -> Self {
        Self {
            key_use: Some(KeyUse::Signing),
            key_info: Some(key_info),
        }
    }
}

/// An SSO role (identity provider or service provider) with its key descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDescriptor {
    pub key_descriptors: Vec<KeyDescriptor>,
}

impl RoleDescriptor {
    pub fn new(key_descriptors: Vec<KeyDescriptor>) -> Self {
        Self { key_descriptors }
    }
}

/// Read-only view of one federation participant's metadata.
pub trait FederationParticipant {
    fn idp_sso_descriptors(&self) -> &[RoleDescriptor];

    fn sp_sso_descriptors(&self) -> &[RoleDescriptor];
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityDescriptor {
    pub entity_id: String,
    pub idp_sso_descriptors: Vec<RoleDescriptor>,
    pub sp_sso_descriptors: Vec<RoleDescriptor>,
}

impl EntityDescriptor {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Self::default()
        }
    }

    pub fn with_idp_role(mut self, role: RoleDescriptor) -> Self {
        self.idp_sso_descriptors.push(role);
        self
    }

    pub fn with_sp_role(mut self, role: RoleDescriptor) -> Self {
        self.sp_sso_descriptors.push(role);
        self
    }
}

impl FederationParticipant for EntityDescriptor {
    fn idp_sso_descriptors(&self) -> &[RoleDescriptor] {
        &self.idp_sso_descriptors
    }

    fn sp_sso_descriptors(&self) -> &[RoleDescriptor] {
        &self.sp_sso_descriptors
    }
}
