// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Signed protocol message model.
//!
//! A message carries at most one XML-DSig `Signature`. The trust core reads the
//! embedded certificates from its `KeyInfo`; a signature engine additionally needs
//! the canonical `SignedInfo` bytes, the algorithm identifier, and the signature value.

use crate::metadata::KeyInfo;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureBlock {
    /// Signature algorithm identifier, e.g. `http://www.w3.org/2001/04/xmldsig-more#rsa-sha256`.
    pub signature_method: String,
    /// Canonicalized `SignedInfo` bytes. These are the bytes the signature covers.
    pub signed_info: Vec<u8>,
    /// Decoded `SignatureValue`.
    pub signature_value: Vec<u8>,
    pub key_info: Option<KeyInfo>,
}

impl SignatureBlock {
    /// The first embedded certificate, if any. Later certificates are not consulted.
    pub fn first_certificate(&self) -> Option<&[u8]> {
        self.key_info.as_ref()?.certificates().next()
    }
}

/// Read-only view of a signed message.
pub trait SignedMessage {
    fn signature(&self) -> Option<&SignatureBlock>;
}

/// A SAML response (or any other signed document) reduced to its signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignedResponse {
    pub signature: Option<SignatureBlock>,
}

impl SignedResponse {
    pub fn unsigned() -> Self {
        Self { signature: None }
    }

    pub fn signed(signature: SignatureBlock) -> Self {
        Self {
            signature: Some(signature),
        }
    }
}

impl SignedMessage for SignedResponse {
    fn signature(&self) -> Option<&SignatureBlock> {
        self.signature.as_ref()
    }
}
