// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared datatypes for the federation trust crates.
//!
//! This crate models what the trust core consumes from its collaborators:
//! - parsed federation metadata (entity, role and key descriptors)
//! - signed protocol messages (signature block + embedded key info)
//!
//! Parsing the metadata document itself, and canonicalizing XML before
//! signature checks, happen elsewhere. Everything here is read-only once built.

pub mod encoding;
pub mod metadata;
pub mod signed_message;

pub use encoding::{decode_certificate_text, EncodingError};
pub use metadata::{EntityDescriptor, FederationParticipant, KeyDescriptor, KeyInfo, KeyUse, RoleDescriptor, X509Data};
pub use signed_message::{SignatureBlock, SignedMessage, SignedResponse};
