// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate trust decisions for federated authentication.
//!
//! Given parsed federation metadata (see `fedtrust-abstractions`) and a presented
//! certificate or signed message, this crate decides whether the identity is trusted:
//! - [`validate_client_cert`]: client certificate on a secure connection from an SP
//! - [`validate_with_embedded_cert`]: signed IdP response, exact certificate match
//! - [`validate_pkix`]: signed IdP response, key name match plus trust anchor
//! - [`verify_signature`]: cryptographic check of the message signature
//!
//! The extraction helpers in [`metadata_keys`] are public for callers building
//! their own policies. All functions are stateless; inputs are passed explicitly.

pub mod certificate;
pub mod error;
pub mod key_name;
pub mod metadata_keys;
pub mod signature;
pub mod signature_engine;
pub mod trust;

pub use certificate::{CertificateRecord, TrustAnchorSet};
pub use error::{Result, SignatureEngineError, TrustError};
pub use key_name::{match_cert_to_key_name, matches_key_name};
pub use metadata_keys::{
    certificates_from_idp_metadata, certificates_from_roles, certificates_from_sp_metadata, key_names_from_idp_metadata,
    key_names_from_roles, key_names_from_sp_metadata,
};
pub use signature::{certificate_from_signature, verify_signature};
pub use signature_engine::{SignatureEngine, X509SignatureEngine};
pub use trust::{
    validate_cert_path, validate_cert_path_with_options, validate_client_cert, validate_pkix, validate_pkix_with_options,
    validate_with_embedded_cert, AnchorMatch, PkixOptions,
};
