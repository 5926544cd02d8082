// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Certificate decoding and trust-anchor sets.
//!
//! Decoding is purely structural: no signature, validity-period or trust
//! evaluation happens here. Two records are equal exactly when their DER
//! encodings are byte-identical.

use sha1::{Digest as _, Sha1};
use x509_parser::objects::{oid2abbrev, oid_registry};
use x509_parser::prelude::*;

use crate::{Result, TrustError};

#[derive(Debug, Clone)]
pub struct CertificateRecord {
    der: Vec<u8>,
    subject_name: String,
    issuer_name: String,
    spki_der: Vec<u8>,
    tbs_der: Vec<u8>,
    signature_oid: String,
    signature: Vec<u8>,
}

impl CertificateRecord {
    /// Decode a single DER-encoded X.509 certificate.
    pub fn from_der(der: &[u8]) -> Result<Self> {
        let (rem, cert) = X509Certificate::from_der(der).map_err(|e| {
            tracing::warn!(len = der.len(), "failed to decode certificate: {e}");
            TrustError::MalformedCertificate(e.to_string())
        })?;

        if !rem.is_empty() {
            tracing::warn!(trailing = rem.len(), "certificate encoding has trailing bytes");
            return Err(TrustError::MalformedCertificate(format!(
                "{} trailing bytes after certificate",
                rem.len()
            )));
        }

        Ok(Self {
            der: der.to_vec(),
            subject_name: render_name(cert.subject()),
            issuer_name: render_name(cert.issuer()),
            spki_der: cert.tbs_certificate.subject_pki.raw.to_vec(),
            tbs_der: cert.tbs_certificate.as_ref().to_vec(),
            signature_oid: cert.signature_algorithm.algorithm.to_id_string(),
            signature: cert.signature_value.data.to_vec(),
        })
    }

    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Subject distinguished name, rendered most-specific RDN first (RFC 4514 order).
    pub fn subject_name(&self) -> &str {
        &self.subject_name
    }

    /// Issuer distinguished name, rendered like [`Self::subject_name`].
    pub fn issuer_name(&self) -> &str {
        &self.issuer_name
    }

    /// DER-encoded SubjectPublicKeyInfo.
    pub fn spki_der(&self) -> &[u8] {
        &self.spki_der
    }

    /// Upper-case hex SHA-1 over the DER encoding. Diagnostic only.
    pub fn thumbprint_sha1_hex(&self) -> String {
        let mut sha1 = Sha1::new();
        sha1.update(&self.der);
        hex::encode_upper(sha1.finalize())
    }

    pub(crate) fn tbs_der(&self) -> &[u8] {
        &self.tbs_der
    }

    pub(crate) fn signature_oid(&self) -> &str {
        &self.signature_oid
    }

    pub(crate) fn signature(&self) -> &[u8] {
        &self.signature
    }
}

impl PartialEq for CertificateRecord {
    fn eq(&self, other: &Self) -> bool {
        self.der == other.der
    }
}

impl Eq for CertificateRecord {}

/// An ordered set of trusted CA certificates, supplied by the caller.
///
/// Kept as a distinct type so certificates taken from metadata cannot stand in
/// for trust anchors by accident.
#[derive(Debug, Clone, Default)]
pub struct TrustAnchorSet {
    anchors: Vec<CertificateRecord>,
}

impl TrustAnchorSet {
    pub fn new(anchors: Vec<CertificateRecord>) -> Self {
        Self { anchors }
    }

    /// Decode every anchor. The first undecodable blob fails the whole set.
    pub fn from_der<I, B>(ders: I) -> Result<Self>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let anchors = ders
            .into_iter()
            .map(|d| CertificateRecord::from_der(d.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { anchors })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CertificateRecord> {
        self.anchors.iter()
    }

    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    pub fn contains(&self, certificate: &CertificateRecord) -> bool {
        self.anchors.iter().any(|a| a == certificate)
    }
}

impl FromIterator<CertificateRecord> for TrustAnchorSet {
    fn from_iter<T: IntoIterator<Item = CertificateRecord>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// RDNs are emitted last-encoded first, so the usual C..CN encoding renders as "CN=..., ..., C=...".
fn render_name(name: &X509Name<'_>) -> String {
    let rdns: Vec<String> = name
        .iter_rdn()
        .map(|rdn| {
            rdn.iter()
                .map(render_attribute)
                .collect::<Vec<_>>()
                .join("+")
        })
        .collect();

    rdns.into_iter().rev().collect::<Vec<_>>().join(", ")
}

fn render_attribute(atv: &AttributeTypeAndValue<'_>) -> String {
    let attr_type = match oid2abbrev(atv.attr_type(), oid_registry()) {
        Ok(abbrev) => abbrev.to_string(),
        Err(_) => atv.attr_type().to_id_string(),
    };

    let value = match atv.as_str() {
        Ok(s) => escape_value(s),
        Err(_) => format!("#{}", hex::encode(atv.attr_value().data)),
    };

    format!("{attr_type}={value}")
}

fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
