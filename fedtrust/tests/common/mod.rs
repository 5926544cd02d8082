// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `fedtrust` integration tests.
//!
//! Certificates are generated with `rcgen`. Subjects are pushed most-general
//! first (e.g. OU before CN), matching how typical tooling encodes them.

#![allow(dead_code)]

use fedtrust_abstractions::{
    EntityDescriptor, KeyDescriptor, KeyInfo, RoleDescriptor, SignatureBlock, SignedResponse,
};
use p256::pkcs8::DecodePrivateKey as _;
use rcgen::{BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, KeyPair};
use rsa::pkcs8::{EncodePrivateKey as _, LineEnding};
use rsa::RsaPrivateKey;

pub(crate) struct TestCa {
    pub(crate) cert: rcgen::Certificate,
    pub(crate) key: KeyPair,
}

impl TestCa {
    pub(crate) fn der(&self) -> Vec<u8> {
        self.cert.der().to_vec()
    }
}

fn params_for(subject: &[(DnType, &str)]) -> CertificateParams {
    let mut params = CertificateParams::new(Vec::<String>::new()).unwrap();
    let mut dn = DistinguishedName::new();
    for (ty, value) in subject {
        dn.push(ty.clone(), *value);
    }
    params.distinguished_name = dn;
    params
}

/// A self-signed P-256 certificate with the given subject, in push order.
pub(crate) fn self_signed(subject: &[(DnType, &str)]) -> Vec<u8> {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256).unwrap();
    params_for(subject).self_signed(&key).unwrap().der().to_vec()
}

/// A self-signed certificate plus its P-256 signing key.
pub(crate) fn self_signed_with_key(subject: &[(DnType, &str)]) -> (Vec<u8>, p256::ecdsa::SigningKey) {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256).unwrap();
    let cert = params_for(subject).self_signed(&key).unwrap();
    let signing_key = p256::ecdsa::SigningKey::from_pkcs8_der(&key.serialize_der()).unwrap();
    (cert.der().to_vec(), signing_key)
}

/// A self-signed certificate plus its P-384 signing key.
pub(crate) fn self_signed_p384_with_key(subject: &[(DnType, &str)]) -> (Vec<u8>, p384::ecdsa::SigningKey) {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P384_SHA384).unwrap();
    let cert = params_for(subject).self_signed(&key).unwrap();
    let signing_key = p384::ecdsa::SigningKey::from_pkcs8_der(&key.serialize_der()).unwrap();
    (cert.der().to_vec(), signing_key)
}

/// A fresh 2048-bit RSA key, both as an `rsa` private key and as an rcgen RSA-SHA256 key pair.
pub(crate) fn rsa_key_pair() -> (RsaPrivateKey, KeyPair) {
    let private_key = RsaPrivateKey::new(&mut rsa::rand_core::OsRng, 2048).unwrap();
    let pem = private_key.to_pkcs8_pem(LineEnding::LF).unwrap();
    let key = KeyPair::from_pem_and_sign_algo(&pem, &rcgen::PKCS_RSA_SHA256).unwrap();
    (private_key, key)
}

/// A self-signed RSA-SHA256 certificate plus its private key.
pub(crate) fn self_signed_rsa_with_key(subject: &[(DnType, &str)]) -> (Vec<u8>, RsaPrivateKey) {
    let (private_key, key) = rsa_key_pair();
    let cert = params_for(subject).self_signed(&key).unwrap();
    (cert.der().to_vec(), private_key)
}

/// A self-signed CA whose subject is a single CN.
pub(crate) fn make_ca(cn: &str) -> TestCa {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256).unwrap();
    let mut params = params_for(&[(DnType::CommonName, cn)]);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let cert = params.self_signed(&key).unwrap();
    TestCa { cert, key }
}

/// Like [`make_ca`], but the CA key is RSA and it signs with RSA-SHA256.
pub(crate) fn make_rsa_ca(cn: &str) -> TestCa {
    let (_, key) = rsa_key_pair();
    let mut params = params_for(&[(DnType::CommonName, cn)]);
    params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
    let cert = params.self_signed(&key).unwrap();
    TestCa { cert, key }
}

/// A leaf certificate issued by `ca`.
pub(crate) fn issued_by(ca: &TestCa, subject: &[(DnType, &str)]) -> Vec<u8> {
    let key = KeyPair::generate_for(&rcgen::PKCS_ECDSA_P256_SHA256).unwrap();
    params_for(subject)
        .signed_by(&key, &ca.cert, &ca.key)
        .unwrap()
        .der()
        .to_vec()
}

/// The usual IdP subject: `CN=idp.example.org, OU=Unknown`.
pub(crate) fn idp_subject() -> Vec<(DnType, &'static str)> {
    vec![
        (DnType::OrganizationalUnitName, "Unknown"),
        (DnType::CommonName, "idp.example.org"),
    ]
}

pub(crate) fn cert_key_info(ders: &[Vec<u8>]) -> KeyInfo {
    ders.iter()
        .cloned()
        .fold(KeyInfo::default(), |ki, der| ki.with_certificate(der))
}

pub(crate) fn name_key_info(names: &[&str]) -> KeyInfo {
    names
        .iter()
        .fold(KeyInfo::default(), |ki, name| ki.with_key_name(*name))
}

pub(crate) fn role(key_infos: Vec<KeyInfo>) -> RoleDescriptor {
    RoleDescriptor::new(key_infos.into_iter().map(KeyDescriptor::signing).collect())
}

pub(crate) fn idp_metadata(key_infos: Vec<KeyInfo>) -> EntityDescriptor {
    EntityDescriptor::new("https://idp.example.org/shibboleth").with_idp_role(role(key_infos))
}

pub(crate) fn sp_metadata(key_infos: Vec<KeyInfo>) -> EntityDescriptor {
    EntityDescriptor::new("https://sp.example.org/shibboleth").with_sp_role(role(key_infos))
}

/// A response whose signature embeds `ders` in one `X509Data` element.
pub(crate) fn signed_response(ders: Vec<Vec<u8>>) -> SignedResponse {
    SignedResponse::signed(SignatureBlock {
        signature_method: fedtrust::signature_engine::ALG_ECDSA_SHA256.to_string(),
        signed_info: b"<ds:SignedInfo/>".to_vec(),
        signature_value: vec![0u8; 64],
        key_info: Some(KeyInfo::default().with_x509_data(fedtrust_abstractions::X509Data::new(ders))),
    })
}
