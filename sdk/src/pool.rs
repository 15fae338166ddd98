// Copyright 2024 Adobe. All rights reserved.
// This file is licensed to you under the Apache License,
// Version 2.0 (http://www.apache.org/licenses/LICENSE-2.0)
// or the MIT license (http://opensource.org/licenses/MIT),
// at your option.

// Unless required by applicable law or agreed to in writing,
// this software is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR REPRESENTATIONS OF ANY KIND, either express or
// implied. See the LICENSE-MIT and LICENSE-APACHE files for the
// specific language governing permissions and limitations under
// each license.

//! Certificate and revocation evidence accumulated during one resolution
//! pass.
//!
//! Both pools are strictly additive: entries are deduplicated on insertion
//! and never removed. Pointer-only refs are resolved against the full values
//! present at the time the pool is asked for its references.

use std::collections::HashSet;

use ades_crypto::{
    certificate::CertificateToken, crl::CrlBinary, ocsp::OcspResponseBinary, Identifier,
};

use crate::reference::{
    CertificateRef, OcspRef, ReferenceSet, RevocationRef, TimestampedObjectType,
    TimestampedReference,
};

/// Certificates and certificate refs.
#[derive(Clone, Debug, Default)]
pub struct CertificatePool {
    certificates: Vec<CertificateToken>,
    certificate_ids: HashSet<Identifier>,
    refs: Vec<CertificateRef>,
}

impl CertificatePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a decoded certificate. Returns `false` if an identical
    /// certificate is already present.
    pub fn add_certificate(&mut self, certificate: CertificateToken) -> bool {
        if !self.certificate_ids.insert(certificate.id().clone()) {
            return false;
        }
        self.certificates.push(certificate);
        true
    }

    /// Adds a certificate ref. Returns `false` if an identical ref is
    /// already present.
    pub fn add_ref(&mut self, certificate_ref: CertificateRef) -> bool {
        if self.refs.contains(&certificate_ref) {
            return false;
        }
        self.refs.push(certificate_ref);
        true
    }

    pub fn certificates(&self) -> &[CertificateToken] {
        &self.certificates
    }

    pub fn refs(&self) -> &[CertificateRef] {
        &self.refs
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.certificate_ids.contains(id)
    }

    /// Finds the certificate a ref points to, if its value is in the pool.
    pub fn find(&self, certificate_ref: &CertificateRef) -> Option<&CertificateToken> {
        self.certificates
            .iter()
            .find(|c| certificate_ref.digest.matches(c.der()))
    }

    /// Returns the identifier a ref resolves to.
    pub fn ref_identifier(&self, certificate_ref: &CertificateRef) -> Identifier {
        match self.find(certificate_ref) {
            Some(certificate) => certificate.id().clone(),
            None => certificate_ref
                .digest
                .orphan_identifier(Identifier::CERTIFICATE),
        }
    }

    /// References contributed by the full certificate values.
    pub fn value_references(&self) -> ReferenceSet {
        self.certificates
            .iter()
            .map(|c| TimestampedReference::new(c.id().clone(), TimestampedObjectType::Certificate))
            .collect()
    }

    /// References contributed by the certificate refs.
    pub fn ref_references(&self) -> ReferenceSet {
        self.refs
            .iter()
            .map(|r| {
                let id = self.ref_identifier(r);
                TimestampedReference::new(id, TimestampedObjectType::Certificate)
            })
            .collect()
    }

    /// All references contributed by this pool: values first, then refs.
    pub fn references(&self) -> ReferenceSet {
        let mut references = self.value_references();
        references.extend(self.ref_references());
        references
    }

    pub fn is_empty(&self) -> bool {
        self.certificates.is_empty() && self.refs.is_empty()
    }
}

/// A decoded revocation value.
#[derive(Clone, Debug, PartialEq)]
pub enum RevocationValue {
    Crl(CrlBinary),
    Ocsp(OcspResponseBinary),
}

impl RevocationValue {
    pub fn id(&self) -> &Identifier {
        match self {
            Self::Crl(crl) => crl.id(),
            Self::Ocsp(ocsp) => ocsp.id(),
        }
    }

    /// Bytes a revocation ref digest is computed over.
    fn digest_input(&self) -> &[u8] {
        match self {
            Self::Crl(crl) => crl.der(),
            Self::Ocsp(ocsp) => ocsp.basic_der(),
        }
    }
}

/// CRLs, OCSP responses and refs to them.
#[derive(Clone, Debug, Default)]
pub struct RevocationPool {
    values: Vec<RevocationValue>,
    value_ids: HashSet<Identifier>,
    refs: Vec<RevocationRef>,
}

impl RevocationPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a decoded CRL or OCSP response. Returns `false` if an identical
    /// value is already present.
    pub fn add_value(&mut self, value: RevocationValue) -> bool {
        if !self.value_ids.insert(value.id().clone()) {
            return false;
        }
        self.values.push(value);
        true
    }

    /// Adds a revocation ref. Returns `false` if an identical ref is already
    /// present.
    pub fn add_ref(&mut self, revocation_ref: RevocationRef) -> bool {
        if self.refs.contains(&revocation_ref) {
            return false;
        }
        self.refs.push(revocation_ref);
        true
    }

    pub fn values(&self) -> &[RevocationValue] {
        &self.values
    }

    pub fn crls(&self) -> impl Iterator<Item = &CrlBinary> {
        self.values.iter().filter_map(|v| match v {
            RevocationValue::Crl(crl) => Some(crl),
            RevocationValue::Ocsp(_) => None,
        })
    }

    pub fn ocsp_responses(&self) -> impl Iterator<Item = &OcspResponseBinary> {
        self.values.iter().filter_map(|v| match v {
            RevocationValue::Ocsp(ocsp) => Some(ocsp),
            RevocationValue::Crl(_) => None,
        })
    }

    pub fn refs(&self) -> &[RevocationRef] {
        &self.refs
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.value_ids.contains(id)
    }

    /// Finds the value a ref points to, if it is in the pool.
    pub fn find(&self, revocation_ref: &RevocationRef) -> Option<&RevocationValue> {
        match revocation_ref {
            RevocationRef::Crl(crl_ref) => self.values.iter().find(|v| {
                matches!(v, RevocationValue::Crl(_)) && crl_ref.digest.matches(v.digest_input())
            }),
            RevocationRef::Ocsp(ocsp_ref) => self.values.iter().find(|v| match v {
                RevocationValue::Ocsp(ocsp) => ocsp_ref_matches(ocsp_ref, ocsp),
                RevocationValue::Crl(_) => false,
            }),
        }
    }

    /// Returns the identifier a ref resolves to.
    pub fn ref_identifier(&self, revocation_ref: &RevocationRef) -> Identifier {
        if let Some(value) = self.find(revocation_ref) {
            return value.id().clone();
        }

        match revocation_ref {
            RevocationRef::Crl(crl_ref) => {
                crl_ref.digest.orphan_identifier(Identifier::REVOCATION)
            }
            RevocationRef::Ocsp(OcspRef {
                digest: Some(digest),
                ..
            }) => digest.orphan_identifier(Identifier::REVOCATION),
            RevocationRef::Ocsp(ocsp_ref) => {
                let key = format!(
                    "ocsp:{}:{}",
                    ocsp_ref.responder_id.as_deref().unwrap_or_default(),
                    ocsp_ref
                        .produced_at
                        .map(|t| t.timestamp().to_string())
                        .unwrap_or_default()
                );
                Identifier::from_bytes(Identifier::REVOCATION, key.as_bytes())
            }
        }
    }

    /// References contributed by the full revocation values.
    pub fn value_references(&self) -> ReferenceSet {
        self.values
            .iter()
            .map(|v| TimestampedReference::new(v.id().clone(), TimestampedObjectType::Revocation))
            .collect()
    }

    /// References contributed by the revocation refs.
    pub fn ref_references(&self) -> ReferenceSet {
        self.refs
            .iter()
            .map(|r| {
                let id = self.ref_identifier(r);
                TimestampedReference::new(id, TimestampedObjectType::Revocation)
            })
            .collect()
    }

    /// All references contributed by this pool: values first, then refs.
    pub fn references(&self) -> ReferenceSet {
        let mut references = self.value_references();
        references.extend(self.ref_references());
        references
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.refs.is_empty()
    }
}

fn ocsp_ref_matches(ocsp_ref: &OcspRef, ocsp: &OcspResponseBinary) -> bool {
    match (&ocsp_ref.digest, ocsp_ref.produced_at) {
        (Some(digest), _) => digest.matches(ocsp.basic_der()),
        (None, Some(produced_at)) => produced_at == ocsp.produced_at(),
        (None, None) => false,
    }
}
