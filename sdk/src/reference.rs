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

//! References to the objects a time-stamp can cover.

use std::collections::HashSet;

use ades_crypto::{hash::DigestAlgorithm, Identifier};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Kind of object a [`TimestampedReference`] points to.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum TimestampedObjectType {
    /// The signature value.
    Signature,

    /// The signed content (for JAdES, the JWS signing input).
    SignedData,

    /// A certificate, by full value or by reference.
    Certificate,

    /// A CRL or OCSP response, by full value or by reference.
    Revocation,

    /// Another time-stamp token.
    Timestamp,
}

/// Pointer to one object covered by a time-stamp.
///
/// Identity is the `(object_id, object_type)` pair.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct TimestampedReference {
    object_id: Identifier,
    object_type: TimestampedObjectType,
}

impl TimestampedReference {
    pub fn new(object_id: Identifier, object_type: TimestampedObjectType) -> Self {
        Self {
            object_id,
            object_type,
        }
    }

    pub fn object_id(&self) -> &Identifier {
        &self.object_id
    }

    pub fn object_type(&self) -> TimestampedObjectType {
        self.object_type
    }
}

/// An insertion-ordered set of [`TimestampedReference`]s.
///
/// Inserting a reference that is already present is a no-op, so the set
/// never holds duplicate pairs and never shrinks.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReferenceSet {
    items: Vec<TimestampedReference>,
    #[serde(skip)]
    seen: HashSet<TimestampedReference>,
}

impl ReferenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `reference`. Returns `false` if it was already present.
    pub fn insert(&mut self, reference: TimestampedReference) -> bool {
        if self.seen.insert(reference.clone()) {
            self.items.push(reference);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, reference: &TimestampedReference) -> bool {
        self.seen.contains(reference)
    }

    /// Returns `true` if any reference of any type points to `id`.
    pub fn contains_id(&self, id: &Identifier) -> bool {
        self.items.iter().any(|r| r.object_id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimestampedReference> {
        self.items.iter()
    }

    /// Iterates over the references of one object type.
    pub fn of_type(
        &self,
        object_type: TimestampedObjectType,
    ) -> impl Iterator<Item = &TimestampedReference> {
        self.items
            .iter()
            .filter(move |r| r.object_type() == object_type)
    }

    pub fn as_slice(&self) -> &[TimestampedReference] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Extend<TimestampedReference> for ReferenceSet {
    fn extend<I: IntoIterator<Item = TimestampedReference>>(&mut self, iter: I) {
        for reference in iter {
            self.insert(reference);
        }
    }
}

impl<'a> Extend<&'a TimestampedReference> for ReferenceSet {
    fn extend<I: IntoIterator<Item = &'a TimestampedReference>>(&mut self, iter: I) {
        for reference in iter {
            self.insert(reference.clone());
        }
    }
}

impl FromIterator<TimestampedReference> for ReferenceSet {
    fn from_iter<I: IntoIterator<Item = TimestampedReference>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ReferenceSet {
    type Item = TimestampedReference;
    type IntoIter = std::vec::IntoIter<TimestampedReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ReferenceSet {
    type Item = &'a TimestampedReference;
    type IntoIter = std::slice::Iter<'a, TimestampedReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A digest algorithm together with a digest value.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Digest {
    pub algorithm: DigestAlgorithm,
    pub value: Vec<u8>,
}

impl Digest {
    pub fn new(algorithm: DigestAlgorithm, value: Vec<u8>) -> Self {
        Self { algorithm, value }
    }

    /// Returns `true` if `data` hashes to this digest.
    pub fn matches(&self, data: &[u8]) -> bool {
        self.algorithm.digest(data) == self.value
    }

    /// Identifier for an object known only by this digest.
    ///
    /// For SHA-256 this is exactly the identifier the full object would get,
    /// so a value that shows up later deduplicates against the reference.
    pub(crate) fn orphan_identifier(&self, prefix: char) -> Identifier {
        match self.algorithm {
            DigestAlgorithm::Sha256 => Identifier::from_sha256(prefix, &self.value),
            alg => {
                let mut tagged = alg.uri().as_bytes().to_vec();
                tagged.extend_from_slice(&self.value);
                Identifier::from_bytes(prefix, &tagged)
            }
        }
    }
}

/// Pointer-only record of a certificate: a digest of its DER encoding and,
/// optionally, the DER-encoded `IssuerSerial`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CertificateRef {
    pub digest: Digest,
    pub issuer_serial: Option<Vec<u8>>,
}

/// Pointer-only record of a CRL.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CrlRef {
    pub digest: Digest,
}

/// Pointer-only record of an OCSP response.
///
/// JAdES allows the digest to be omitted, in which case the response is
/// identified by its `producedAt` time.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OcspRef {
    pub digest: Option<Digest>,
    pub produced_at: Option<DateTime<Utc>>,
    pub responder_id: Option<String>,
}

/// Pointer-only record of revocation data.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RevocationRef {
    Crl(CrlRef),
    Ocsp(OcspRef),
}
