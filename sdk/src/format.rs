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

//! The capability interface a signature container format implements so the
//! generic [`TimestampSource`](crate::TimestampSource) can resolve it.

use ades_crypto::{certificate::CertificateToken, time_stamp::TimeStampProof};

use crate::{
    error::ExtractionError,
    pool::RevocationValue,
    reference::{CertificateRef, RevocationRef},
    time_stamp::{ArchiveTimestampType, TimestampType},
    Signature, SignatureProperty,
};

/// Canonical kind of a signature property.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum AttributeKind {
    ContentTimestamp,
    AllDataObjectsTimestamp,
    IndividualDataObjectsTimestamp,
    SignatureTimestamp,
    CompleteCertificateRefs,
    AttributeCertificateRefs,
    CompleteRevocationRefs,
    AttributeRevocationRefs,
    RefsOnlyTimestamp,
    SigAndRefsTimestamp,
    CertificateValues,
    AttrAuthoritiesCertValues,
    RevocationValues,
    AttributeRevocationValues,
    TimestampValidationData,
    ArchiveTimestamp,
    CounterSignature,
    Unknown,
}

impl AttributeKind {
    /// Returns the token type for time-stamp bearing kinds, `None` for all
    /// others.
    ///
    /// `archive` is only consulted for [`AttributeKind::ArchiveTimestamp`].
    pub fn timestamp_type(&self, archive: ArchiveTimestampType) -> Option<TimestampType> {
        match self {
            Self::ContentTimestamp => Some(TimestampType::Content),
            Self::AllDataObjectsTimestamp => Some(TimestampType::AllDataObjects),
            Self::IndividualDataObjectsTimestamp => Some(TimestampType::IndividualDataObjects),
            Self::SignatureTimestamp => Some(TimestampType::Signature),
            Self::RefsOnlyTimestamp => Some(TimestampType::ValidationDataRefsOnly),
            Self::SigAndRefsTimestamp => Some(TimestampType::ValidationData),
            Self::ArchiveTimestamp => Some(TimestampType::Archive(archive)),
            _ => None,
        }
    }

    pub fn is_timestamp(&self) -> bool {
        self.timestamp_type(ArchiveTimestampType::All).is_some()
    }
}

/// Result of one extraction step: the items that could be read and one
/// issue per item that was skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct Extracted<T> {
    pub items: Vec<T>,
    pub issues: Vec<ExtractionError>,
}

impl<T> Default for Extracted<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            issues: Vec::new(),
        }
    }
}

impl<T> Extracted<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A result with no items and a single issue.
    pub fn failed(issue: ExtractionError) -> Self {
        Self {
            items: Vec::new(),
            issues: vec![issue],
        }
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    pub fn issue(&mut self, issue: ExtractionError) {
        self.issues.push(issue);
    }
}

/// A decoded time-stamp proof and the container metadata that applies to
/// it.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedTimestamp {
    pub proof: TimeStampProof,
    pub canonicalization_method: Option<String>,
}

/// Certificate and revocation values bundled in one attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationValues {
    pub certificates: Vec<CertificateToken>,
    pub revocations: Vec<RevocationValue>,
}

/// Format-specific half of time-stamp resolution.
///
/// A format knows how its properties are named and shaped; it never decides
/// whether a problem is fatal. Every extraction returns its skipped items as
/// issues and the orchestrator routes them.
pub trait TimestampAttributeFormat: Sync {
    /// Maps a property to its canonical kind by header name alone.
    fn classify(&self, property: &SignatureProperty) -> AttributeKind;

    /// Whether the format has all-data-objects time-stamps.
    fn supports_all_data_objects_timestamps(&self) -> bool {
        false
    }

    /// Whether the format has individual-data-objects time-stamps.
    fn supports_individual_data_objects_timestamps(&self) -> bool {
        false
    }

    /// Certificate refs from a complete or attribute certificate refs
    /// property.
    fn certificate_refs(&self, property: &SignatureProperty) -> Extracted<CertificateRef>;

    /// Revocation refs from a complete or attribute revocation refs
    /// property.
    fn revocation_refs(&self, property: &SignatureProperty) -> Extracted<RevocationRef>;

    /// Certificates from a certificate values property.
    fn certificate_values(&self, property: &SignatureProperty) -> Extracted<CertificateToken>;

    /// CRLs and OCSP responses from a revocation values property.
    fn revocation_values(&self, property: &SignatureProperty) -> Extracted<RevocationValue>;

    /// Certificates and revocation values from a time-stamp validation data
    /// property.
    fn timestamp_validation_data(
        &self,
        property: &SignatureProperty,
    ) -> (ValidationValues, Vec<ExtractionError>);

    /// Decoded proofs from a time-stamp bearing property, in container
    /// order.
    fn timestamp_tokens(
        &self,
        property: &SignatureProperty,
        kind: AttributeKind,
    ) -> Extracted<EncodedTimestamp>;

    /// Coverage of an archive time-stamp property.
    ///
    /// Never fails: an absent or unrecognized indicator resolves to
    /// [`ArchiveTimestampType::All`], the latter with an issue.
    fn archive_timestamp_type(
        &self,
        property: &SignatureProperty,
    ) -> (ArchiveTimestampType, Option<ExtractionError>);

    /// The signature nested in a counter signature property.
    fn counter_signature(
        &self,
        property: &SignatureProperty,
    ) -> Result<Signature, ExtractionError>;
}
