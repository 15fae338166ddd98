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

use std::fmt;

use ades_crypto::{
    hash::{sha256, DigestAlgorithm},
    time_stamp::TimeStampProof,
    Identifier,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::{ReferenceSet, TimestampedObjectType, TimestampedReference};

/// Coverage of an archive time-stamp.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ArchiveTimestampType {
    /// Covers the signature and all evidence accumulated before it.
    #[default]
    All,

    /// Covers only the time-stamps that precede it.
    PreviousOnly,
}

impl fmt::Display for ArchiveTimestampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::PreviousOnly => f.write_str("previousArcTst"),
        }
    }
}

/// Kind of a time-stamp token, derived from the attribute it was found in.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum TimestampType {
    /// Content time-stamp over the signed data.
    Content,

    /// All-data-objects time-stamp.
    AllDataObjects,

    /// Individual-data-objects time-stamp.
    IndividualDataObjects,

    /// Signature time-stamp.
    Signature,

    /// Time-stamp over the certificate and revocation refs only.
    ValidationDataRefsOnly,

    /// Time-stamp over the signature and the certificate and revocation
    /// refs.
    ValidationData,

    /// Archive time-stamp.
    Archive(ArchiveTimestampType),
}

impl TimestampType {
    /// Returns `true` for time-stamps computed at signing time.
    pub fn is_content_timestamp(&self) -> bool {
        matches!(
            self,
            Self::Content | Self::AllDataObjects | Self::IndividualDataObjects
        )
    }

    pub fn is_archive_timestamp(&self) -> bool {
        matches!(self, Self::Archive(_))
    }

    pub fn archive_timestamp_type(&self) -> Option<ArchiveTimestampType> {
        match self {
            Self::Archive(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Where a time-stamp attribute sits in the signature.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Location {
    /// Index in the signed property list.
    Signed(usize),

    /// Index in the unsigned property list.
    Unsigned(usize),
}

/// A time-stamp token and the objects it covers.
///
/// Tokens are created exactly once per encoded proof and never modified
/// afterwards. Validating the token signature is left to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct TimestampToken {
    timestamp_type: TimestampType,
    attribute: String,
    location: Location,
    canonicalization_method: Option<String>,
    proof: TimeStampProof,
    covered_references: ReferenceSet,
    container_hash: Vec<u8>,
}

impl TimestampToken {
    pub(crate) fn new(
        timestamp_type: TimestampType,
        attribute: &str,
        location: Location,
        canonicalization_method: Option<String>,
        proof: TimeStampProof,
        covered_references: ReferenceSet,
        container_bytes: &[u8],
    ) -> Self {
        Self {
            timestamp_type,
            attribute: attribute.to_owned(),
            location,
            canonicalization_method,
            proof,
            covered_references,
            container_hash: sha256(container_bytes),
        }
    }

    /// `T-` identifier of the token.
    pub fn id(&self) -> &Identifier {
        self.proof.id()
    }

    pub fn timestamp_type(&self) -> TimestampType {
        self.timestamp_type
    }

    /// Coverage of an archive time-stamp, `None` for other types.
    pub fn archive_timestamp_type(&self) -> Option<ArchiveTimestampType> {
        self.timestamp_type.archive_timestamp_type()
    }

    /// Header name of the attribute the token was found in.
    pub fn attribute_name(&self) -> &str {
        &self.attribute
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Canonicalization method declared by the token container.
    pub fn canonicalization_method(&self) -> Option<&str> {
        self.canonicalization_method.as_deref()
    }

    /// DER encoding of the RFC 3161 token.
    pub fn encoded_proof(&self) -> &[u8] {
        self.proof.token_der()
    }

    pub fn proof(&self) -> &TimeStampProof {
        &self.proof
    }

    pub fn generation_time(&self) -> DateTime<Utc> {
        self.proof.gen_time()
    }

    pub fn message_imprint(&self) -> &[u8] {
        self.proof.message_imprint()
    }

    pub fn message_imprint_algorithm(&self) -> Option<DigestAlgorithm> {
        self.proof.message_imprint_algorithm()
    }

    /// Objects whose digests are part of the message imprint, in coverage
    /// order.
    pub fn covered_references(&self) -> &ReferenceSet {
        &self.covered_references
    }

    /// SHA-256 of the raw attribute value the token was extracted from.
    pub fn container_hash(&self) -> &[u8] {
        &self.container_hash
    }

    /// Returns `true` if the raw attribute value still hashes to
    /// [`Self::container_hash`].
    pub fn matches_container(&self, container_bytes: &[u8]) -> bool {
        sha256(container_bytes) == self.container_hash
    }

    /// Reference to this token, as covered by later time-stamps.
    pub fn reference(&self) -> TimestampedReference {
        TimestampedReference::new(self.id().clone(), TimestampedObjectType::Timestamp)
    }
}
