// Copyright 2022 Adobe. All rights reserved.
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

use std::borrow::Cow;

use ades_status_tracker::{validation_codes, ValidationError};
use thiserror::Error;

/// `Error` enumerates errors returned by time-stamp resolution.
///
/// Only conditions that make the result of a resolution pass meaningless
/// are reported here. Malformed evidence is reported as an
/// [`ExtractionError`] through the caller's status tracker instead and only
/// surfaces as [`Error::Extraction`] in strict mode.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A counter signature (transitively) counter-signs one of its own
    /// ancestors.
    #[error("counter signature cycle detected at signature {signature_id}")]
    CounterSignatureCycle { signature_id: String },

    /// Counter signatures are nested deeper than allowed by the settings.
    #[error("counter signatures nested deeper than {max_depth} levels")]
    CounterSignatureDepthExceeded { max_depth: usize },

    /// A single time-stamp token was requested but the attribute holds
    /// several.
    #[error("attribute {attribute} holds {count} time-stamp tokens, expected one")]
    MultipleTimeStampTokens { attribute: String, count: usize },

    /// A single time-stamp token was requested but the attribute holds none.
    #[error("attribute {attribute} holds no time-stamp token")]
    NoTimeStampToken { attribute: String },

    /// A recoverable extraction issue, escalated because the status tracker
    /// is configured to stop on the first error.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// The signature itself could not be read.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("bad parameter: {0}")]
    BadParam(String),

    #[error("type is unsupported")]
    UnsupportedType,

    #[error("could not find the requested value")]
    NotFound,

    #[error("incompatible settings version: {0}")]
    VersionCompatibility(String),

    // --- third-party errors ---
    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    OtherError(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// A specialized `Result` type for time-stamp resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// A recoverable problem with one item of a signature property.
///
/// The offending item is skipped (or, for an unrecognized archive coverage
/// indicator, resolved to the default) and extraction continues with its
/// siblings.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("{attribute}: {reason}")]
pub struct ExtractionError {
    /// Header name of the property the item belongs to.
    pub attribute: String,

    /// Classification of the problem.
    pub kind: ExtractionErrorKind,

    /// Human-readable detail.
    pub reason: String,
}

impl ExtractionError {
    /// Creates a new `ExtractionError`.
    pub fn new<A: Into<String>, R: Into<String>>(
        attribute: A,
        kind: ExtractionErrorKind,
        reason: R,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            kind,
            reason: reason.into(),
        }
    }
}

impl ValidationError for ExtractionError {
    fn validation_code(&self) -> &'static str {
        self.kind.validation_code()
    }

    fn property_name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Owned(self.attribute.clone()))
    }
}

/// What went wrong while extracting one item.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ExtractionErrorKind {
    /// An unsigned property is not a single named header.
    PropertyMalformed,

    /// A time-stamp attribute does not hold a recognizable token container.
    TimeStampContainerMalformed,

    /// A time-stamp token could not be decoded.
    TimeStampTokenMalformed,

    /// A time-stamp token declares an encoding other than DER.
    UnsupportedTokenEncoding,

    /// An archive time-stamp declares an unknown coverage indicator.
    ArchiveCoverageUnrecognized,

    /// An embedded certificate could not be decoded.
    CertificateMalformed,

    /// An embedded CRL could not be decoded.
    CrlMalformed,

    /// An embedded OCSP response could not be decoded.
    OcspMalformed,

    /// A certificate or revocation reference could not be read.
    ReferenceMalformed,

    /// A refs or values container does not have the expected shape.
    EvidenceContainerMalformed,

    /// A counter signature could not be read.
    CounterSignatureMalformed,
}

impl ExtractionErrorKind {
    /// Returns the validation status code for this kind of problem.
    pub fn validation_code(&self) -> &'static str {
        match self {
            Self::PropertyMalformed => validation_codes::PROPERTY_MALFORMED,
            Self::TimeStampContainerMalformed => validation_codes::TIMESTAMP_CONTAINER_MALFORMED,
            Self::TimeStampTokenMalformed => validation_codes::TIMESTAMP_TOKEN_MALFORMED,
            Self::UnsupportedTokenEncoding => {
                validation_codes::TIMESTAMP_TOKEN_UNSUPPORTED_ENCODING
            }
            Self::ArchiveCoverageUnrecognized => {
                validation_codes::TIMESTAMP_ARCHIVE_COVERAGE_UNRECOGNIZED
            }
            Self::CertificateMalformed => validation_codes::EVIDENCE_CERTIFICATE_MALFORMED,
            Self::CrlMalformed => validation_codes::EVIDENCE_CRL_MALFORMED,
            Self::OcspMalformed => validation_codes::EVIDENCE_OCSP_MALFORMED,
            Self::ReferenceMalformed => validation_codes::EVIDENCE_REFERENCE_MALFORMED,
            Self::EvidenceContainerMalformed => validation_codes::EVIDENCE_CONTAINER_MALFORMED,
            Self::CounterSignatureMalformed => validation_codes::COUNTER_SIGNATURE_MALFORMED,
        }
    }
}
