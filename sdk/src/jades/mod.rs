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

//! JAdES (ETSI TS 119 182-1) signatures.
//!
//! [`Jades`] reads JWS serializations into [`Signature`]s and implements
//! [`TimestampAttributeFormat`] for their header parameters.
//!
//! Signed properties are the members of the protected header. Unsigned
//! properties are the entries of the `etsiU` array in the unprotected
//! header, each either a single-member JSON object or the base64url
//! encoding of one.

use ades_crypto::certificate::CertificateToken;
use log::debug;

use crate::{
    error::{Error, ExtractionError, ExtractionErrorKind, Result},
    format::{
        AttributeKind, EncodedTimestamp, Extracted, TimestampAttributeFormat, ValidationValues,
    },
    pool::RevocationValue,
    reference::{CertificateRef, RevocationRef},
    settings::TimestampSettings,
    time_stamp::ArchiveTimestampType,
    Signature, SignatureProperty,
};

mod evidence;
pub mod header_names;
mod jws;
mod payload;
mod tokens;

use header_names::*;

/// The JAdES signature format.
#[derive(Clone, Debug)]
pub struct Jades {
    accepted_token_encodings: Vec<String>,
    decode_base64url_components: bool,
}

impl Jades {
    /// Creates a format reader configured by `settings`.
    pub fn new(settings: &TimestampSettings) -> Self {
        Self {
            accepted_token_encodings: settings.accepted_token_encodings.clone(),
            decode_base64url_components: settings.decode_base64url_components,
        }
    }

    /// Reads a single signature from a compact or flattened JSON JWS.
    pub fn parse_signature(&self, jws: &str) -> Result<Signature> {
        jws::parse_signature(jws, self.decode_base64url_components).map_err(Error::InvalidSignature)
    }

    /// Reads every signature of a JWS. The general JSON serialization may
    /// hold several; the other serializations hold exactly one.
    pub fn parse_document(&self, jws: &str) -> Result<Vec<Signature>> {
        jws::parse_document(jws, self.decode_base64url_components).map_err(Error::InvalidSignature)
    }

    /// Reads a single signature from an already parsed JSON value.
    pub fn signature_from_json(&self, value: &serde_json::Value) -> Result<Signature> {
        jws::from_json(value, self.decode_base64url_components).map_err(Error::InvalidSignature)
    }
}

impl Default for Jades {
    fn default() -> Self {
        Self::new(&TimestampSettings::default())
    }
}

impl TimestampAttributeFormat for Jades {
    fn classify(&self, property: &SignatureProperty) -> AttributeKind {
        match property.name() {
            CONTENT_TIMESTAMP => AttributeKind::ContentTimestamp,
            SIGNATURE_TIMESTAMP => AttributeKind::SignatureTimestamp,
            COMPLETE_CERTIFICATE_REFS => AttributeKind::CompleteCertificateRefs,
            ATTRIBUTE_CERTIFICATE_REFS => AttributeKind::AttributeCertificateRefs,
            COMPLETE_REVOCATION_REFS => AttributeKind::CompleteRevocationRefs,
            ATTRIBUTE_REVOCATION_REFS => AttributeKind::AttributeRevocationRefs,
            REFS_ONLY_TIMESTAMP => AttributeKind::RefsOnlyTimestamp,
            SIG_AND_REFS_TIMESTAMP => AttributeKind::SigAndRefsTimestamp,
            CERTIFICATE_VALUES => AttributeKind::CertificateValues,
            ATTR_AUTHORITIES_CERT_VALUES => AttributeKind::AttrAuthoritiesCertValues,
            REVOCATION_VALUES => AttributeKind::RevocationValues,
            ATTRIBUTE_REVOCATION_VALUES => AttributeKind::AttributeRevocationValues,
            TIMESTAMP_VALIDATION_DATA => AttributeKind::TimestampValidationData,
            ARCHIVE_TIMESTAMP => AttributeKind::ArchiveTimestamp,
            COUNTER_SIGNATURE => AttributeKind::CounterSignature,
            _ => AttributeKind::Unknown,
        }
    }

    fn certificate_refs(&self, property: &SignatureProperty) -> Extracted<CertificateRef> {
        evidence::certificate_refs(property.name(), property.value())
    }

    fn revocation_refs(&self, property: &SignatureProperty) -> Extracted<RevocationRef> {
        evidence::revocation_refs(property.name(), property.value())
    }

    fn certificate_values(&self, property: &SignatureProperty) -> Extracted<CertificateToken> {
        evidence::certificate_values(property.name(), property.value())
    }

    fn revocation_values(&self, property: &SignatureProperty) -> Extracted<RevocationValue> {
        evidence::revocation_values(property.name(), property.value())
    }

    fn timestamp_validation_data(
        &self,
        property: &SignatureProperty,
    ) -> (ValidationValues, Vec<ExtractionError>) {
        evidence::timestamp_validation_data(property.name(), property.value())
    }

    fn timestamp_tokens(
        &self,
        property: &SignatureProperty,
        kind: AttributeKind,
    ) -> Extracted<EncodedTimestamp> {
        let tokens = match kind {
            AttributeKind::ArchiveTimestamp => tokens::archive_tokens(
                property.name(),
                property.value(),
                &self.accepted_token_encodings,
            ),
            _ => tokens::container_tokens(
                property.name(),
                property.value(),
                &self.accepted_token_encodings,
            ),
        };

        debug!(
            "{}: {} token(s), {} skipped",
            property.name(),
            tokens.items.len(),
            tokens.issues.len()
        );

        tokens
    }

    fn archive_timestamp_type(
        &self,
        property: &SignatureProperty,
    ) -> (ArchiveTimestampType, Option<ExtractionError>) {
        tokens::archive_timestamp_type(property.name(), property.value())
    }

    fn counter_signature(
        &self,
        property: &SignatureProperty,
    ) -> std::result::Result<Signature, ExtractionError> {
        jws::from_json(property.value(), self.decode_base64url_components).map_err(|reason| {
            ExtractionError::new(
                property.name(),
                ExtractionErrorKind::CounterSignatureMalformed,
                reason,
            )
        })
    }
}
