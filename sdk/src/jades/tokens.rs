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

//! Time-stamp token containers.

use ades_crypto::{base64, time_stamp::TimeStampProof};
use log::debug;
use serde_json::Value;

use crate::{
    error::{ExtractionError, ExtractionErrorKind},
    format::{EncodedTimestamp, Extracted},
    jades::{
        evidence::deserialize,
        header_names::{ALL, PREVIOUS_ARC_TST, TIMESTAMPED},
        payload,
    },
    time_stamp::ArchiveTimestampType,
};

/// Decodes the tokens of a `tstContainer`, skipping (with an issue) every
/// token that declares an encoding outside `accepted_encodings` or that
/// cannot be decoded.
pub(crate) fn container_tokens(
    attribute: &str,
    container: &Value,
    accepted_encodings: &[String],
) -> Extracted<EncodedTimestamp> {
    if !container.is_object() {
        return Extracted::failed(ExtractionError::new(
            attribute,
            ExtractionErrorKind::TimeStampContainerMalformed,
            "time-stamp container is not a JSON object",
        ));
    }

    let container: payload::TstContainer = match deserialize(container) {
        Ok(container) => container,
        Err(reason) => {
            return Extracted::failed(ExtractionError::new(
                attribute,
                ExtractionErrorKind::TimeStampContainerMalformed,
                reason,
            ))
        }
    };

    let mut result = Extracted::new();
    for (index, entry) in container.tst_tokens.iter().enumerate() {
        match token(entry, accepted_encodings) {
            Ok(proof) => result.push(EncodedTimestamp {
                proof,
                canonicalization_method: container.canon_alg.clone(),
            }),
            Err((kind, reason)) => {
                debug!("skipping token {index} of {attribute}: {reason}");
                result.issue(ExtractionError::new(
                    attribute,
                    kind,
                    format!("token {index}: {reason}"),
                ));
            }
        }
    }
    result
}

fn token(
    entry: &Value,
    accepted_encodings: &[String],
) -> Result<TimeStampProof, (ExtractionErrorKind, String)> {
    let token: payload::TstToken =
        deserialize(entry).map_err(|e| (ExtractionErrorKind::TimeStampTokenMalformed, e))?;

    if let Some(encoding) = token.encoding.as_deref().filter(|e| !e.is_empty()) {
        if !accepted_encodings.iter().any(|accepted| accepted == encoding) {
            return Err((
                ExtractionErrorKind::UnsupportedTokenEncoding,
                format!("encoding {encoding} is not supported"),
            ));
        }
    }

    let der = base64::decode(&token.val).map_err(|e| {
        (
            ExtractionErrorKind::TimeStampTokenMalformed,
            format!("token is not base64: {e}"),
        )
    })?;

    TimeStampProof::from_der(&der)
        .map_err(|e| (ExtractionErrorKind::TimeStampTokenMalformed, e.to_string()))
}

/// Decodes the tokens of an `arcTst` value, whose container sits under
/// `tstContainer`.
pub(crate) fn archive_tokens(
    attribute: &str,
    value: &Value,
    accepted_encodings: &[String],
) -> Extracted<EncodedTimestamp> {
    match deserialize::<payload::ArcTst>(value) {
        Ok(arc_tst) => container_tokens(attribute, &arc_tst.tst_container, accepted_encodings),
        Err(reason) => Extracted::failed(ExtractionError::new(
            attribute,
            ExtractionErrorKind::TimeStampContainerMalformed,
            reason,
        )),
    }
}

/// Reads `timeStamped` from an `arcTst` value.
pub(crate) fn archive_timestamp_type(
    attribute: &str,
    value: &Value,
) -> (ArchiveTimestampType, Option<ExtractionError>) {
    let time_stamped = value
        .as_object()
        .and_then(|members| members.get(TIMESTAMPED));

    match time_stamped {
        None => (ArchiveTimestampType::All, None),
        Some(Value::String(s)) if s == ALL => (ArchiveTimestampType::All, None),
        Some(Value::String(s)) if s == PREVIOUS_ARC_TST => {
            (ArchiveTimestampType::PreviousOnly, None)
        }
        Some(other) => (
            ArchiveTimestampType::All,
            Some(ExtractionError::new(
                attribute,
                ExtractionErrorKind::ArchiveCoverageUnrecognized,
                format!("unrecognized timeStamped value {other}, covering all prior evidence"),
            )),
        ),
    }
}
