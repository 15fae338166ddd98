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

//! Status codes recorded while resolving the time-stamp evidence of an
//! AdES signature.
//!
//! Codes are grouped by the object they describe: time-stamp tokens,
//! embedded validation data, counter signatures and raw signature
//! properties.

use crate::LogKind;

// -- success codes --

/// A time-stamp token was extracted from a signature property and bound to
/// its covered references.
pub const TIMESTAMP_EXTRACTED: &str = "timeStamp.extracted";

// -- time-stamp codes --

/// A time-stamp container did not have the expected shape (for example, no
/// `tstTokens` array). No tokens were extracted from it.
pub const TIMESTAMP_CONTAINER_MALFORMED: &str = "timeStamp.container.malformed";

/// A single time-stamp token could not be decoded and was skipped.
pub const TIMESTAMP_TOKEN_MALFORMED: &str = "timeStamp.token.malformed";

/// A single time-stamp token declared an unsupported encoding and was
/// skipped.
pub const TIMESTAMP_TOKEN_UNSUPPORTED_ENCODING: &str = "timeStamp.token.unsupportedEncoding";

/// An archive time-stamp declared an unrecognized coverage indicator. The
/// time-stamp was treated as covering all prior evidence.
pub const TIMESTAMP_ARCHIVE_COVERAGE_UNRECOGNIZED: &str = "timeStamp.archive.coverageUnrecognized";

// -- validation data codes --

/// An embedded certificate could not be decoded and was skipped.
pub const EVIDENCE_CERTIFICATE_MALFORMED: &str = "evidence.certificate.malformed";

/// An embedded CRL could not be decoded and was skipped.
pub const EVIDENCE_CRL_MALFORMED: &str = "evidence.crl.malformed";

/// An embedded OCSP response could not be decoded and was skipped.
pub const EVIDENCE_OCSP_MALFORMED: &str = "evidence.ocsp.malformed";

/// A certificate or revocation reference could not be read and was skipped.
pub const EVIDENCE_REFERENCE_MALFORMED: &str = "evidence.reference.malformed";

/// A refs or values container did not have the expected shape. It was
/// treated as empty.
pub const EVIDENCE_CONTAINER_MALFORMED: &str = "evidence.container.malformed";

// -- counter signature codes --

/// A counter signature could not be read. It contributes no references.
pub const COUNTER_SIGNATURE_MALFORMED: &str = "counterSignature.malformed";

/// A counter signature refers back to a signature that is still being
/// resolved.
pub const COUNTER_SIGNATURE_CYCLE: &str = "counterSignature.cycle";

/// Counter signatures are nested deeper than the configured limit.
pub const COUNTER_SIGNATURE_DEPTH_EXCEEDED: &str = "counterSignature.depthExceeded";

// -- property codes --

/// An unsigned property could not be read as a single named header.
pub const PROPERTY_MALFORMED: &str = "property.malformed";

/// Returns `true` if the status code is a success code.
///
/// ## Examples
///
/// ```
/// use ades_status_tracker::validation_codes::*;
///
/// assert!(is_success(TIMESTAMP_EXTRACTED));
/// assert!(!is_success(TIMESTAMP_TOKEN_MALFORMED));
/// ```
pub fn is_success(status_code: &str) -> bool {
    matches!(log_kind(status_code), LogKind::Success)
}

/// Returns the [`LogKind`] for a given status code.
pub fn log_kind(status_code: &str) -> LogKind {
    match status_code {
        TIMESTAMP_EXTRACTED => LogKind::Success,
        TIMESTAMP_ARCHIVE_COVERAGE_UNRECOGNIZED => LogKind::Informational,
        _ => LogKind::Failure,
    }
}
