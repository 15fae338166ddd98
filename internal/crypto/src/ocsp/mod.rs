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

//! Tools for working with OCSP responses.

use chrono::{DateTime, Utc};
use rasn_ocsp::{BasicOcspResponse, OcspResponse, OcspResponseStatus};
use thiserror::Error;

use crate::{hash::DigestAlgorithm, Identifier};

/// A decoded OCSP response.
///
/// JAdES embeds either the full `OCSPResponse` or the bare
/// `BasicOCSPResponse`. Both decode to the same value: the identifier is
/// always computed over the `BasicOCSPResponse` DER so the two forms of one
/// response deduplicate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OcspResponseBinary {
    id: Identifier,
    basic_der: Vec<u8>,
    produced_at: DateTime<Utc>,
}

impl OcspResponseBinary {
    /// Decodes an OCSP response in either of its embedded forms.
    pub fn from_der(der: &[u8]) -> Result<Self, OcspError> {
        let basic_der = match rasn::der::decode::<OcspResponse>(der) {
            Ok(ocsp_response) => {
                if ocsp_response.status != OcspResponseStatus::Successful {
                    return Err(OcspError::Unsuccessful);
                }

                let Some(response_bytes) = ocsp_response.bytes else {
                    return Err(OcspError::NoResponseBytes);
                };

                response_bytes.response.to_vec()
            }
            Err(_) => der.to_vec(),
        };

        let basic_response = rasn::der::decode::<BasicOcspResponse>(&basic_der)
            .map_err(|e| OcspError::DecodeError(e.to_string()))?;

        Ok(Self {
            id: Identifier::from_bytes(Identifier::REVOCATION, &basic_der),
            produced_at: basic_response
                .tbs_response_data
                .produced_at
                .with_timezone(&Utc),
            basic_der,
        })
    }

    /// Returns the response's identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Returns the DER encoding of the `BasicOCSPResponse`.
    pub fn basic_der(&self) -> &[u8] {
        &self.basic_der
    }

    /// Time at which the responder signed this response.
    pub fn produced_at(&self) -> DateTime<Utc> {
        self.produced_at
    }

    /// Hashes the `BasicOCSPResponse` DER with `alg`.
    pub fn digest(&self, alg: DigestAlgorithm) -> Vec<u8> {
        alg.digest(&self.basic_der)
    }
}

/// Describes errors that can occur when decoding an OCSP response.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum OcspError {
    /// The responder did not return a successful status.
    #[error("OCSP response status is not successful")]
    Unsuccessful,

    /// A successful `OCSPResponse` carried no response bytes.
    #[error("OCSP response has no response bytes")]
    NoResponseBytes,

    /// The bytes are neither an `OCSPResponse` nor a `BasicOCSPResponse`.
    #[error("unable to decode OCSP response: {0}")]
    DecodeError(String),
}
