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

use chrono::{DateTime, Utc};
use rasn::types::Oid;
use rasn_cms::{ContentInfo, SignedData};

use crate::{
    hash::DigestAlgorithm,
    time_stamp::{
        asn1::{TimeStampResp, TstInfo},
        TimeStampError,
    },
    Identifier,
};

const OID_ID_SIGNED_DATA: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 7, 2]);
const OID_CONTENT_TYPE_TST_INFO: &Oid = Oid::const_new(&[1, 2, 840, 113549, 1, 9, 16, 1, 4]);

const OID_SHA1: &Oid = Oid::const_new(&[1, 3, 14, 3, 2, 26]);
const OID_SHA224: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 4]);
const OID_SHA256: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 1]);
const OID_SHA384: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 2]);
const OID_SHA512: &Oid = Oid::const_new(&[2, 16, 840, 1, 101, 3, 4, 2, 3]);

/// A decoded RFC 3161 time-stamp token.
///
/// No signature or certificate validation happens here; the token is only
/// parsed far enough to expose its generation time and message imprint.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeStampProof {
    id: Identifier,
    token_der: Vec<u8>,
    tst_info: TstInfo,
}

impl TimeStampProof {
    /// Decodes a DER `TimeStampToken`.
    ///
    /// A full `TimeStampResp` is accepted too, in which case the embedded
    /// token is extracted and re-encoded.
    pub fn from_der(der: &[u8]) -> Result<Self, TimeStampError> {
        let (token, token_der) = match rasn::der::decode::<ContentInfo>(der) {
            Ok(token) => (token, der.to_vec()),
            Err(token_err) => {
                let resp = rasn::der::decode::<TimeStampResp>(der)
                    .map_err(|_| TimeStampError::DecodeError(token_err.to_string()))?;

                let token = resp.time_stamp_token.ok_or(TimeStampError::NoToken)?;
                let token_der = rasn::der::encode(&token)
                    .map_err(|e| TimeStampError::DecodeError(e.to_string()))?;

                (token, token_der)
            }
        };

        if &*token.content_type != OID_ID_SIGNED_DATA {
            return Err(TimeStampError::InvalidContentType);
        }

        let signed_data = rasn::der::decode::<SignedData>(token.content.as_bytes())
            .map_err(|e| TimeStampError::DecodeError(e.to_string()))?;

        let encap = &signed_data.encap_content_info;
        if &*encap.content_type != OID_CONTENT_TYPE_TST_INFO {
            return Err(TimeStampError::NoTstInfo);
        }

        let content = encap.content.as_ref().ok_or(TimeStampError::NoTstInfo)?;
        let tst_info = rasn::der::decode::<TstInfo>(content)
            .map_err(|e| TimeStampError::DecodeError(e.to_string()))?;

        Ok(Self {
            id: Identifier::from_bytes(Identifier::TIMESTAMP, &token_der),
            token_der,
            tst_info,
        })
    }

    /// Returns the token's identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Returns the DER encoding of the `TimeStampToken`.
    pub fn token_der(&self) -> &[u8] {
        &self.token_der
    }

    /// Returns the decoded `TSTInfo`.
    pub fn tst_info(&self) -> &TstInfo {
        &self.tst_info
    }

    /// Time at which the TSA created the token.
    pub fn gen_time(&self) -> DateTime<Utc> {
        self.tst_info.gen_time.with_timezone(&Utc)
    }

    /// Hash of the time-stamped data as asserted by the TSA.
    pub fn message_imprint(&self) -> &[u8] {
        &self.tst_info.message_imprint.hashed_message
    }

    /// Algorithm of [`Self::message_imprint`], if it is one we know.
    pub fn message_imprint_algorithm(&self) -> Option<DigestAlgorithm> {
        let oid: &Oid = &self.tst_info.message_imprint.hash_algorithm.algorithm;
        [
            (OID_SHA1, DigestAlgorithm::Sha1),
            (OID_SHA224, DigestAlgorithm::Sha224),
            (OID_SHA256, DigestAlgorithm::Sha256),
            (OID_SHA384, DigestAlgorithm::Sha384),
            (OID_SHA512, DigestAlgorithm::Sha512),
        ]
        .into_iter()
        .find(|(known, _)| known == &oid)
        .map(|(_, alg)| alg)
    }
}
