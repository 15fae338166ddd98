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

//! ASN.1 structures from RFC 3161 that are not provided by `rasn-cms`.

#![allow(missing_docs)]

use rasn::{
    types::{BitString, GeneralizedTime, Integer, ObjectIdentifier, OctetString, SequenceOf, Utf8String},
    AsnType, Decode, Decoder, Encode, Encoder,
};
use rasn_cms::ContentInfo;
use rasn_pkix::{AlgorithmIdentifier, Extensions, GeneralName};

/// ```asn1
/// TSTInfo ::= SEQUENCE  {
///    version                      INTEGER  { v1(1) },
///    policy                       TSAPolicyId,
///    messageImprint               MessageImprint,
///    serialNumber                 INTEGER,
///    genTime                      GeneralizedTime,
///    accuracy                     Accuracy                 OPTIONAL,
///    ordering                     BOOLEAN             DEFAULT FALSE,
///    nonce                        INTEGER                  OPTIONAL,
///    tsa                          [0] GeneralName          OPTIONAL,
///    extensions                   [1] IMPLICIT Extensions   OPTIONAL  }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq)]
pub struct TstInfo {
    pub version: Integer,
    pub policy: ObjectIdentifier,
    pub message_imprint: MessageImprint,
    pub serial_number: Integer,
    pub gen_time: GeneralizedTime,
    pub accuracy: Option<Accuracy>,
    #[rasn(default)]
    pub ordering: bool,
    pub nonce: Option<Integer>,
    #[rasn(tag(explicit(0)))]
    pub tsa: Option<GeneralName>,
    #[rasn(tag(1))]
    pub extensions: Option<Extensions>,
}

/// ```asn1
/// MessageImprint ::= SEQUENCE  {
///      hashAlgorithm                AlgorithmIdentifier,
///      hashedMessage                OCTET STRING  }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq)]
pub struct MessageImprint {
    pub hash_algorithm: AlgorithmIdentifier,
    pub hashed_message: OctetString,
}

/// ```asn1
/// Accuracy ::= SEQUENCE {
///      seconds        INTEGER           OPTIONAL,
///      millis     [0] INTEGER  (1..999) OPTIONAL,
///      micros     [1] INTEGER  (1..999) OPTIONAL  }
/// ```
#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq)]
pub struct Accuracy {
    pub seconds: Option<Integer>,
    #[rasn(tag(0))]
    pub millis: Option<Integer>,
    #[rasn(tag(1))]
    pub micros: Option<Integer>,
}

#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq)]
pub(crate) struct TimeStampResp {
    pub status: PkiStatusInfo,
    pub time_stamp_token: Option<ContentInfo>,
}

#[derive(AsnType, Clone, Debug, Decode, Encode, PartialEq)]
pub(crate) struct PkiStatusInfo {
    pub status: Integer,
    pub status_string: Option<SequenceOf<Utf8String>>,
    pub fail_info: Option<BitString>,
}
