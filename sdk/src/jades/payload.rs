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

//! Payload shapes of the JAdES unsigned properties.
//!
//! Containers are deserialized first; the entries they hold are kept as raw
//! values and deserialized one at a time, so that a single malformed entry
//! does not take its siblings down with it.

use serde::Deserialize;
use serde_json::Value;

/// `{"tstTokens": [...], "canonAlg"?: uri}`
#[derive(Debug, Deserialize)]
pub(crate) struct TstContainer {
    #[serde(rename = "tstTokens")]
    pub tst_tokens: Vec<Value>,

    #[serde(rename = "canonAlg")]
    pub canon_alg: Option<String>,
}

/// One entry of `tstTokens`. `type` and `specRef` are not needed and
/// ignored.
#[derive(Debug, Deserialize)]
pub(crate) struct TstToken {
    pub encoding: Option<String>,
    pub val: String,
}

/// Value of `arcTst`. `timeStamped` is read separately, since an
/// unexpected value there must not hide the tokens.
#[derive(Debug, Deserialize)]
pub(crate) struct ArcTst {
    #[serde(rename = "tstContainer")]
    pub tst_container: Value,
}

/// A `pkiOb`: `{"encoding"?: uri, "specRef"?: uri, "val": base64}`.
#[derive(Debug, Deserialize)]
pub(crate) struct PkiOb {
    pub val: String,
}

/// One entry of `xVals` / `axVals`. Both forms carry a DER certificate.
#[derive(Debug, Deserialize)]
pub(crate) enum CertVal {
    #[serde(rename = "x509Cert")]
    X509Cert(PkiOb),

    #[serde(rename = "otherCert")]
    OtherCert(PkiOb),
}

/// Value of `rVals` / `arVals`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RVals {
    #[serde(rename = "crlVals", default)]
    pub crl_vals: Vec<Value>,

    #[serde(rename = "ocspVals", default)]
    pub ocsp_vals: Vec<Value>,
}

/// Value of `tstVD`.
#[derive(Debug, Deserialize)]
pub(crate) struct TstVd {
    #[serde(rename = "xVals")]
    pub x_vals: Option<Value>,

    #[serde(rename = "rVals")]
    pub r_vals: Option<Value>,
}

/// `{"digAlg": uri, "digVal": base64}`
#[derive(Debug, Deserialize)]
pub(crate) struct DigAlgVal {
    #[serde(rename = "digAlg")]
    pub dig_alg: String,

    #[serde(rename = "digVal")]
    pub dig_val: String,
}

/// One entry of `xRefs` / `axRefs`.
///
/// The digest is either inline or nested under `x5t#o`.
#[derive(Debug, Deserialize)]
pub(crate) struct CertRef {
    #[serde(rename = "digAlg")]
    pub dig_alg: Option<String>,

    #[serde(rename = "digVal")]
    pub dig_val: Option<String>,

    #[serde(rename = "x5t#o")]
    pub x5t_o: Option<DigAlgVal>,

    #[serde(rename = "issuerSerial")]
    pub issuer_serial: Option<String>,

    pub kid: Option<String>,
}

/// Value of `rRefs` / `arRefs`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RRefs {
    #[serde(rename = "crlRefs", default)]
    pub crl_refs: Vec<Value>,

    #[serde(rename = "ocspRefs", default)]
    pub ocsp_refs: Vec<Value>,
}

/// One entry of `crlRefs`.
#[derive(Debug, Deserialize)]
pub(crate) struct CrlRef {
    #[serde(rename = "digAlgVal")]
    pub dig_alg_val: DigAlgVal,
}

/// One entry of `ocspRefs`.
#[derive(Debug, Deserialize)]
pub(crate) struct OcspRef {
    #[serde(rename = "ocspId")]
    pub ocsp_id: OcspId,

    #[serde(rename = "digAlgVal")]
    pub dig_alg_val: Option<DigAlgVal>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OcspId {
    #[serde(rename = "responderId")]
    pub responder_id: Option<ResponderId>,

    #[serde(rename = "producedAt")]
    pub produced_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResponderId {
    #[serde(rename = "byName")]
    pub by_name: Option<String>,

    #[serde(rename = "byKey")]
    pub by_key: Option<String>,
}
