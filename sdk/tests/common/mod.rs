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

#![allow(dead_code)]

use ades_timestamps::{
    ades_crypto::{
        base64::{encode, encode_url},
        hash::sha256,
    },
    jades::Jades,
    Signature,
};
use serde_json::{json, Value};

pub const CA: &[u8] = include_bytes!("../fixtures/ca.der");
pub const SIGNER: &[u8] = include_bytes!("../fixtures/signer.der");
pub const TSA: &[u8] = include_bytes!("../fixtures/tsa.der");
pub const CRL: &[u8] = include_bytes!("../fixtures/crl.der");
pub const OCSP: &[u8] = include_bytes!("../fixtures/ocsp.der");

pub const TST1: &[u8] = include_bytes!("../fixtures/tst1.der");
pub const TST2: &[u8] = include_bytes!("../fixtures/tst2.der");
pub const TST3: &[u8] = include_bytes!("../fixtures/tst3.der");
pub const TST4: &[u8] = include_bytes!("../fixtures/tst4.der");
pub const TST5: &[u8] = include_bytes!("../fixtures/tst5.der");

pub const SHA256_URI: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

#[allow(unused_macros)]
macro_rules! assert_err {
    ($expression:expr, $($pattern:tt)+) => {
        match $expression {
            $($pattern)+ => (),
            ref e => panic!("expected `{}` but got `{:?}`", stringify!($($pattern)+), e),
        }
    }
}
#[allow(unused_imports)]
pub(super) use assert_err;

/// `{"tstTokens": [...]}` holding DER tokens.
pub fn tst_container(tokens: &[&[u8]]) -> Value {
    let tokens: Vec<Value> = tokens.iter().map(|t| json!({ "val": encode(t) })).collect();
    json!({ "tstTokens": tokens })
}

/// Value of an `arcTst` property.
pub fn arc_tst(tokens: &[&[u8]], time_stamped: Option<&str>) -> Value {
    match time_stamped {
        Some(time_stamped) => json!({
            "tstContainer": tst_container(tokens),
            "timeStamped": time_stamped,
        }),
        None => json!({ "tstContainer": tst_container(tokens) }),
    }
}

pub fn x_vals(certificates: &[&[u8]]) -> Value {
    let vals: Vec<Value> = certificates
        .iter()
        .map(|c| json!({ "x509Cert": { "val": encode(c) } }))
        .collect();
    Value::Array(vals)
}

pub fn r_vals(crls: &[&[u8]], ocsp_responses: &[&[u8]]) -> Value {
    let crl_vals: Vec<Value> = crls.iter().map(|c| json!({ "val": encode(c) })).collect();
    let ocsp_vals: Vec<Value> = ocsp_responses
        .iter()
        .map(|o| json!({ "val": encode(o) }))
        .collect();
    json!({ "crlVals": crl_vals, "ocspVals": ocsp_vals })
}

/// A certificate ref by SHA-256 digest.
pub fn x_ref(certificate: &[u8]) -> Value {
    json!({ "digAlg": SHA256_URI, "digVal": encode(&sha256(certificate)) })
}

/// A flattened JSON JWS with the given unsigned properties.
pub fn flattened_jws(
    signature_value: &[u8],
    certificates: &[&[u8]],
    signed: Value,
    etsi_u: Vec<Value>,
) -> Value {
    let x5c: Vec<String> = certificates.iter().map(|c| encode(c)).collect();

    let mut protected = json!({ "alg": "ES256", "x5c": x5c });
    if let (Some(protected), Value::Object(signed)) = (protected.as_object_mut(), signed) {
        protected.extend(signed);
    }

    json!({
        "protected": encode_url(&serde_json::to_vec(&protected).unwrap()),
        "payload": encode_url(b"evidence payload"),
        "header": { "etsiU": etsi_u },
        "signature": encode_url(signature_value),
    })
}

/// Reads a signature from a flattened JSON JWS.
pub fn signature(jws: &Value) -> Signature {
    Jades::default().signature_from_json(jws).unwrap()
}

/// Compact serialization with no unsigned properties.
pub fn compact_jws(signature_value: &[u8]) -> String {
    format!(
        "{}.{}.{}",
        encode_url(br#"{"alg":"ES256"}"#),
        encode_url(b"evidence payload"),
        encode_url(signature_value)
    )
}
