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

#![allow(clippy::unwrap_used)]

mod jades;
mod source;

pub(crate) mod fixtures {
    use ades_crypto::base64::{encode, encode_url};
    use serde_json::{json, Value};

    pub const CA: &[u8] = include_bytes!("../../tests/fixtures/ca.der");
    pub const SIGNER: &[u8] = include_bytes!("../../tests/fixtures/signer.der");
    pub const TSA: &[u8] = include_bytes!("../../tests/fixtures/tsa.der");
    pub const CRL: &[u8] = include_bytes!("../../tests/fixtures/crl.der");
    pub const OCSP: &[u8] = include_bytes!("../../tests/fixtures/ocsp.der");
    pub const OCSP_BASIC: &[u8] = include_bytes!("../../tests/fixtures/ocsp_basic.der");
    pub const TST1: &[u8] = include_bytes!("../../tests/fixtures/tst1.der");
    pub const TST2: &[u8] = include_bytes!("../../tests/fixtures/tst2.der");

    pub const SHA256_URI: &str = "http://www.w3.org/2001/04/xmlenc#sha256";

    pub fn tst_container(tokens: &[&[u8]]) -> Value {
        let tokens: Vec<Value> = tokens.iter().map(|t| json!({ "val": encode(t) })).collect();
        json!({ "tstTokens": tokens })
    }

    /// Flattened JSON JWS with an `x5c` header and the given `etsiU`.
    pub fn jws(signature_value: &[u8], certificates: &[&[u8]], etsi_u: Vec<Value>) -> Value {
        let x5c: Vec<String> = certificates.iter().map(|c| encode(c)).collect();
        let protected = json!({ "alg": "ES256", "x5c": x5c });

        json!({
            "protected": encode_url(&serde_json::to_vec(&protected).unwrap()),
            "payload": encode_url(b"payload"),
            "header": { "etsiU": etsi_u },
            "signature": encode_url(signature_value),
        })
    }
}
