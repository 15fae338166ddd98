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

//! Reading JWS serializations into [`Signature`]s.

use ades_crypto::base64;
use serde_json::{Map, Value};

use crate::{
    error::{ExtractionError, ExtractionErrorKind},
    jades::header_names::{ETSI_U, X5C},
    Signature, SignatureProperty,
};

/// Parses every signature of a JWS in compact, flattened JSON or general
/// JSON serialization.
pub(crate) fn parse_document(jws: &str, decode_components: bool) -> Result<Vec<Signature>, String> {
    let jws = jws.trim();
    if !jws.starts_with('{') {
        return Ok(vec![from_compact(jws)?]);
    }

    let value: Value = serde_json::from_str(jws).map_err(|e| format!("JWS is not JSON: {e}"))?;
    let Some(signatures) = value.get("signatures") else {
        return Ok(vec![from_json(&value, decode_components)?]);
    };

    let Value::Array(signatures) = signatures else {
        return Err("\"signatures\" must be an array".into());
    };

    let payload = value
        .get("payload")
        .and_then(Value::as_str)
        .unwrap_or_default();

    signatures
        .iter()
        .map(|entry| match entry {
            Value::Object(entry) => from_members(entry, payload, decode_components),
            _ => Err("\"signatures\" entries must be JSON objects".into()),
        })
        .collect()
}

/// Parses exactly one signature from a compact or flattened JSON JWS.
pub(crate) fn parse_signature(jws: &str, decode_components: bool) -> Result<Signature, String> {
    let jws = jws.trim();
    if jws.starts_with('{') {
        let value: Value =
            serde_json::from_str(jws).map_err(|e| format!("JWS is not JSON: {e}"))?;
        from_json(&value, decode_components)
    } else {
        from_compact(jws)
    }
}

/// Parses one signature from an already decoded JSON value: a flattened
/// JSON object or a string holding the compact serialization.
pub(crate) fn from_json(value: &Value, decode_components: bool) -> Result<Signature, String> {
    match value {
        Value::String(compact) => from_compact(compact.trim()),
        Value::Object(members) => {
            if members.contains_key("signatures") {
                return Err("expected a single signature, found general JSON serialization".into());
            }
            let payload = members
                .get("payload")
                .and_then(Value::as_str)
                .unwrap_or_default();
            from_members(members, payload, decode_components)
        }
        _ => Err("JWS must be a JSON object or a compact serialization".into()),
    }
}

fn from_compact(compact: &str) -> Result<Signature, String> {
    let mut parts = compact.split('.');
    let (Some(protected), Some(payload), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err("compact JWS must have exactly three parts".into());
    };

    build(protected, payload, signature, None, false)
}

fn from_members(
    members: &Map<String, Value>,
    payload: &str,
    decode_components: bool,
) -> Result<Signature, String> {
    let protected = members
        .get("protected")
        .and_then(Value::as_str)
        .ok_or("JWS has no protected header")?;

    let signature = members
        .get("signature")
        .and_then(Value::as_str)
        .ok_or("JWS has no signature")?;

    let header = match members.get("header") {
        None => None,
        Some(Value::Object(header)) => Some(header),
        Some(_) => return Err("unprotected header must be a JSON object".into()),
    };

    build(protected, payload, signature, header, decode_components)
}

fn build(
    protected_b64: &str,
    payload_b64: &str,
    signature_b64: &str,
    header: Option<&Map<String, Value>>,
    decode_components: bool,
) -> Result<Signature, String> {
    let protected_bytes = base64::decode_url(protected_b64)
        .map_err(|e| format!("protected header is not base64url: {e}"))?;

    let protected: Map<String, Value> = serde_json::from_slice(&protected_bytes)
        .map_err(|e| format!("protected header is not a JSON object: {e}"))?;

    let signature_value = base64::decode_url(signature_b64)
        .map_err(|e| format!("signature is not base64url: {e}"))?;

    let mut issues = Vec::new();

    let certificates = x5c(&protected, &mut issues);

    let signed_properties = protected
        .iter()
        .map(|(name, value)| SignatureProperty::from_value(name.as_str(), value.clone()))
        .collect();

    let unsigned_properties = match header.and_then(|h| h.get(ETSI_U)) {
        None => Vec::new(),
        Some(Value::Array(components)) => components
            .iter()
            .filter_map(|c| match unsigned_property(c, decode_components) {
                Ok(property) => Some(property),
                Err(issue) => {
                    issues.push(issue);
                    None
                }
            })
            .collect(),
        Some(_) => {
            issues.push(property_malformed("etsiU must be an array"));
            Vec::new()
        }
    };

    Ok(Signature::new(
        signature_value,
        format!("{protected_b64}.{payload_b64}").into_bytes(),
        certificates,
        signed_properties,
        unsigned_properties,
        issues,
    ))
}

fn x5c(protected: &Map<String, Value>, issues: &mut Vec<ExtractionError>) -> Vec<Vec<u8>> {
    let Some(x5c) = protected.get(X5C) else {
        return Vec::new();
    };

    let Value::Array(entries) = x5c else {
        issues.push(ExtractionError::new(
            X5C,
            ExtractionErrorKind::EvidenceContainerMalformed,
            "x5c must be an array",
        ));
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            match entry.as_str().map(base64::decode) {
                Some(Ok(der)) => Some(der),
                _ => {
                    issues.push(ExtractionError::new(
                        X5C,
                        ExtractionErrorKind::CertificateMalformed,
                        "x5c entry is not a base64 string",
                    ));
                    None
                }
            }
        })
        .collect()
}

fn unsigned_property(
    component: &Value,
    decode_components: bool,
) -> Result<SignatureProperty, ExtractionError> {
    match component {
        Value::Object(members) => {
            let raw = serde_json::to_vec(component).unwrap_or_default();
            single_member(members, raw)
        }
        Value::String(encoded) if decode_components => {
            let raw = base64::decode_url(encoded)
                .map_err(|e| property_malformed(format!("etsiU component is not base64url: {e}")))?;

            match serde_json::from_slice::<Value>(&raw) {
                Ok(Value::Object(members)) => single_member(&members, raw),
                _ => Err(property_malformed(
                    "decoded etsiU component is not a JSON object",
                )),
            }
        }
        Value::String(_) => Err(property_malformed(
            "base64url-encoded etsiU components are not accepted",
        )),
        _ => Err(property_malformed("etsiU component must be a JSON object")),
    }
}

fn single_member(
    members: &Map<String, Value>,
    raw: Vec<u8>,
) -> Result<SignatureProperty, ExtractionError> {
    let mut iter = members.iter();
    match (iter.next(), iter.next()) {
        (Some((name, value)), None) => {
            Ok(SignatureProperty::new(name.as_str(), value.clone(), raw))
        }
        _ => Err(property_malformed(format!(
            "etsiU component must have exactly one member, found {}",
            members.len()
        ))),
    }
}

fn property_malformed<S: Into<String>>(reason: S) -> ExtractionError {
    ExtractionError::new(ETSI_U, ExtractionErrorKind::PropertyMalformed, reason)
}
