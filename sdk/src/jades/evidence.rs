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

//! Extraction of validation data refs and values from JAdES properties.

use ades_crypto::{
    base64, certificate::CertificateToken, crl::CrlBinary, hash::DigestAlgorithm,
    ocsp::OcspResponseBinary,
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{ExtractionError, ExtractionErrorKind},
    format::{Extracted, ValidationValues},
    jades::payload,
    pool::RevocationValue,
    reference::{CertificateRef, CrlRef, Digest, OcspRef, RevocationRef},
};

pub(crate) fn certificate_refs(attribute: &str, value: &Value) -> Extracted<CertificateRef> {
    let Value::Array(entries) = value else {
        return Extracted::failed(container_malformed(attribute, "expected an array of refs"));
    };

    let mut result = Extracted::new();
    for entry in entries {
        match certificate_ref(entry) {
            Ok(certificate_ref) => result.push(certificate_ref),
            Err(reason) => result.issue(ExtractionError::new(
                attribute,
                ExtractionErrorKind::ReferenceMalformed,
                reason,
            )),
        }
    }
    result
}

fn certificate_ref(entry: &Value) -> Result<CertificateRef, String> {
    let cert_ref: payload::CertRef = deserialize(entry)?;

    let digest = match (cert_ref.x5t_o, cert_ref.dig_alg, cert_ref.dig_val) {
        (Some(x5t_o), _, _) => digest(&x5t_o.dig_alg, &x5t_o.dig_val)?,
        (None, Some(dig_alg), Some(dig_val)) => digest(&dig_alg, &dig_val)?,
        _ => return Err("certificate ref has no digest".into()),
    };

    let issuer_serial = match cert_ref.issuer_serial.or(cert_ref.kid) {
        Some(encoded) => Some(
            base64::decode(&encoded).map_err(|e| format!("issuerSerial is not base64: {e}"))?,
        ),
        None => None,
    };

    Ok(CertificateRef {
        digest,
        issuer_serial,
    })
}

pub(crate) fn revocation_refs(attribute: &str, value: &Value) -> Extracted<RevocationRef> {
    let r_refs: payload::RRefs = match deserialize(value) {
        Ok(r_refs) => r_refs,
        Err(reason) => return Extracted::failed(container_malformed(attribute, reason)),
    };

    let mut result = Extracted::new();
    let malformed = |reason: String| {
        ExtractionError::new(attribute, ExtractionErrorKind::ReferenceMalformed, reason)
    };

    for entry in &r_refs.crl_refs {
        match deserialize::<payload::CrlRef>(entry)
            .and_then(|r| digest(&r.dig_alg_val.dig_alg, &r.dig_alg_val.dig_val))
        {
            Ok(digest) => result.push(RevocationRef::Crl(CrlRef { digest })),
            Err(reason) => result.issue(malformed(reason)),
        }
    }

    for entry in &r_refs.ocsp_refs {
        match ocsp_ref(entry) {
            Ok(ocsp_ref) => result.push(RevocationRef::Ocsp(ocsp_ref)),
            Err(reason) => result.issue(malformed(reason)),
        }
    }

    result
}

fn ocsp_ref(entry: &Value) -> Result<OcspRef, String> {
    let ocsp_ref: payload::OcspRef = deserialize(entry)?;

    let digest = match ocsp_ref.dig_alg_val {
        Some(dav) => Some(digest(&dav.dig_alg, &dav.dig_val)?),
        None => None,
    };

    let produced_at = match ocsp_ref.ocsp_id.produced_at {
        Some(time) => Some(
            DateTime::parse_from_rfc3339(&time)
                .map_err(|e| format!("producedAt is not an RFC 3339 time: {e}"))?
                .with_timezone(&Utc),
        ),
        None => None,
    };

    if digest.is_none() && produced_at.is_none() {
        return Err("OCSP ref has neither a digest nor a producedAt time".into());
    }

    let responder_id = ocsp_ref
        .ocsp_id
        .responder_id
        .and_then(|r| r.by_name.or(r.by_key));

    Ok(OcspRef {
        digest,
        produced_at,
        responder_id,
    })
}

pub(crate) fn certificate_values(attribute: &str, value: &Value) -> Extracted<CertificateToken> {
    let Value::Array(entries) = value else {
        return Extracted::failed(container_malformed(attribute, "expected an array of values"));
    };

    let mut result = Extracted::new();
    for entry in entries {
        match certificate_value(entry) {
            Ok(certificate) => result.push(certificate),
            Err(reason) => result.issue(ExtractionError::new(
                attribute,
                ExtractionErrorKind::CertificateMalformed,
                reason,
            )),
        }
    }
    result
}

fn certificate_value(entry: &Value) -> Result<CertificateToken, String> {
    let pki_ob = match deserialize::<payload::CertVal>(entry)? {
        payload::CertVal::X509Cert(pki_ob) | payload::CertVal::OtherCert(pki_ob) => pki_ob,
    };

    let der = pki_ob_bytes(&pki_ob)?;
    CertificateToken::from_der(&der).map_err(|e| e.to_string())
}

pub(crate) fn revocation_values(attribute: &str, value: &Value) -> Extracted<RevocationValue> {
    let r_vals: payload::RVals = match deserialize(value) {
        Ok(r_vals) => r_vals,
        Err(reason) => return Extracted::failed(container_malformed(attribute, reason)),
    };

    let mut result = Extracted::new();

    for entry in &r_vals.crl_vals {
        let crl = deserialize::<payload::PkiOb>(entry)
            .and_then(|pki_ob| pki_ob_bytes(&pki_ob))
            .and_then(|der| CrlBinary::from_der(&der).map_err(|e| e.to_string()));

        match crl {
            Ok(crl) => result.push(RevocationValue::Crl(crl)),
            Err(reason) => result.issue(ExtractionError::new(
                attribute,
                ExtractionErrorKind::CrlMalformed,
                reason,
            )),
        }
    }

    for entry in &r_vals.ocsp_vals {
        let ocsp = deserialize::<payload::PkiOb>(entry)
            .and_then(|pki_ob| pki_ob_bytes(&pki_ob))
            .and_then(|der| OcspResponseBinary::from_der(&der).map_err(|e| e.to_string()));

        match ocsp {
            Ok(ocsp) => result.push(RevocationValue::Ocsp(ocsp)),
            Err(reason) => result.issue(ExtractionError::new(
                attribute,
                ExtractionErrorKind::OcspMalformed,
                reason,
            )),
        }
    }

    result
}

/// `tstVD` bundles `xVals` and `rVals` for the time-stamps of the
/// signature.
pub(crate) fn timestamp_validation_data(
    attribute: &str,
    value: &Value,
) -> (ValidationValues, Vec<ExtractionError>) {
    let tst_vd: payload::TstVd = match deserialize(value) {
        Ok(tst_vd) => tst_vd,
        Err(reason) => {
            return (
                ValidationValues::default(),
                vec![container_malformed(attribute, reason)],
            )
        }
    };

    let mut values = ValidationValues::default();
    let mut issues = Vec::new();

    if let Some(x_vals) = &tst_vd.x_vals {
        let certificates = certificate_values(attribute, x_vals);
        values.certificates = certificates.items;
        issues.extend(certificates.issues);
    }

    if let Some(r_vals) = &tst_vd.r_vals {
        let revocations = revocation_values(attribute, r_vals);
        values.revocations = revocations.items;
        issues.extend(revocations.issues);
    }

    (values, issues)
}

fn digest(dig_alg: &str, dig_val: &str) -> Result<Digest, String> {
    let algorithm = DigestAlgorithm::from_uri(dig_alg)
        .ok_or_else(|| format!("unknown digest algorithm {dig_alg}"))?;

    let value = base64::decode(dig_val)
        .or_else(|_| base64::decode_url(dig_val))
        .map_err(|e| format!("digest value is not base64: {e}"))?;

    if value.len() != algorithm.output_len() {
        return Err(format!(
            "{algorithm} digest must be {} bytes, found {}",
            algorithm.output_len(),
            value.len()
        ));
    }

    Ok(Digest::new(algorithm, value))
}

fn pki_ob_bytes(pki_ob: &payload::PkiOb) -> Result<Vec<u8>, String> {
    base64::decode(&pki_ob.val).map_err(|e| format!("val is not base64: {e}"))
}

pub(crate) fn deserialize<T: DeserializeOwned>(value: &Value) -> Result<T, String> {
    T::deserialize(value).map_err(|e| e.to_string())
}

fn container_malformed<R: Into<String>>(attribute: &str, reason: R) -> ExtractionError {
    ExtractionError::new(
        attribute,
        ExtractionErrorKind::EvidenceContainerMalformed,
        reason,
    )
}
