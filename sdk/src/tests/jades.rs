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

use ades_crypto::{
    base64::{encode, encode_url},
    hash::{sha256, DigestAlgorithm},
};
use serde_json::{json, Value};

use super::fixtures::{jws, tst_container, CA, CRL, OCSP, SHA256_URI, SIGNER, TST1, TST2};
use crate::{
    error::ExtractionErrorKind,
    format::{AttributeKind, TimestampAttributeFormat},
    jades::Jades,
    pool::RevocationValue,
    reference::RevocationRef,
    settings::TimestampSettings,
    time_stamp::ArchiveTimestampType,
    Error, SignatureProperty,
};

fn property(name: &str, value: Value) -> SignatureProperty {
    SignatureProperty::from_value(name, value)
}

#[test]
fn classify_by_header_name() {
    let jades = Jades::default();
    let kinds = [
        ("adoTst", AttributeKind::ContentTimestamp),
        ("sigTst", AttributeKind::SignatureTimestamp),
        ("xRefs", AttributeKind::CompleteCertificateRefs),
        ("axRefs", AttributeKind::AttributeCertificateRefs),
        ("rRefs", AttributeKind::CompleteRevocationRefs),
        ("arRefs", AttributeKind::AttributeRevocationRefs),
        ("rfsTst", AttributeKind::RefsOnlyTimestamp),
        ("sigRTst", AttributeKind::SigAndRefsTimestamp),
        ("xVals", AttributeKind::CertificateValues),
        ("axVals", AttributeKind::AttrAuthoritiesCertValues),
        ("rVals", AttributeKind::RevocationValues),
        ("arVals", AttributeKind::AttributeRevocationValues),
        ("tstVD", AttributeKind::TimestampValidationData),
        ("arcTst", AttributeKind::ArchiveTimestamp),
        ("cSig", AttributeKind::CounterSignature),
        ("sigPSt", AttributeKind::Unknown),
        ("SIGTST", AttributeKind::Unknown),
    ];

    for (name, kind) in kinds {
        // the value is never looked at
        assert_eq!(jades.classify(&property(name, Value::Null)), kind, "{name}");
    }

    assert!(!jades.supports_all_data_objects_timestamps());
    assert!(!jades.supports_individual_data_objects_timestamps());
}

#[test]
fn parse_flattened() {
    let jades = Jades::default();
    let value = jws(
        b"sig",
        &[SIGNER, CA],
        vec![
            json!({ "sigTst": tst_container(&[TST1]) }),
            json!({ "xVals": [] }),
        ],
    );
    let signature = jades.parse_signature(&value.to_string()).unwrap();

    assert_eq!(signature.signature_value(), b"sig");
    assert_eq!(signature.certificates(), &[SIGNER.to_vec(), CA.to_vec()]);
    assert!(signature.issues().is_empty());

    let names: Vec<&str> = signature.signed_properties().iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["alg", "x5c"]);

    let names: Vec<&str> = signature
        .unsigned_properties()
        .iter()
        .map(|p| p.name())
        .collect();
    assert_eq!(names, vec!["sigTst", "xVals"]);

    let expected_signed_data = format!(
        "{}.{}",
        value["protected"].as_str().unwrap(),
        value["payload"].as_str().unwrap()
    );
    assert_eq!(signature.signed_data(), expected_signed_data.as_bytes());
    assert_eq!(signature.id().prefix(), Some('S'));
    assert_eq!(signature.signed_data_id().prefix(), Some('D'));
}

#[test]
fn parse_compact() {
    let jades = Jades::default();
    let compact = format!(
        "{}.{}.{}",
        encode_url(br#"{"alg":"ES256","adoTst":{"tstTokens":[]}}"#),
        encode_url(b"payload"),
        encode_url(b"sig")
    );

    let signature = jades.parse_signature(&compact).unwrap();
    assert_eq!(signature.signed_properties().len(), 2);
    assert!(signature.unsigned_properties().is_empty());

    // the same signature value gives the same identifier in any serialization
    let flattened = jades
        .parse_signature(&jws(b"sig", &[], vec![]).to_string())
        .unwrap();
    assert_eq!(signature.id(), flattened.id());
    assert_ne!(signature.signed_data_id(), flattened.signed_data_id());

    assert!(matches!(
        jades.parse_signature("a.b"),
        Err(Error::InvalidSignature(_))
    ));
    assert!(matches!(
        jades.parse_signature("!!.b.c"),
        Err(Error::InvalidSignature(_))
    ));
}

#[test]
fn parse_general_serialization() {
    let jades = Jades::default();
    let document = json!({
        "payload": encode_url(b"payload"),
        "signatures": [
            { "protected": encode_url(br#"{"alg":"ES256"}"#), "signature": encode_url(b"one") },
            { "protected": encode_url(br#"{"alg":"ES384"}"#), "signature": encode_url(b"two") },
        ],
    })
    .to_string();

    let signatures = jades.parse_document(&document).unwrap();
    assert_eq!(signatures.len(), 2);
    assert_eq!(signatures[1].signature_value(), b"two");

    // a single signature was asked for
    assert!(matches!(
        jades.parse_signature(&document),
        Err(Error::InvalidSignature(_))
    ));
}

#[test]
fn base64url_components() {
    let component = serde_json::to_vec(&json!({ "sigTst": tst_container(&[TST1]) })).unwrap();
    let value = jws(b"sig", &[], vec![Value::String(encode_url(&component))]);

    let signature = Jades::default().signature_from_json(&value).unwrap();
    assert_eq!(signature.unsigned_properties().len(), 1);
    assert_eq!(signature.unsigned_properties()[0].name(), "sigTst");
    assert_eq!(signature.unsigned_properties()[0].raw(), component.as_slice());

    let strict = Jades::new(&TimestampSettings {
        decode_base64url_components: false,
        ..Default::default()
    });
    let signature = strict.signature_from_json(&value).unwrap();
    assert!(signature.unsigned_properties().is_empty());
    assert_eq!(
        signature.issues()[0].kind,
        ExtractionErrorKind::PropertyMalformed
    );
}

#[test]
fn malformed_components_are_reported() {
    let value = jws(
        b"sig",
        &[],
        vec![
            json!({ "a": 1, "b": 2 }),
            json!({}),
            json!(7),
            Value::String(encode_url(b"[1, 2]")),
            json!({ "sigTst": tst_container(&[TST1]) }),
        ],
    );

    let signature = Jades::default().signature_from_json(&value).unwrap();
    assert_eq!(signature.unsigned_properties().len(), 1);
    assert_eq!(signature.issues().len(), 4);
    assert!(signature
        .issues()
        .iter()
        .all(|i| i.kind == ExtractionErrorKind::PropertyMalformed && i.attribute == "etsiU"));
}

#[test]
fn bad_x5c_entry() {
    let mut value = jws(b"sig", &[], vec![]);
    let protected = encode_url(br#"{"alg":"ES256","x5c":["%%", 5]}"#);
    value["protected"] = Value::String(protected);

    let signature = Jades::default().signature_from_json(&value).unwrap();
    assert!(signature.certificates().is_empty());
    assert_eq!(signature.issues().len(), 2);
    assert_eq!(
        signature.issues()[0].kind,
        ExtractionErrorKind::CertificateMalformed
    );
}

#[test]
fn certificate_refs_skip_malformed_entries() {
    let jades = Jades::default();
    let signer_sha1 = encode(&DigestAlgorithm::Sha1.digest(SIGNER));
    let refs = property(
        "xRefs",
        json!([
            { "digAlg": SHA256_URI, "digVal": encode(&sha256(CA)) },
            { "digAlg": "urn:unknown", "digVal": encode(&sha256(CA)) },
            { "digAlg": SHA256_URI, "digVal": encode(b"short") },
            {
                "x5t#o": { "digAlg": "SHA-1", "digVal": signer_sha1 },
                "issuerSerial": encode(b"issuer"),
            },
            { "issuerSerial": "MA==" },
        ]),
    );

    let extracted = jades.certificate_refs(&refs);
    assert_eq!(extracted.items.len(), 2);
    assert_eq!(extracted.issues.len(), 3);
    assert!(extracted
        .issues
        .iter()
        .all(|i| i.kind == ExtractionErrorKind::ReferenceMalformed));

    assert_eq!(extracted.items[0].digest.algorithm, DigestAlgorithm::Sha256);
    assert!(extracted.items[0].digest.matches(CA));
    assert_eq!(extracted.items[1].issuer_serial.as_deref(), Some(&b"issuer"[..]));

    let not_a_list = jades.certificate_refs(&property("xRefs", json!({ "x": 1 })));
    assert!(not_a_list.items.is_empty());
    assert_eq!(
        not_a_list.issues[0].kind,
        ExtractionErrorKind::EvidenceContainerMalformed
    );
}

#[test]
fn revocation_refs() {
    let jades = Jades::default();
    let refs = property(
        "rRefs",
        json!({
            "crlRefs": [
                { "digAlgVal": { "digAlg": SHA256_URI, "digVal": encode(&sha256(CRL)) } },
                { "crlId": {} },
            ],
            "ocspRefs": [
                {
                    "ocspId": {
                        "producedAt": "2026-10-18T08:08:18Z",
                        "responderId": { "byName": "CN=OCSP" },
                    },
                },
                { "ocspId": { "producedAt": "yesterday" } },
                { "ocspId": {} },
            ],
        }),
    );

    let extracted = jades.revocation_refs(&refs);
    assert_eq!(extracted.items.len(), 2);
    assert_eq!(extracted.issues.len(), 3);

    assert!(matches!(&extracted.items[0], RevocationRef::Crl(r) if r.digest.matches(CRL)));
    let RevocationRef::Ocsp(ocsp) = &extracted.items[1] else {
        unreachable!("second ref is the OCSP ref");
    };
    assert!(ocsp.digest.is_none());
    assert_eq!(ocsp.responder_id.as_deref(), Some("CN=OCSP"));
    assert_eq!(
        ocsp.produced_at.map(|t| t.to_rfc3339()),
        Some("2026-10-18T08:08:18+00:00".to_owned())
    );

    // missing lists are empty, not malformed
    assert_eq!(jades.revocation_refs(&property("arRefs", json!({}))), Default::default());

    let wrong_shape = jades.revocation_refs(&property("arRefs", json!("none")));
    assert_eq!(wrong_shape.issues.len(), 1);
}

#[test]
fn values() {
    let jades = Jades::default();

    let certificates = jades.certificate_values(&property(
        "xVals",
        json!([
            { "x509Cert": { "val": encode(CA) } },
            { "x509Cert": { "val": encode(CRL) } },
            { "otherCert": { "val": "AA==" } },
            { "x509Cert": { "val": encode(SIGNER) } },
        ]),
    ));
    assert_eq!(certificates.items.len(), 2);
    assert_eq!(certificates.issues.len(), 2);
    assert!(certificates
        .issues
        .iter()
        .all(|i| i.kind == ExtractionErrorKind::CertificateMalformed));

    let revocations = jades.revocation_values(&property(
        "rVals",
        json!({
            "crlVals": [{ "val": encode(CRL) }, { "val": encode(CA) }],
            "ocspVals": [{ "val": encode(OCSP) }, { "value": "" }],
        }),
    ));
    assert_eq!(revocations.items.len(), 2);
    assert!(matches!(revocations.items[0], RevocationValue::Crl(_)));
    assert!(matches!(revocations.items[1], RevocationValue::Ocsp(_)));

    let kinds: Vec<_> = revocations.issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![ExtractionErrorKind::CrlMalformed, ExtractionErrorKind::OcspMalformed]
    );
}

#[test]
fn other_cert_values_are_certificates() {
    let jades = Jades::default();

    let certificates = jades.certificate_values(&property(
        "xVals",
        json!([
            { "otherCert": { "val": encode(CA) } },
            { "x509Cert": { "val": encode(SIGNER) } },
        ]),
    ));
    assert!(certificates.issues.is_empty());
    assert_eq!(certificates.items.len(), 2);
    assert_eq!(certificates.items[0].der(), CA);
}

#[test]
fn timestamp_validation_data() {
    let jades = Jades::default();
    let (values, issues) = jades.timestamp_validation_data(&property(
        "tstVD",
        json!({
            "xVals": [{ "x509Cert": { "val": encode(CA) } }],
            "rVals": { "crlVals": [{ "val": encode(CRL) }] },
        }),
    ));
    assert!(issues.is_empty());
    assert_eq!(values.certificates.len(), 1);
    assert_eq!(values.revocations.len(), 1);

    let (values, issues) = jades.timestamp_validation_data(&property("tstVD", json!("nope")));
    assert!(values.certificates.is_empty());
    assert_eq!(issues[0].kind, ExtractionErrorKind::EvidenceContainerMalformed);
}

#[test]
fn timestamp_tokens() {
    let jades = Jades::default();

    let container = property(
        "sigTst",
        json!({
            "tstTokens": [
                { "val": encode(TST1) },
                { "encoding": "", "val": encode(TST2) },
                { "encoding": "http://uri.etsi.org/01903/v1.2.2#BER", "val": encode(TST1) },
                { "val": encode(CA) },
                { "type": "cms" },
            ],
            "canonAlg": "http://www.w3.org/2001/10/xml-exc-c14n#",
        }),
    );
    let tokens = jades.timestamp_tokens(&container, AttributeKind::SignatureTimestamp);

    assert_eq!(tokens.items.len(), 2);
    assert_eq!(tokens.items[0].proof.token_der(), TST1);
    assert_eq!(tokens.items[1].proof.token_der(), TST2);
    assert_eq!(
        tokens.items[0].canonicalization_method.as_deref(),
        Some("http://www.w3.org/2001/10/xml-exc-c14n#")
    );

    let kinds: Vec<_> = tokens.issues.iter().map(|i| i.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ExtractionErrorKind::UnsupportedTokenEncoding,
            ExtractionErrorKind::TimeStampTokenMalformed,
            ExtractionErrorKind::TimeStampTokenMalformed,
        ]
    );

    for malformed in [json!("x"), json!([]), json!({ "tokens": [] })] {
        let container = property("sigTst", malformed);
        let tokens = jades.timestamp_tokens(&container, AttributeKind::SignatureTimestamp);
        assert!(tokens.items.is_empty());
        assert_eq!(
            tokens.issues[0].kind,
            ExtractionErrorKind::TimeStampContainerMalformed
        );
    }
}

#[test]
fn additional_token_encodings() {
    let jades = Jades::new(&TimestampSettings {
        accepted_token_encodings: vec!["urn:example:der".to_owned()],
        ..Default::default()
    });

    let container = property(
        "sigTst",
        json!({ "tstTokens": [
            { "encoding": "urn:example:der", "val": encode(TST1) },
            { "encoding": "http://uri.etsi.org/01903/v1.2.2#DER", "val": encode(TST2) },
        ] }),
    );
    let tokens = jades.timestamp_tokens(&container, AttributeKind::SignatureTimestamp);
    assert_eq!(tokens.items.len(), 1);
    assert_eq!(tokens.issues.len(), 1);
}

#[test]
fn archive_tokens_are_nested() {
    let jades = Jades::default();
    let arc_tst = property(
        "arcTst",
        json!({ "tstContainer": tst_container(&[TST1, TST2]), "timeStamped": "all" }),
    );

    let tokens = jades.timestamp_tokens(&arc_tst, AttributeKind::ArchiveTimestamp);
    assert_eq!(tokens.items.len(), 2);
    assert!(tokens.issues.is_empty());

    // without the wrapper there is no container
    let bare = property("arcTst", tst_container(&[TST1]));
    let tokens = jades.timestamp_tokens(&bare, AttributeKind::ArchiveTimestamp);
    assert!(tokens.items.is_empty());
    assert_eq!(
        tokens.issues[0].kind,
        ExtractionErrorKind::TimeStampContainerMalformed
    );
}

#[test]
fn archive_timestamp_type() {
    let jades = Jades::default();
    let kind_of = |value: Value| jades.archive_timestamp_type(&property("arcTst", value));

    let container = tst_container(&[TST1]);

    assert_eq!(
        kind_of(json!({ "tstContainer": container })),
        (ArchiveTimestampType::All, None)
    );
    assert_eq!(
        kind_of(json!({ "tstContainer": container, "timeStamped": "all" })),
        (ArchiveTimestampType::All, None)
    );
    assert_eq!(
        kind_of(json!({ "tstContainer": container, "timeStamped": "previousArcTst" })),
        (ArchiveTimestampType::PreviousOnly, None)
    );

    for unrecognized in [json!("PreviousArcTst"), json!(1), json!(null)] {
        let (kind, issue) =
            kind_of(json!({ "tstContainer": container, "timeStamped": unrecognized }));
        assert_eq!(kind, ArchiveTimestampType::All);
        assert_eq!(
            issue.map(|i| i.kind),
            Some(ExtractionErrorKind::ArchiveCoverageUnrecognized)
        );
    }
}

#[test]
fn counter_signature() {
    let jades = Jades::default();

    let nested = jws(b"counter", &[CA], vec![json!({ "sigTst": tst_container(&[TST2]) })]);
    let signature = jades
        .counter_signature(&property("cSig", nested))
        .unwrap();
    assert_eq!(signature.signature_value(), b"counter");
    assert_eq!(signature.unsigned_properties().len(), 1);

    let err = jades
        .counter_signature(&property("cSig", json!({ "signature": "" })))
        .unwrap_err();
    assert_eq!(err.kind, ExtractionErrorKind::CounterSignatureMalformed);
    assert_eq!(err.attribute, "cSig");
}
