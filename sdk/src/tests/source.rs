// Copyright 2025 Adobe. All rights reserved.
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

use std::{cell::RefCell, sync::Mutex};

use ades_crypto::base64::encode;
use ades_status_tracker::{validation_codes, ErrorBehavior, StatusTracker};
use log::{Level, Log, Metadata, Record};
use serde_json::json;

use super::fixtures::{jws, tst_container, TST1, TST2};
use crate::{
    jades::Jades,
    reference::{ReferenceSet, TimestampedObjectType, TimestampedReference},
    settings::TimestampSettings,
    time_stamp::{ArchiveTimestampType, Location, TimestampToken, TimestampType},
    Error, Result, Signature, SignatureProperty, TimestampDataBuilder, TimestampSource,
};

const C14N: &str = "http://www.w3.org/2001/10/xml-exc-c14n#";

#[derive(Default)]
struct RecordingBuilder {
    calls: RefCell<Vec<(Option<String>, ArchiveTimestampType)>>,
}

impl TimestampDataBuilder for RecordingBuilder {
    fn archive_timestamp_data(
        &self,
        signature: &Signature,
        token: &TimestampToken,
        canonicalization_method: Option<&str>,
        kind: ArchiveTimestampType,
    ) -> Result<Vec<u8>> {
        self.calls
            .borrow_mut()
            .push((canonicalization_method.map(str::to_owned), kind));

        let mut data = signature.signature_value().to_vec();
        data.extend_from_slice(token.encoded_proof());
        Ok(data)
    }
}

fn signature() -> Signature {
    let value = jws(
        b"source",
        &[],
        vec![
            json!({ "sigTst": tst_container(&[TST1]) }),
            json!({
                "arcTst": {
                    "tstContainer": {
                        "tstTokens": [{ "val": encode(TST2) }],
                        "canonAlg": C14N,
                    },
                    "timeStamped": "previousArcTst",
                },
            }),
        ],
    );
    Jades::default().signature_from_json(&value).unwrap()
}

fn source<'a>(format: &'a Jades, signature: &'a Signature) -> TimestampSource<'a, Jades> {
    TimestampSource::with_settings(format, signature, TimestampSettings::default())
}

#[test]
fn archive_timestamp_data_is_delegated() {
    let format = Jades::default();
    let signature = signature();
    let source = source(&format, &signature);

    let resolved = source.resolve(&mut StatusTracker::default()).unwrap();
    let archive = resolved.archive_timestamps().next().unwrap();

    let builder = RecordingBuilder::default();
    let data = source
        .archive_timestamp_data(&builder, archive, None)
        .unwrap();
    assert!(data.starts_with(b"source"));
    assert!(data.ends_with(TST2));

    source
        .archive_timestamp_data(&builder, archive, Some("urn:example:c14n"))
        .unwrap();

    assert_eq!(
        *builder.calls.borrow(),
        vec![
            (Some(C14N.to_owned()), ArchiveTimestampType::PreviousOnly),
            (
                Some("urn:example:c14n".to_owned()),
                ArchiveTimestampType::PreviousOnly
            ),
        ]
    );
}

#[test]
fn archive_timestamp_data_needs_an_archive_token() {
    let format = Jades::default();
    let signature = signature();
    let source = source(&format, &signature);

    let resolved = source.resolve(&mut StatusTracker::default()).unwrap();
    let signature_timestamp = resolved.signature_timestamps().next().unwrap();

    let builder = RecordingBuilder::default();
    assert!(matches!(
        source.archive_timestamp_data(&builder, signature_timestamp, None),
        Err(Error::BadParam(_))
    ));
    assert!(builder.calls.borrow().is_empty());
}

#[test]
fn make_timestamp_tokens() {
    let format = Jades::default();
    let signature = signature();
    let source = source(&format, &signature);
    let mut tracker = StatusTracker::default();

    let references: ReferenceSet = [TimestampedReference::new(
        signature.id().clone(),
        TimestampedObjectType::Signature,
    )]
    .into_iter()
    .collect();

    let property = SignatureProperty::from_value("sigTst", tst_container(&[TST1, TST2]));
    let tokens = source
        .make_timestamp_tokens(
            &property,
            TimestampType::Signature,
            &references,
            Location::Unsigned(7),
            &mut tracker,
        )
        .unwrap();

    assert_eq!(tokens.len(), 2);
    for token in &tokens {
        assert_eq!(token.location(), Location::Unsigned(7));
        assert_eq!(token.covered_references(), &references);
        assert!(token.matches_container(property.raw()));
    }
    let extracted = tracker
        .logged_items()
        .iter()
        .filter(|i| i.validation_status.as_deref() == Some(validation_codes::TIMESTAMP_EXTRACTED))
        .count();
    assert_eq!(extracted, 2);

    let values = SignatureProperty::from_value("xVals", json!([]));
    assert!(matches!(
        source.make_timestamp_tokens(
            &values,
            TimestampType::Signature,
            &references,
            Location::Unsigned(0),
            &mut tracker,
        ),
        Err(Error::BadParam(_))
    ));
}

#[test]
fn make_single_timestamp_token() {
    let format = Jades::default();
    let signature = signature();
    let source = source(&format, &signature);
    let mut tracker = StatusTracker::default();
    let references = ReferenceSet::new();

    let make = |property: &SignatureProperty, tracker: &mut StatusTracker| {
        source.make_timestamp_token(
            property,
            TimestampType::Signature,
            &references,
            Location::Unsigned(0),
            tracker,
        )
    };

    let one = SignatureProperty::from_value("sigTst", tst_container(&[TST2]));
    assert_eq!(make(&one, &mut tracker).unwrap().encoded_proof(), TST2);

    let none = SignatureProperty::from_value("sigTst", tst_container(&[]));
    assert!(matches!(
        make(&none, &mut tracker),
        Err(Error::NoTimeStampToken { attribute }) if attribute == "sigTst"
    ));

    let two = SignatureProperty::from_value("sigTst", tst_container(&[TST1, TST2]));
    assert!(matches!(
        make(&two, &mut tracker),
        Err(Error::MultipleTimeStampTokens { count: 2, .. })
    ));
}

#[test]
fn strict_tracker_stops_on_malformed_token() {
    let format = Jades::default();
    let signature = signature();
    let source = source(&format, &signature);

    let property = SignatureProperty::from_value(
        "sigTst",
        json!({ "tstTokens": [{ "val": "not a token" }, { "val": encode(TST1) }] }),
    );

    let mut lenient = StatusTracker::default();
    let tokens = source
        .make_timestamp_tokens(
            &property,
            TimestampType::Signature,
            &ReferenceSet::new(),
            Location::Unsigned(0),
            &mut lenient,
        )
        .unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(lenient.has_status(validation_codes::TIMESTAMP_TOKEN_MALFORMED));

    let mut strict = StatusTracker::with_error_behavior(ErrorBehavior::StopOnFirstError);
    let err = source
        .make_timestamp_tokens(
            &property,
            TimestampType::Signature,
            &ReferenceSet::new(),
            Location::Unsigned(0),
            &mut strict,
        )
        .unwrap_err();
    assert!(matches!(err, Error::Extraction(_)));
    assert_eq!(strict.logged_items().len(), 1);
}

struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};

#[test]
fn unrecognized_coverage_is_a_warning() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let value = jws(
        b"coverage",
        &[],
        vec![json!({
            "arcTst": { "tstContainer": tst_container(&[TST1]), "timeStamped": "someArcTst" },
        })],
    );
    let signature = Jades::default().signature_from_json(&value).unwrap();
    let format = Jades::default();

    let mut tracker = StatusTracker::with_error_behavior(ErrorBehavior::StopOnFirstError);
    let resolved = source(&format, &signature).resolve(&mut tracker).unwrap();
    assert_eq!(resolved.archive_timestamps().count(), 1);

    let item = tracker
        .logged_items()
        .iter()
        .find(|i| {
            i.validation_status.as_deref()
                == Some(validation_codes::TIMESTAMP_ARCHIVE_COVERAGE_UNRECOGNIZED)
        })
        .unwrap();
    assert_eq!(item.kind, ades_status_tracker::LogKind::Informational);

    let records = LOGGER.records.lock().unwrap();
    assert!(records
        .iter()
        .any(|(level, message)| *level == Level::Warn && message.contains("someArcTst")));
}
