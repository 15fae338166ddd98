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

//! Resolution of the time-stamp evidence of one signature.
//!
//! [`TimestampSource`] walks the unsigned properties of a signature once,
//! in document order, carrying the certificate and revocation pools and the
//! time-stamps seen so far. Each time-stamp is bound to the references that
//! are known at its position, so later archive time-stamps see the coverage
//! of all earlier ones.

use ades_crypto::{certificate::CertificateToken, Identifier};
use ades_status_tracker::{
    log_item, validation_codes, validation_codes::log_kind, LogKind, StatusTracker,
    ValidationError,
};
use log::{debug, warn};

use crate::{
    data_builder::TimestampDataBuilder,
    error::{Error, ExtractionError, ExtractionErrorKind, Result},
    format::{AttributeKind, TimestampAttributeFormat},
    jades::header_names::X5C,
    pool::{CertificatePool, RevocationPool},
    reference::{ReferenceSet, TimestampedReference},
    settings::{self, TimestampSettings},
    time_stamp::{ArchiveTimestampType, Location, TimestampToken, TimestampType},
    Signature, SignatureProperty,
};

/// Resolves the time-stamps of a [`Signature`] in a given format.
pub struct TimestampSource<'a, F: TimestampAttributeFormat> {
    format: &'a F,
    signature: &'a Signature,
    settings: TimestampSettings,
}

impl<'a, F: TimestampAttributeFormat> TimestampSource<'a, F> {
    /// Creates a source using the settings of the current thread.
    pub fn new(format: &'a F, signature: &'a Signature) -> Self {
        Self::with_settings(format, signature, settings::timestamp_settings())
    }

    pub fn with_settings(
        format: &'a F,
        signature: &'a Signature,
        settings: TimestampSettings,
    ) -> Self {
        Self {
            format,
            signature,
            settings,
        }
    }

    pub fn signature(&self) -> &Signature {
        self.signature
    }

    /// Resolves every time-stamp of the signature.
    ///
    /// Recoverable problems are logged to `tracker` and the offending item
    /// is skipped; if `tracker` stops on the first error the first such
    /// problem is returned as [`Error::Extraction`] instead. A counter
    /// signature cycle or excessive nesting always fails.
    pub fn resolve(&self, tracker: &mut StatusTracker) -> Result<ResolvedTimestamps> {
        let mut ancestors = Vec::new();
        self.resolve_signature(self.signature, &mut ancestors, tracker)
    }

    fn resolve_signature(
        &self,
        signature: &Signature,
        ancestors: &mut Vec<Identifier>,
        tracker: &mut StatusTracker,
    ) -> Result<ResolvedTimestamps> {
        if ancestors.contains(signature.id()) {
            let err = Error::CounterSignatureCycle {
                signature_id: signature.id().to_string(),
            };
            log_item!(
                signature.id().to_string(),
                "counter signature refers back to an ancestor",
                "TimestampSource::resolve"
            )
            .validation_status(validation_codes::COUNTER_SIGNATURE_CYCLE)
            .failure_no_throw(tracker, &err);
            return Err(err);
        }

        if ancestors.len() > self.settings.max_counter_signature_depth {
            let err = Error::CounterSignatureDepthExceeded {
                max_depth: self.settings.max_counter_signature_depth,
            };
            log_item!(
                signature.id().to_string(),
                "counter signatures nested too deeply",
                "TimestampSource::resolve"
            )
            .validation_status(validation_codes::COUNTER_SIGNATURE_DEPTH_EXCEEDED)
            .failure_no_throw(tracker, &err);
            return Err(err);
        }

        ancestors.push(signature.id().clone());
        tracker.push_signature_id(signature.id().as_str());

        let result = self.fold(signature, ancestors, tracker);

        tracker.pop_signature_id();
        ancestors.pop();

        result
    }

    fn fold(
        &self,
        signature: &Signature,
        ancestors: &mut Vec<Identifier>,
        tracker: &mut StatusTracker,
    ) -> Result<ResolvedTimestamps> {
        let mut resolved = ResolvedTimestamps::new(signature);

        route_issues(signature.issues().iter().cloned(), tracker)?;

        for der in signature.certificates() {
            match CertificateToken::from_der(der) {
                Ok(certificate) => {
                    resolved.certificate_pool.add_certificate(certificate);
                }
                Err(e) => {
                    let issue = ExtractionError::new(
                        X5C,
                        ExtractionErrorKind::CertificateMalformed,
                        e.to_string(),
                    );
                    route_issue(issue, tracker)?;
                }
            }
        }

        for (index, property) in signature.signed_properties().iter().enumerate() {
            let kind = self.format.classify(property);
            let supported = match kind {
                AttributeKind::ContentTimestamp => true,
                AttributeKind::AllDataObjectsTimestamp => {
                    self.format.supports_all_data_objects_timestamps()
                }
                AttributeKind::IndividualDataObjectsTimestamp => {
                    self.format.supports_individual_data_objects_timestamps()
                }
                _ => false,
            };
            if !supported {
                continue;
            }

            if let Some(timestamp_type) = kind.timestamp_type(ArchiveTimestampType::All) {
                let references: ReferenceSet =
                    std::iter::once(signature.signed_data_reference()).collect();
                let tokens = self.build_tokens(
                    property,
                    kind,
                    timestamp_type,
                    &references,
                    Location::Signed(index),
                    tracker,
                )?;
                resolved.timestamps.extend(tokens);
            }
        }

        for (index, property) in signature.unsigned_properties().iter().enumerate() {
            let location = Location::Unsigned(index);
            let kind = self.format.classify(property);

            match kind {
                AttributeKind::CompleteCertificateRefs
                | AttributeKind::AttributeCertificateRefs => {
                    let extracted = self.format.certificate_refs(property);
                    route_issues(extracted.issues, tracker)?;
                    for certificate_ref in extracted.items {
                        resolved.certificate_pool.add_ref(certificate_ref);
                    }
                }

                AttributeKind::CompleteRevocationRefs
                | AttributeKind::AttributeRevocationRefs => {
                    let extracted = self.format.revocation_refs(property);
                    route_issues(extracted.issues, tracker)?;
                    for revocation_ref in extracted.items {
                        resolved.revocation_pool.add_ref(revocation_ref);
                    }
                }

                AttributeKind::CertificateValues | AttributeKind::AttrAuthoritiesCertValues => {
                    let extracted = self.format.certificate_values(property);
                    route_issues(extracted.issues, tracker)?;
                    for certificate in extracted.items {
                        resolved.certificate_pool.add_certificate(certificate);
                    }
                }

                AttributeKind::RevocationValues
                | AttributeKind::AttributeRevocationValues => {
                    let extracted = self.format.revocation_values(property);
                    route_issues(extracted.issues, tracker)?;
                    for value in extracted.items {
                        resolved.revocation_pool.add_value(value);
                    }
                }

                AttributeKind::TimestampValidationData => {
                    let (values, issues) = self.format.timestamp_validation_data(property);
                    route_issues(issues, tracker)?;
                    for certificate in values.certificates {
                        resolved.certificate_pool.add_certificate(certificate);
                    }
                    for value in values.revocations {
                        resolved.revocation_pool.add_value(value);
                    }
                }

                AttributeKind::SignatureTimestamp => {
                    let references = resolved.signature_timestamp_references();
                    let tokens = self.build_tokens(
                        property,
                        kind,
                        TimestampType::Signature,
                        &references,
                        location,
                        tracker,
                    )?;
                    resolved.timestamps.extend(tokens);
                }

                AttributeKind::RefsOnlyTimestamp => {
                    let references = resolved.validation_data_ref_references();
                    let tokens = self.build_tokens(
                        property,
                        kind,
                        TimestampType::ValidationDataRefsOnly,
                        &references,
                        location,
                        tracker,
                    )?;
                    resolved.timestamps.extend(tokens);
                }

                AttributeKind::SigAndRefsTimestamp => {
                    let mut references = resolved.signature_timestamp_references();
                    references.extend(resolved.validation_data_ref_references());
                    let tokens = self.build_tokens(
                        property,
                        kind,
                        TimestampType::ValidationData,
                        &references,
                        location,
                        tracker,
                    )?;
                    resolved.timestamps.extend(tokens);
                }

                AttributeKind::ArchiveTimestamp => {
                    let (archive_type, issue) = self.format.archive_timestamp_type(property);
                    route_issues(issue, tracker)?;

                    let references = match archive_type {
                        ArchiveTimestampType::All => resolved.archive_references(),
                        ArchiveTimestampType::PreviousOnly => resolved.previous_timestamps(),
                    };
                    let tokens = self.build_tokens(
                        property,
                        kind,
                        TimestampType::Archive(archive_type),
                        &references,
                        location,
                        tracker,
                    )?;
                    resolved.timestamps.extend(tokens);
                }

                AttributeKind::CounterSignature => match self.format.counter_signature(property) {
                    Ok(counter_signature) => {
                        let nested =
                            self.resolve_signature(&counter_signature, ancestors, tracker)?;
                        debug!(
                            "counter signature {} contributes {} references",
                            nested.signature_id(),
                            nested.references().len()
                        );
                        resolved
                            .counter_signature_references
                            .extend(nested.references());
                    }
                    Err(issue) => route_issue(issue, tracker)?,
                },

                AttributeKind::ContentTimestamp
                | AttributeKind::AllDataObjectsTimestamp
                | AttributeKind::IndividualDataObjectsTimestamp
                | AttributeKind::Unknown => {
                    debug!("ignoring unsigned property {}", property.name());
                }
            }
        }

        Ok(resolved)
    }

    /// Builds one token per proof found in `property`, each covering
    /// `references`.
    ///
    /// Fails with [`Error::BadParam`] if `property` is not a time-stamp
    /// bearing property of this format.
    pub fn make_timestamp_tokens(
        &self,
        property: &SignatureProperty,
        timestamp_type: TimestampType,
        references: &ReferenceSet,
        location: Location,
        tracker: &mut StatusTracker,
    ) -> Result<Vec<TimestampToken>> {
        let kind = self.format.classify(property);
        if !kind.is_timestamp() {
            return Err(Error::BadParam(format!(
                "{} does not hold time-stamp tokens",
                property.name()
            )));
        }

        self.build_tokens(property, kind, timestamp_type, references, location, tracker)
    }

    /// Like [`Self::make_timestamp_tokens`], for a property that must hold
    /// exactly one token.
    pub fn make_timestamp_token(
        &self,
        property: &SignatureProperty,
        timestamp_type: TimestampType,
        references: &ReferenceSet,
        location: Location,
        tracker: &mut StatusTracker,
    ) -> Result<TimestampToken> {
        let mut tokens =
            self.make_timestamp_tokens(property, timestamp_type, references, location, tracker)?;

        match tokens.len() {
            1 => tokens.pop().ok_or(Error::NotFound),
            0 => Err(Error::NoTimeStampToken {
                attribute: property.name().to_owned(),
            }),
            count => Err(Error::MultipleTimeStampTokens {
                attribute: property.name().to_owned(),
                count,
            }),
        }
    }

    /// Returns the bytes the message imprint of an archive time-stamp is
    /// computed over, as assembled by `builder`.
    ///
    /// `canonicalization_method` overrides the method declared by the
    /// token's container.
    pub fn archive_timestamp_data<B: TimestampDataBuilder>(
        &self,
        builder: &B,
        token: &TimestampToken,
        canonicalization_method: Option<&str>,
    ) -> Result<Vec<u8>> {
        let Some(kind) = token.archive_timestamp_type() else {
            return Err(Error::BadParam(format!(
                "time-stamp {} is not an archive time-stamp",
                token.id()
            )));
        };

        let canonicalization_method =
            canonicalization_method.or_else(|| token.canonicalization_method());

        builder.archive_timestamp_data(self.signature, token, canonicalization_method, kind)
    }

    fn build_tokens(
        &self,
        property: &SignatureProperty,
        kind: AttributeKind,
        timestamp_type: TimestampType,
        references: &ReferenceSet,
        location: Location,
        tracker: &mut StatusTracker,
    ) -> Result<Vec<TimestampToken>> {
        let extracted = self.format.timestamp_tokens(property, kind);
        route_issues(extracted.issues, tracker)?;

        let tokens: Vec<TimestampToken> = extracted
            .items
            .into_iter()
            .map(|encoded| {
                TimestampToken::new(
                    timestamp_type,
                    property.name(),
                    location,
                    encoded.canonicalization_method,
                    encoded.proof,
                    references.clone(),
                    property.raw(),
                )
            })
            .collect();

        for token in &tokens {
            log_item!(
                property.name().to_owned(),
                format!("time-stamp {} covers {} objects", token.id(), references.len()),
                "TimestampSource::make_timestamp_tokens"
            )
            .validation_status(validation_codes::TIMESTAMP_EXTRACTED)
            .success(tracker);
        }

        Ok(tokens)
    }
}

/// Logs `issue` to `tracker`.
///
/// Fails with [`Error::Extraction`] only if the issue is an error and
/// `tracker` stops on the first error.
fn route_issue(issue: ExtractionError, tracker: &mut StatusTracker) -> Result<()> {
    let code = issue.validation_code();
    let item = log_item!(issue.attribute.clone(), issue.reason.clone(), "TimestampSource::resolve")
        .validation_status(code);

    match log_kind(code) {
        LogKind::Failure => {
            warn!("skipped malformed evidence: {issue}");
            item.failure(tracker, issue)?;
        }
        LogKind::Informational | LogKind::Success => {
            warn!("{issue}");
            item.informational(tracker);
        }
    }

    Ok(())
}

fn route_issues<I: IntoIterator<Item = ExtractionError>>(
    issues: I,
    tracker: &mut StatusTracker,
) -> Result<()> {
    for issue in issues {
        route_issue(issue, tracker)?;
    }
    Ok(())
}

/// The product of one resolution pass.
#[derive(Clone, Debug)]
pub struct ResolvedTimestamps {
    signature_reference: TimestampedReference,
    signed_data_reference: TimestampedReference,
    timestamps: Vec<TimestampToken>,
    certificate_pool: CertificatePool,
    revocation_pool: RevocationPool,
    counter_signature_references: ReferenceSet,
}

impl ResolvedTimestamps {
    fn new(signature: &Signature) -> Self {
        Self {
            signature_reference: signature.reference(),
            signed_data_reference: signature.signed_data_reference(),
            timestamps: Vec::new(),
            certificate_pool: CertificatePool::new(),
            revocation_pool: RevocationPool::new(),
            counter_signature_references: ReferenceSet::new(),
        }
    }

    pub fn signature_id(&self) -> &Identifier {
        self.signature_reference.object_id()
    }

    /// All time-stamps: content time-stamps first, then the unsigned ones
    /// in document order.
    pub fn timestamps(&self) -> &[TimestampToken] {
        &self.timestamps
    }

    pub fn into_timestamps(self) -> Vec<TimestampToken> {
        self.timestamps
    }

    pub fn content_timestamps(&self) -> impl Iterator<Item = &TimestampToken> {
        self.timestamps
            .iter()
            .filter(|t| t.timestamp_type().is_content_timestamp())
    }

    pub fn signature_timestamps(&self) -> impl Iterator<Item = &TimestampToken> {
        self.timestamps
            .iter()
            .filter(|t| t.timestamp_type() == TimestampType::Signature)
    }

    /// Refs-only and sig-and-refs time-stamps.
    pub fn validation_data_timestamps(&self) -> impl Iterator<Item = &TimestampToken> {
        self.timestamps.iter().filter(|t| {
            matches!(
                t.timestamp_type(),
                TimestampType::ValidationDataRefsOnly | TimestampType::ValidationData
            )
        })
    }

    pub fn archive_timestamps(&self) -> impl Iterator<Item = &TimestampToken> {
        self.timestamps
            .iter()
            .filter(|t| t.timestamp_type().is_archive_timestamp())
    }

    pub fn certificate_pool(&self) -> &CertificatePool {
        &self.certificate_pool
    }

    pub fn revocation_pool(&self) -> &RevocationPool {
        &self.revocation_pool
    }

    pub fn signature_reference(&self) -> &TimestampedReference {
        &self.signature_reference
    }

    /// References to the signed content.
    pub fn all_signed_data_references(&self) -> ReferenceSet {
        std::iter::once(self.signed_data_reference.clone()).collect()
    }

    /// References to every certificate and revocation object, by value or
    /// by ref.
    pub fn encapsulated_references(&self) -> ReferenceSet {
        let mut references = self.certificate_pool.references();
        references.extend(self.revocation_pool.references());
        references
    }

    /// Each time-stamp followed by the references it covers.
    pub fn timestamp_references(&self) -> ReferenceSet {
        let mut references = ReferenceSet::new();
        for token in &self.timestamps {
            references.insert(token.reference());
            references.extend(token.covered_references());
        }
        references
    }

    /// References spliced in from counter signatures.
    pub fn counter_signature_references(&self) -> &ReferenceSet {
        &self.counter_signature_references
    }

    /// Everything this signature contributes when it is itself counter
    /// signed or archived.
    pub fn references(&self) -> ReferenceSet {
        let mut references = ReferenceSet::new();
        references.insert(self.signature_reference.clone());
        references.extend(self.all_signed_data_references());
        references.extend(self.encapsulated_references());
        references.extend(self.timestamp_references());
        references.extend(&self.counter_signature_references);
        references
    }

    fn signature_timestamp_references(&self) -> ReferenceSet {
        std::iter::once(self.signature_reference.clone()).collect()
    }

    fn validation_data_ref_references(&self) -> ReferenceSet {
        let mut references = self.certificate_pool.ref_references();
        references.extend(self.revocation_pool.ref_references());
        references
    }

    fn previous_timestamps(&self) -> ReferenceSet {
        self.timestamps.iter().map(TimestampToken::reference).collect()
    }

    fn archive_references(&self) -> ReferenceSet {
        let mut references = self.signature_timestamp_references();
        references.extend(self.all_signed_data_references());
        references.extend(self.encapsulated_references());
        references.extend(self.timestamp_references());
        references.extend(&self.counter_signature_references);
        references
    }
}

/// Resolves many signatures at once, one worker thread per signature.
///
/// Each worker gets its own accumulators and its own status tracker,
/// configured from `settings`. Results are returned in input order.
pub fn resolve_signatures<F: TimestampAttributeFormat>(
    format: &F,
    signatures: &[Signature],
    settings: &TimestampSettings,
) -> Vec<(Result<ResolvedTimestamps>, StatusTracker)> {
    std::thread::scope(|scope| {
        let workers: Vec<_> = signatures
            .iter()
            .map(|signature| {
                scope.spawn(move || {
                    let mut tracker = settings.status_tracker();
                    let result = TimestampSource::with_settings(format, signature, settings.clone())
                        .resolve(&mut tracker);
                    (result, tracker)
                })
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| {
                worker.join().unwrap_or_else(|_| {
                    (
                        Err(Error::OtherError("time-stamp worker panicked".into())),
                        settings.status_tracker(),
                    )
                })
            })
            .collect()
    })
}
