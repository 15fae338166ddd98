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

//! Certificate revocation lists carried as validation evidence.

use chrono::{DateTime, Utc};
use thiserror::Error;
use x509_parser::prelude::ASN1Time;

use crate::{hash::DigestAlgorithm, Identifier};

/// A decoded CRL.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CrlBinary {
    id: Identifier,
    der: Vec<u8>,
    this_update: DateTime<Utc>,
    next_update: Option<DateTime<Utc>>,
}

impl CrlBinary {
    /// Decodes a DER `CertificateList`.
    ///
    /// `revokedCertificates` may be absent, as it is in every CRL that
    /// revokes nothing.
    pub fn from_der(der: &[u8]) -> Result<Self, CrlError> {
        let (rem, crl) = x509_parser::parse_x509_crl(der)
            .map_err(|e| CrlError::DecodeError(e.to_string()))?;

        if !rem.is_empty() {
            return Err(CrlError::DecodeError(format!(
                "{} trailing bytes after CertificateList",
                rem.len()
            )));
        }

        Ok(Self {
            id: Identifier::from_bytes(Identifier::REVOCATION, der),
            der: der.to_vec(),
            this_update: asn1_time_to_datetime(crl.last_update())?,
            next_update: crl.next_update().map(asn1_time_to_datetime).transpose()?,
        })
    }

    /// Returns the CRL's identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Returns the CRL's DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Issue date of this CRL.
    pub fn this_update(&self) -> DateTime<Utc> {
        self.this_update
    }

    /// Date by which the next CRL will be issued, if announced.
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.next_update
    }

    /// Hashes the DER encoding with `alg`.
    pub fn digest(&self, alg: DigestAlgorithm) -> Vec<u8> {
        alg.digest(&self.der)
    }
}

fn asn1_time_to_datetime(t: ASN1Time) -> Result<DateTime<Utc>, CrlError> {
    DateTime::from_timestamp(t.timestamp(), 0)
        .ok_or_else(|| CrlError::DecodeError(format!("time {t} is out of range")))
}

/// Describes errors that can occur when decoding a CRL.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum CrlError {
    /// The bytes are not a DER-encoded CRL.
    #[error("unable to decode CRL: {0}")]
    DecodeError(String),
}
