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

//! X.509 certificates carried as validation evidence.

use rasn_pkix::Certificate;
use thiserror::Error;

use crate::{hash::DigestAlgorithm, Identifier};

/// A certificate that has been decoded at least once, together with its
/// identifier.
///
/// The original DER is kept as-is; identifiers and digests are always
/// computed over those bytes, never over a re-encoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CertificateToken {
    id: Identifier,
    der: Vec<u8>,
}

impl CertificateToken {
    /// Decodes a DER certificate.
    pub fn from_der(der: &[u8]) -> Result<Self, CertificateError> {
        rasn::der::decode::<Certificate>(der)
            .map_err(|e| CertificateError::DecodeError(e.to_string()))?;

        Ok(Self {
            id: Identifier::from_bytes(Identifier::CERTIFICATE, der),
            der: der.to_vec(),
        })
    }

    /// Returns the certificate's identifier.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// Returns the certificate's DER encoding.
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Hashes the DER encoding with `alg`.
    pub fn digest(&self, alg: DigestAlgorithm) -> Vec<u8> {
        alg.digest(&self.der)
    }
}

/// Describes errors that can occur when decoding a certificate.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum CertificateError {
    /// The bytes are not a DER-encoded X.509 certificate.
    #[error("unable to decode certificate: {0}")]
    DecodeError(String),
}
