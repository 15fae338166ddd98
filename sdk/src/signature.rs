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

use ades_crypto::Identifier;
use serde_json::Value;

use crate::{
    error::ExtractionError,
    reference::{TimestampedObjectType, TimestampedReference},
};

/// One entry of a signature's signed or unsigned property list.
///
/// The value is kept untyped; each format validates it into a concrete
/// payload shape when it extracts from it.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureProperty {
    name: String,
    value: Value,
    raw: Vec<u8>,
}

impl SignatureProperty {
    /// Creates a property from its header name, parsed value and the raw
    /// bytes it was read from.
    pub fn new<S: Into<String>>(name: S, value: Value, raw: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            value,
            raw,
        }
    }

    /// Creates a property whose raw bytes are the JSON serialization of
    /// `value`.
    pub fn from_value<S: Into<String>>(name: S, value: Value) -> Self {
        let raw = serde_json::to_vec(&value).unwrap_or_default();
        Self::new(name, value, raw)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Bytes the property was read from; hashed into each token's container
    /// hash.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }
}

/// A signature as seen by time-stamp resolution.
///
/// Built by a container format from its own serialization (see
/// [`crate::jades::Jades::parse_signature`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Signature {
    id: Identifier,
    signed_data_id: Identifier,
    signature_value: Vec<u8>,
    signed_data: Vec<u8>,
    certificates: Vec<Vec<u8>>,
    signed_properties: Vec<SignatureProperty>,
    unsigned_properties: Vec<SignatureProperty>,
    issues: Vec<ExtractionError>,
}

impl Signature {
    /// Assembles a signature from its parts.
    ///
    /// `signed_data` is the exact byte sequence the signature value was
    /// computed over. `issues` are problems met while reading the property
    /// lists; they are reported when the signature is resolved.
    pub fn new(
        signature_value: Vec<u8>,
        signed_data: Vec<u8>,
        certificates: Vec<Vec<u8>>,
        signed_properties: Vec<SignatureProperty>,
        unsigned_properties: Vec<SignatureProperty>,
        issues: Vec<ExtractionError>,
    ) -> Self {
        Self {
            id: Identifier::from_bytes(Identifier::SIGNATURE, &signature_value),
            signed_data_id: Identifier::from_bytes(Identifier::SIGNED_DATA, &signed_data),
            signature_value,
            signed_data,
            certificates,
            signed_properties,
            unsigned_properties,
            issues,
        }
    }

    /// `S-` identifier, computed over the signature value.
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    /// `D-` identifier, computed over the signed data.
    pub fn signed_data_id(&self) -> &Identifier {
        &self.signed_data_id
    }

    pub fn signature_value(&self) -> &[u8] {
        &self.signature_value
    }

    pub fn signed_data(&self) -> &[u8] {
        &self.signed_data
    }

    /// DER certificates carried by the signature itself (JWS `x5c`).
    pub fn certificates(&self) -> &[Vec<u8>] {
        &self.certificates
    }

    pub fn signed_properties(&self) -> &[SignatureProperty] {
        &self.signed_properties
    }

    pub fn unsigned_properties(&self) -> &[SignatureProperty] {
        &self.unsigned_properties
    }

    pub fn issues(&self) -> &[ExtractionError] {
        &self.issues
    }

    pub fn reference(&self) -> TimestampedReference {
        TimestampedReference::new(self.id.clone(), TimestampedObjectType::Signature)
    }

    pub fn signed_data_reference(&self) -> TimestampedReference {
        TimestampedReference::new(self.signed_data_id.clone(), TimestampedObjectType::SignedData)
    }
}
