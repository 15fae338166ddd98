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

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::sha256;

/// Stable identity of an object that can be covered by a time-stamp.
///
/// An identifier is a one-letter prefix naming the kind of object followed
/// by the upper-case hex SHA-256 of the object's canonical bytes, for example
/// `C-2648BAAC...` for a certificate. Two objects with the same canonical
/// bytes always share an identifier, which is what makes evidence pools
/// deduplicate.
#[cfg_attr(feature = "json_schema", derive(schemars::JsonSchema))]
#[derive(Clone, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Identifier(String);

impl Identifier {
    /// Prefix for signatures.
    pub const SIGNATURE: char = 'S';

    /// Prefix for signed data objects.
    pub const SIGNED_DATA: char = 'D';

    /// Prefix for certificates.
    pub const CERTIFICATE: char = 'C';

    /// Prefix for revocation data (CRLs and OCSP responses).
    pub const REVOCATION: char = 'R';

    /// Prefix for time-stamp tokens.
    pub const TIMESTAMP: char = 'T';

    /// Computes the identifier of `canonical_bytes`.
    pub fn from_bytes(prefix: char, canonical_bytes: &[u8]) -> Self {
        Self::from_sha256(prefix, &sha256(canonical_bytes))
    }

    /// Builds an identifier from an already computed SHA-256 digest.
    pub fn from_sha256(prefix: char, digest: &[u8]) -> Self {
        Self(format!("{prefix}-{}", hex::encode_upper(digest)))
    }

    /// Returns the kind prefix of this identifier.
    pub fn prefix(&self) -> Option<char> {
        self.0.chars().next()
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}
