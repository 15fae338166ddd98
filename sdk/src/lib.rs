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

#![deny(warnings)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg, doc_cfg_hide))]

//! This library resolves the time-stamp evidence of advanced electronic
//! signatures: which time-stamp covers which signature, certificate,
//! revocation value or earlier time-stamp, in what order.
//!
//! # Example: Resolving a JAdES signature
//!
//! ```
//! # use ades_timestamps::Result;
//! use ades_timestamps::{jades::Jades, TimestampSource};
//!
//! # fn main() -> Result<()> {
//! let jades = Jades::default();
//! let signature = jades.parse_signature("eyJhbGciOiJub25lIn0.cGF5bG9hZA.c2ln")?;
//!
//! let mut tracker = ades_timestamps::settings::timestamp_settings().status_tracker();
//! let resolved = TimestampSource::new(&jades, &signature).resolve(&mut tracker)?;
//!
//! for token in resolved.timestamps() {
//!     println!("{} at {}", token.id(), token.generation_time());
//! }
//! # assert!(resolved.timestamps().is_empty());
//! # Ok(())
//! # }
//! ```

pub use ades_crypto;
pub use ades_status_tracker;

mod data_builder;
pub use data_builder::TimestampDataBuilder;

mod error;
pub use error::{Error, ExtractionError, ExtractionErrorKind, Result};

mod format;
pub use format::{
    AttributeKind, EncodedTimestamp, Extracted, TimestampAttributeFormat, ValidationValues,
};

pub mod jades;

mod pool;
pub use pool::{CertificatePool, RevocationPool, RevocationValue};

mod reference;
pub use reference::{
    CertificateRef, CrlRef, Digest, OcspRef, ReferenceSet, RevocationRef, TimestampedObjectType,
    TimestampedReference,
};

pub mod settings;

mod signature;
pub use signature::{Signature, SignatureProperty};

mod source;
pub use source::{resolve_signatures, ResolvedTimestamps, TimestampSource};

mod time_stamp;
pub use time_stamp::{ArchiveTimestampType, Location, TimestampToken, TimestampType};

#[cfg(test)]
pub(crate) mod tests;
