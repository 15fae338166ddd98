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

use crate::{time_stamp::ArchiveTimestampType, Result, Signature, TimestampToken};

/// Assembles the bytes a time-stamp's message imprint is computed over.
///
/// The concatenation and canonicalization rules are format specific, so
/// [`TimestampSource`](crate::TimestampSource) only ever delegates to an
/// implementation of this trait.
pub trait TimestampDataBuilder {
    /// Returns the message imprint input of the archive time-stamp `token`
    /// of `signature`.
    ///
    /// `canonicalization_method` is the method declared by the token's
    /// container, if any.
    fn archive_timestamp_data(
        &self,
        signature: &Signature,
        token: &TimestampToken,
        canonicalization_method: Option<&str>,
        kind: ArchiveTimestampType,
    ) -> Result<Vec<u8>>;
}
