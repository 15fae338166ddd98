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

//! Decoding of [RFC 3161] time-stamp tokens.
//!
//! [RFC 3161]: https://www.ietf.org/rfc/rfc3161.txt

mod asn1;
pub use asn1::{Accuracy, MessageImprint, TstInfo};

mod error;
pub use error::TimeStampError;

mod proof;
pub use proof::TimeStampProof;
