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

use thiserror::Error;

/// Describes errors that can occur when decoding a time-stamp token.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum TimeStampError {
    /// The bytes are neither a `TimeStampToken` nor a `TimeStampResp`.
    #[error("unable to decode time stamp: {0}")]
    DecodeError(String),

    /// A `TimeStampResp` was decoded but it carried no token.
    #[error("time stamp response contains no token")]
    NoToken,

    /// The token is not CMS signed data.
    #[error("time stamp has invalid content type")]
    InvalidContentType,

    /// The signed data does not encapsulate a `TSTInfo`.
    #[error("time stamp has no TSTInfo content")]
    NoTstInfo,
}
