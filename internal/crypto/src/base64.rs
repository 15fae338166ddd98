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

//! Base64 convenience functions.

use ::base64::{engine::general_purpose, DecodeError, Engine as _};

/// Encode a byte slice to Base64 string using the standard alphabet with
/// padding.
pub fn encode(data: &[u8]) -> String {
    general_purpose::STANDARD.encode(data)
}

/// Decode a Base 64 string into a byte slice.
///
/// Whitespace (line breaks in particular) is ignored, since embedded
/// certificates are frequently wrapped at 64 or 76 columns.
pub fn decode(data: &str) -> Result<Vec<u8>, DecodeError> {
    if data.chars().any(char::is_whitespace) {
        let compact: String = data.chars().filter(|c| !c.is_whitespace()).collect();
        general_purpose::STANDARD.decode(compact)
    } else {
        general_purpose::STANDARD.decode(data)
    }
}

/// Decode a base64url string (as used by JWS components) into a byte slice.
///
/// Trailing padding is tolerated.
pub fn decode_url(data: &str) -> Result<Vec<u8>, DecodeError> {
    general_purpose::URL_SAFE_NO_PAD.decode(data.trim_end_matches('='))
}

/// Encode a byte slice as unpadded base64url.
pub fn encode_url(data: &[u8]) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(data)
}
