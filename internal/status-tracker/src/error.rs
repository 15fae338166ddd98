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

use std::borrow::Cow;

/// A `ValidationError` describes a condition that was found while resolving
/// the time-stamp evidence of a signature.
pub trait ValidationError {
    /// Returns the validation code for the error condition.
    ///
    /// See [`validation_codes`](crate::validation_codes).
    fn validation_code(&self) -> &'static str;

    /// Returns the name of the signature property where the error condition
    /// was identified.
    ///
    /// May return `None` if the error condition does not pertain to a
    /// specific property.
    fn property_name(&self) -> Option<Cow<'static, str>>;
}
