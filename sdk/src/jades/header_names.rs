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

//! Header parameter names defined by ETSI TS 119 182-1.

// -- signed header parameters --
pub const CONTENT_TIMESTAMP: &str = "adoTst";
pub const X5C: &str = "x5c";

// -- unsigned header parameters --
pub const ETSI_U: &str = "etsiU";

pub const SIGNATURE_TIMESTAMP: &str = "sigTst";
pub const COMPLETE_CERTIFICATE_REFS: &str = "xRefs";
pub const ATTRIBUTE_CERTIFICATE_REFS: &str = "axRefs";
pub const COMPLETE_REVOCATION_REFS: &str = "rRefs";
pub const ATTRIBUTE_REVOCATION_REFS: &str = "arRefs";
pub const REFS_ONLY_TIMESTAMP: &str = "rfsTst";
pub const SIG_AND_REFS_TIMESTAMP: &str = "sigRTst";
pub const CERTIFICATE_VALUES: &str = "xVals";
pub const ATTR_AUTHORITIES_CERT_VALUES: &str = "axVals";
pub const REVOCATION_VALUES: &str = "rVals";
pub const ATTRIBUTE_REVOCATION_VALUES: &str = "arVals";
pub const ARCHIVE_TIMESTAMP: &str = "arcTst";
pub const TIMESTAMP_VALIDATION_DATA: &str = "tstVD";
pub const COUNTER_SIGNATURE: &str = "cSig";

// -- members of unsigned header parameters --
pub const TST_CONTAINER: &str = "tstContainer";
pub const TIMESTAMPED: &str = "timeStamped";
pub const ALL: &str = "all";
pub const PREVIOUS_ARC_TST: &str = "previousArcTst";
