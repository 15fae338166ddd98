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

use chrono::{TimeZone, Utc};

use crate::crl::CrlBinary;

#[test]
fn decode() {
    let der = include_bytes!("fixtures/crl.der");
    let crl = CrlBinary::from_der(der).unwrap();

    assert_eq!(
        crl.id().as_str(),
        "R-03F7C39B237A62CD1304642CF144D02B1693FF52041E559A4DB920CA3EF8895C"
    );
    assert_eq!(crl.der(), der);
    assert_eq!(
        crl.this_update(),
        Utc.with_ymd_and_hms(2026, 10, 18, 8, 8, 18).unwrap()
    );
    assert_eq!(
        crl.next_update(),
        Some(Utc.with_ymd_and_hms(2036, 10, 15, 8, 8, 18).unwrap())
    );
}

#[test]
fn garbage() {
    assert!(CrlBinary::from_der(&[0x30, 0x03, 0x02, 0x01]).is_err());
}

#[test]
fn empty_crl_has_no_revoked_certificates() {
    let der = include_bytes!("fixtures/crl.der");
    let (_, parsed) = x509_parser::parse_x509_crl(der).unwrap();
    assert_eq!(parsed.iter_revoked_certificates().count(), 0);

    let crl = CrlBinary::from_der(der).unwrap();
    assert_eq!(crl.digest(crate::hash::DigestAlgorithm::Sha256), crate::hash::sha256(der));
}

#[test]
fn trailing_bytes() {
    let mut der = include_bytes!("fixtures/crl.der").to_vec();
    der.extend_from_slice(&[0, 0]);
    assert!(CrlBinary::from_der(&der).is_err());
}
