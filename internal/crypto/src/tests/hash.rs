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

use crate::hash::{sha1, sha256, DigestAlgorithm};

#[test]
fn test_sha1() {
    let hash = sha1(b"test message");
    assert_eq!(
        hash,
        [
            53, 238, 131, 134, 65, 13, 65, 209, 75, 63, 119, 159, 201, 95, 70, 149, 244, 133, 22,
            130
        ]
    );
}

#[test]
fn test_sha256() {
    assert_eq!(
        hex::encode(sha256(b"test message")),
        "3f0a377ba0a4a460ecb616f6507ce0d8cfa3e704025d4fda3ed0c5ca05468728"
    );
}

#[test]
fn from_uri() {
    assert_eq!(
        DigestAlgorithm::from_uri("http://www.w3.org/2001/04/xmlenc#sha256"),
        Some(DigestAlgorithm::Sha256)
    );
    assert_eq!(
        DigestAlgorithm::from_uri("http://www.w3.org/2000/09/xmldsig#sha1"),
        Some(DigestAlgorithm::Sha1)
    );
    assert_eq!(
        DigestAlgorithm::from_uri("SHA-384"),
        Some(DigestAlgorithm::Sha384)
    );
    assert_eq!(
        DigestAlgorithm::from_uri("sha512"),
        Some(DigestAlgorithm::Sha512)
    );
    assert_eq!(DigestAlgorithm::from_uri("md5"), None);
}

#[test]
fn uri_round_trip() {
    for alg in [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha224,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ] {
        assert_eq!(DigestAlgorithm::from_uri(alg.uri()), Some(alg));
        assert_eq!(alg.digest(b"abc").len(), alg.output_len());
    }
}

#[test]
fn display() {
    assert_eq!(DigestAlgorithm::Sha256.to_string(), "SHA-256");
}
