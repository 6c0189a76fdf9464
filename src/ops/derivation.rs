//! SLIP-0013 hardened path computation and walk.

use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::keys::HardenedDerive;
use crate::types::IdentityPath;

/// BIP43 purpose field assigned to SLIP-0013.
pub const PURPOSE: u32 = 13;

/// Derive the identity node `m/13'/A'/B'/C'/D'` for `uri` and `index`.
pub fn derive<K: HardenedDerive>(key: &K, uri: &str, index: u32) -> Result<K, K::Error> {
    derive_with_purpose(key, PURPOSE, uri, index)
}

/// Same as [`derive`] with a caller-chosen purpose field.
///
/// The purpose is hardened like the other segments, so a purpose that
/// already has the top bit set derives the same node as its low 31 bits.
pub fn derive_with_purpose<K: HardenedDerive>(
    key: &K,
    purpose: u32,
    uri: &str,
    index: u32,
) -> Result<K, K::Error> {
    let path = identity_path(purpose, uri, index);
    trace!(purpose, index, "deriving identity node");

    let [first, rest @ ..] = path.segments();
    let node = step(key, 1, first)?;
    rest.into_iter()
        .zip(2usize..)
        .try_fold(node, |node, (segment, depth)| step(&node, depth, segment))
}

/// Compute the hardened SLIP-0013 path without deriving any key.
///
/// `A..D` are the first 128 bits of `SHA256(le32(index) || uri)`, read as
/// four little-endian words.
pub fn identity_path(purpose: u32, uri: &str, index: u32) -> IdentityPath {
    let mut hasher = Sha256::new();
    hasher.update(index.to_le_bytes());
    hasher.update(uri.as_bytes());
    let hash = hasher.finalize();

    let word = |at: usize| u32::from_le_bytes([hash[at], hash[at + 1], hash[at + 2], hash[at + 3]]);
    IdentityPath::new(purpose, [word(0), word(4), word(8), word(12)])
}

fn step<K: HardenedDerive>(key: &K, depth: usize, segment: u32) -> Result<K, K::Error> {
    key.derive_hardened_child(segment).map_err(|err| {
        debug!(depth, "identity derivation step failed");
        err
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::HARDENED;
    use std::cell::RefCell;

    /// Records every child number it is asked for and fails on one of them.
    #[derive(Debug, Clone, Default)]
    struct Recorder {
        path: Vec<u32>,
        fail_on: Option<u32>,
        calls: std::rc::Rc<RefCell<Vec<u32>>>,
    }

    #[derive(Debug, PartialEq, Eq)]
    struct Rejected(u32);

    impl HardenedDerive for Recorder {
        type Error = Rejected;

        fn derive_hardened_child(&self, index: u32) -> Result<Self, Rejected> {
            self.calls.borrow_mut().push(index);
            if self.fail_on == Some(index) {
                return Err(Rejected(index));
            }
            let mut path = self.path.clone();
            path.push(index);
            Ok(Self {
                path,
                fail_on: self.fail_on,
                calls: self.calls.clone(),
            })
        }
    }

    #[test]
    fn path_matches_known_vector() {
        let path = identity_path(PURPOSE, "https://satoshi@bitcoin.org/login", 0);
        assert_eq!(
            path.segments(),
            [0x8000_000d, 0x9d38_e2d0, 0xa994_834c, 0xe02d_e3f3, 0xeebf_0411]
        );
    }

    #[test]
    fn empty_uri_is_hashed_verbatim() {
        let path = identity_path(PURPOSE, "", 0);
        assert_eq!(
            path.segments(),
            [0x8000_000d, 0x9861_3fdf, 0xdb2f_a904, 0xad19_5740, 0xc8d7_3dc4]
        );
    }

    #[test]
    fn every_segment_is_hardened() {
        for (uri, index) in [("", 0), ("a", 1), ("ssh://host", u32::MAX), ("x/", 42)] {
            for segment in identity_path(7, uri, index).segments() {
                assert!(segment >= HARDENED, "{segment:#x} not hardened");
            }
        }
    }

    #[test]
    fn uri_is_not_normalized() {
        let a = identity_path(PURPOSE, "https://example.com", 0);
        let b = identity_path(PURPOSE, "https://example.com/", 0);
        let c = identity_path(PURPOSE, "HTTPS://example.com", 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn walks_the_path_in_order() {
        let root = Recorder::default();
        let node = derive(&root, "ssh://satoshi@bitcoin.org", 47).unwrap();
        let expected = identity_path(PURPOSE, "ssh://satoshi@bitcoin.org", 47);
        assert_eq!(node.path, expected.segments());
        assert!(root.path.is_empty());
    }

    #[test]
    fn stops_at_first_failure() {
        let expected = identity_path(PURPOSE, "https://satoshi@bitcoin.org/login", 0).segments();
        let root = Recorder {
            fail_on: Some(expected[2]),
            ..Recorder::default()
        };

        let err = derive(&root, "https://satoshi@bitcoin.org/login", 0).unwrap_err();
        assert_eq!(err, Rejected(expected[2]));
        assert_eq!(*root.calls.borrow(), expected[..3].to_vec());
    }

    #[test]
    fn failure_on_purpose_step_is_propagated() {
        let root = Recorder {
            fail_on: Some(PURPOSE | HARDENED),
            ..Recorder::default()
        };
        assert_eq!(
            derive(&root, "any", 0).unwrap_err(),
            Rejected(PURPOSE | HARDENED)
        );
        assert_eq!(root.calls.borrow().len(), 1);
    }

    #[test]
    fn purpose_override_changes_only_first_segment() {
        let default = identity_path(PURPOSE, "ftp://satoshi@bitcoin.org:2323/pub", 3);
        let custom = identity_path(99, "ftp://satoshi@bitcoin.org:2323/pub", 3);
        assert_eq!(custom.purpose(), 99 | HARDENED);
        assert_ne!(default.segments()[0], custom.segments()[0]);
        assert_eq!(default.segments()[1..], custom.segments()[1..]);
    }

    #[test]
    fn pre_hardened_purpose_collides_with_plain_purpose() {
        let root = Recorder::default();
        let plain = derive(&root, "https://example.com", 5).unwrap();
        let hardened =
            derive_with_purpose(&root, PURPOSE | HARDENED, "https://example.com", 5).unwrap();
        assert_eq!(plain.path, hardened.path);
    }
}
