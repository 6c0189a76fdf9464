#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod error;
pub(crate) mod keys;
pub(crate) mod ops;
pub mod types;

pub use error::CryptoError;
pub use keys::curve::Curve;
#[cfg(feature = "nist256p1")]
pub use keys::curve::NistP256;
#[cfg(feature = "secp256k1")]
pub use keys::curve::Secp256k1;
pub use keys::extended::ExtendedPrivateKey;
pub use keys::{HardenedDerive, HARDENED};
pub use ops::derivation::{derive, derive_with_purpose, identity_path, PURPOSE};
pub use types::{Identity, IdentityPath};
