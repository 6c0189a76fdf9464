//! Curve backends for SLIP-0010 private derivation.

use crate::error::CryptoError;

/// Scalar arithmetic a SLIP-0010 curve has to provide.
///
/// Scalars cross this boundary as 32-byte big-endian encodings so the
/// extended key type stays independent of any one curve crate.
pub trait Curve: Copy + core::fmt::Debug + Send + Sync + 'static {
    /// Human-readable curve name, as used in SLIP-0010.
    const NAME: &'static str;

    /// HMAC key used to derive the master node from a seed.
    const SEED_KEY: &'static [u8];

    /// True when `bytes` encodes a scalar in `1..n`.
    fn is_valid_scalar(bytes: &[u8; 32]) -> bool;

    /// `(tweak + secret) mod n`, or `None` when `tweak >= n` or the sum is zero.
    fn add_scalars(tweak: &[u8; 32], secret: &[u8; 32]) -> Option<[u8; 32]>;

    /// SEC1 compressed public key for `secret`.
    fn public_key(secret: &[u8; 32]) -> Result<[u8; 33], CryptoError>;
}

macro_rules! impl_curve {
    ($curve:ident, $krate:ident, $name:literal, $seed:literal) => {
        impl $curve {
            fn parse_non_zero(bytes: &[u8; 32]) -> Option<$krate::NonZeroScalar> {
                use $krate::elliptic_curve::PrimeField;

                let scalar = Option::<$krate::Scalar>::from($krate::Scalar::from_repr(
                    $krate::FieldBytes::from(*bytes),
                ))?;
                Option::from($krate::NonZeroScalar::new(scalar))
            }
        }

        impl Curve for $curve {
            const NAME: &'static str = $name;
            const SEED_KEY: &'static [u8] = $seed;

            fn is_valid_scalar(bytes: &[u8; 32]) -> bool {
                Self::parse_non_zero(bytes).is_some()
            }

            fn add_scalars(tweak: &[u8; 32], secret: &[u8; 32]) -> Option<[u8; 32]> {
                use $krate::elliptic_curve::PrimeField;

                let tweak = Option::<$krate::Scalar>::from($krate::Scalar::from_repr(
                    $krate::FieldBytes::from(*tweak),
                ))?;
                let secret = Self::parse_non_zero(secret)?;
                let sum = Option::<$krate::NonZeroScalar>::from($krate::NonZeroScalar::new(
                    tweak + *secret,
                ))?;

                let mut out = [0u8; 32];
                out.copy_from_slice(&sum.to_repr());
                Some(out)
            }

            fn public_key(secret: &[u8; 32]) -> Result<[u8; 33], CryptoError> {
                use $krate::elliptic_curve::sec1::ToEncodedPoint;

                let scalar = Self::parse_non_zero(secret).ok_or_else(|| {
                    CryptoError::InvalidSecretKey(format!("scalar out of range for {}", $name))
                })?;
                let point = $krate::PublicKey::from_secret_scalar(&scalar).to_encoded_point(true);

                let mut out = [0u8; 33];
                out.copy_from_slice(point.as_bytes());
                Ok(out)
            }
        }
    };
}

/// secp256k1, the Bitcoin curve (`"Bitcoin seed"`).
#[cfg(feature = "secp256k1")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Secp256k1;

#[cfg(feature = "secp256k1")]
impl_curve!(Secp256k1, k256, "secp256k1", b"Bitcoin seed");

/// NIST P-256 (`"Nist256p1 seed"`).
#[cfg(feature = "nist256p1")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NistP256;

#[cfg(feature = "nist256p1")]
impl_curve!(NistP256, p256, "nist256p1", b"Nist256p1 seed");
