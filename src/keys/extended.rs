//! SLIP-0010 extended private keys.

use core::marker::PhantomData;

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::CryptoError;
use crate::keys::curve::Curve;
use crate::keys::{HardenedDerive, HARDENED};

type HmacSha512 = Hmac<Sha512>;

/// An extended private key on curve `C`: secret scalar plus chain code.
///
/// Secret material is zeroized on drop. Every derivation returns a new key,
/// so a master key can be shared and derived from concurrently.
pub struct ExtendedPrivateKey<C: Curve> {
    secret: [u8; 32],
    chain_code: [u8; 32],
    depth: u8,
    child_number: u32,
    _curve: PhantomData<C>,
}

impl<C: Curve> ExtendedPrivateKey<C> {
    /// Derive the master node from a seed (16 to 64 bytes, e.g. a BIP39 seed).
    ///
    /// If the first half of the HMAC output is not a valid scalar the whole
    /// output is fed back as the new data, per SLIP-0010.
    pub fn new_master(seed: &[u8]) -> Result<Self, CryptoError> {
        if !(16..=64).contains(&seed.len()) {
            return Err(CryptoError::InvalidSeedLength { got: seed.len() });
        }

        let mut i = hmac_sha512(C::SEED_KEY, &[seed])?;
        loop {
            let (il, ir) = split(&i);
            if C::is_valid_scalar(&il) {
                return Ok(Self::from_parts(*il, *ir, 0, 0));
            }
            i = hmac_sha512(C::SEED_KEY, &[&i[..]])?;
        }
    }

    /// Derive the child at `index`, hardened or not.
    ///
    /// When the tweak is out of range or the child scalar is zero, the
    /// derivation is retried with `0x01 || IR || ser32(index)` as data.
    pub fn derive_child(&self, index: u32) -> Result<Self, CryptoError> {
        let depth = self
            .depth
            .checked_add(1)
            .ok_or(CryptoError::MaxDepthExceeded)?;
        let index_bytes = index.to_be_bytes();

        let mut i = if index & HARDENED != 0 {
            hmac_sha512(&self.chain_code, &[&[0x00], &self.secret, &index_bytes])?
        } else {
            let public = C::public_key(&self.secret)?;
            hmac_sha512(&self.chain_code, &[&public, &index_bytes])?
        };

        loop {
            let (il, ir) = split(&i);
            if let Some(secret) = C::add_scalars(&il, &self.secret) {
                return Ok(Self::from_parts(secret, *ir, depth, index));
            }
            i = hmac_sha512(&self.chain_code, &[&[0x01], &ir[..], &index_bytes])?;
        }
    }

    /// Walk `path` from this key, stopping at the first failing step.
    pub fn derive_path(&self, path: &[u32]) -> Result<Self, CryptoError> {
        path.iter()
            .try_fold(self.clone(), |key, &index| key.derive_child(index))
    }

    /// SEC1 compressed public key.
    pub fn public_key(&self) -> Result<[u8; 33], CryptoError> {
        C::public_key(&self.secret)
    }

    /// Lowercase hex of the compressed public key.
    pub fn public_key_hex(&self) -> Result<String, CryptoError> {
        self.public_key().map(hex::encode)
    }

    /// Raw secret scalar. Callers are responsible for its lifetime.
    pub fn secret_bytes(&self) -> &[u8; 32] {
        &self.secret
    }

    /// Chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Number of derivation steps from the master node.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Child number this key was derived with; 0 for the master node.
    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    fn from_parts(secret: [u8; 32], chain_code: [u8; 32], depth: u8, child_number: u32) -> Self {
        Self {
            secret,
            chain_code,
            depth,
            child_number,
            _curve: PhantomData,
        }
    }
}

impl<C: Curve> HardenedDerive for ExtendedPrivateKey<C> {
    type Error = CryptoError;

    fn derive_hardened_child(&self, index: u32) -> Result<Self, CryptoError> {
        if index & HARDENED == 0 {
            return Err(CryptoError::NotHardened { index });
        }
        self.derive_child(index)
    }
}

impl<C: Curve> Clone for ExtendedPrivateKey<C> {
    fn clone(&self) -> Self {
        Self::from_parts(self.secret, self.chain_code, self.depth, self.child_number)
    }
}

impl<C: Curve> Drop for ExtendedPrivateKey<C> {
    fn drop(&mut self) {
        self.secret.zeroize();
        self.chain_code.zeroize();
    }
}

impl<C: Curve> ZeroizeOnDrop for ExtendedPrivateKey<C> {}

impl<C: Curve> core::fmt::Debug for ExtendedPrivateKey<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExtendedPrivateKey")
            .field("curve", &C::NAME)
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .field("secret", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>, CryptoError> {
    let mut mac = HmacSha512::new_from_slice(key).map_err(|_| CryptoError::HmacKeyInvalid)?;
    for part in parts {
        mac.update(part);
    }
    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

fn split(i: &[u8; 64]) -> (Zeroizing<[u8; 32]>, Zeroizing<[u8; 32]>) {
    let mut il = Zeroizing::new([0u8; 32]);
    let mut ir = Zeroizing::new([0u8; 32]);
    il.copy_from_slice(&i[..32]);
    ir.copy_from_slice(&i[32..]);
    (il, ir)
}
