use thiserror::Error;

/// Errors raised by key construction and child derivation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid seed length: expected 16..=64 bytes, got {got}")]
    InvalidSeedLength { got: usize },

    #[error("HMAC-SHA512 key setup failed")]
    HmacKeyInvalid,

    /// A derivation step produced no usable child. Returned by
    /// [`HardenedDerive`](crate::HardenedDerive) implementations that reject
    /// a child number.
    #[error("child derivation failed at index {index:#010x}")]
    InvalidChildKey { index: u32 },

    #[error("index {index:#010x} is not hardened")]
    NotHardened { index: u32 },

    #[error("maximum derivation depth exceeded")]
    MaxDepthExceeded,

    #[error("invalid secret key: {0}")]
    InvalidSecretKey(String),
}
