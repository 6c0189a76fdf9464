//! Key types: the hardened-derivation capability and SLIP-0010 extended keys.

pub mod curve;
pub mod extended;

/// Bit that marks a BIP32 child number as hardened.
pub const HARDENED: u32 = 0x8000_0000;

/// A hierarchical-deterministic key that can derive hardened children.
///
/// Derivation takes `&self` and returns a fresh key owned by the caller; the
/// parent is never mutated. Implementations without interior mutability can
/// therefore be shared across threads and derived from concurrently. An
/// implementation that keeps internal state must document whether callers
/// need to serialize derivations from the same instance.
pub trait HardenedDerive: Sized {
    /// Error reported by a failed derivation step.
    type Error;

    /// Derive the child at `index`. `index` is the full child number, with
    /// the [`HARDENED`] bit already set.
    fn derive_hardened_child(&self, index: u32) -> Result<Self, Self::Error>;
}
