//! Identity derivation.

pub(crate) mod derivation;
