//! Identity paths and structured identities.

use core::fmt;

use crate::keys::{HardenedDerive, HARDENED};
use crate::ops::derivation::{derive, identity_path};

/// The five hardened child numbers of a SLIP-0013 identity node:
/// `purpose' / A' / B' / C' / D'`.
///
/// Every segment carries the hardened bit; the constructor enforces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IdentityPath([u32; 5]);

impl IdentityPath {
    /// Build a path from a purpose and the four hash words, hardening each.
    pub fn new(purpose: u32, words: [u32; 4]) -> Self {
        let [a, b, c, d] = words;
        Self([purpose, a, b, c, d].map(|segment| segment | HARDENED))
    }

    /// Hardened purpose segment.
    pub fn purpose(&self) -> u32 {
        self.0[0]
    }

    /// All five segments in derivation order.
    pub fn segments(&self) -> [u32; 5] {
        self.0
    }
}

impl fmt::Display for IdentityPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in self.0 {
            write!(f, "/{}'", segment & !HARDENED)?;
        }
        Ok(())
    }
}

/// A structured SLIP-0013 identity, as hardware wallets describe a login.
///
/// The URI is assembled from the parts that are present; see [`Identity::to_uri`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Identity {
    /// Scheme, e.g. `https` or `ssh`.
    pub proto: Option<String>,
    /// User name, placed before `@`.
    pub user: Option<String>,
    /// Host name.
    pub host: Option<String>,
    /// Port, kept as text so it is hashed exactly as given.
    pub port: Option<String>,
    /// Path, including its leading `/`.
    pub path: Option<String>,
    /// Caller-assigned index for multiple identities on the same URI.
    pub index: u32,
}

impl Identity {
    /// Identity for `host` with every other part empty and index 0.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: Some(host.into()),
            ..Self::default()
        }
    }

    /// Set the scheme.
    pub fn with_proto(mut self, proto: impl Into<String>) -> Self {
        self.proto = Some(proto.into());
        self
    }

    /// Set the user name.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set the port.
    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into());
        self
    }

    /// Set the path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set the identity index.
    pub fn with_index(mut self, index: u32) -> Self {
        self.index = index;
        self
    }

    /// Serialize as `proto://user@host:port/path`, skipping absent parts.
    ///
    /// Parts are copied verbatim; nothing is escaped or normalized.
    pub fn to_uri(&self) -> String {
        let mut uri = String::new();
        if let Some(proto) = &self.proto {
            uri.push_str(proto);
            uri.push_str("://");
        }
        if let Some(user) = &self.user {
            uri.push_str(user);
            uri.push('@');
        }
        if let Some(host) = &self.host {
            uri.push_str(host);
        }
        if let Some(port) = &self.port {
            uri.push(':');
            uri.push_str(port);
        }
        if let Some(path) = &self.path {
            uri.push_str(path);
        }
        uri
    }

    /// Hardened path for this identity under the default purpose.
    pub fn identity_path(&self) -> IdentityPath {
        identity_path(crate::ops::derivation::PURPOSE, &self.to_uri(), self.index)
    }

    /// Derive this identity's node from `key`.
    pub fn derive<K: HardenedDerive>(&self, key: &K) -> Result<K, K::Error> {
        derive(key, &self.to_uri(), self.index)
    }
}
