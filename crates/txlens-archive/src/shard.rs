//! Shard key derivation.

use std::fmt;

/// Two-level directory key: lowercase hex of byte 0 and byte 1.
///
/// Derivation is pure: the same discriminator always yields the same key,
/// independent of its length beyond the first two bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShardKey {
    first: String,
    second: String,
}

impl ShardKey {
    /// `None` when the discriminator is shorter than two bytes.
    pub fn from_discriminator(discriminator: &[u8]) -> Option<Self> {
        match discriminator {
            [b0, b1, ..] => Some(Self {
                first: format!("{b0:02x}"),
                second: format!("{b1:02x}"),
            }),
            _ => None,
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// `"{b0}/{b1}"`
    pub fn path(&self) -> String {
        format!("{}/{}", self.first, self.second)
    }
}

impl fmt::Display for ShardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.first, self.second)
    }
}
