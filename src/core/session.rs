//! Per-viewer session identity.

use serde::{Deserialize, Serialize};

use super::rng::GameRng;

/// Opaque token identifying one viewer for the life of the process.
///
/// The engine never interprets the contents; it only compares tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap an identity supplied by the caller.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random token: 32 lowercase hex digits.
    #[must_use]
    pub fn generate(rng: &mut GameRng) -> Self {
        Self(format!("{:032x}", rng.next_token()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
