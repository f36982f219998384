use serde::{Deserialize, Serialize};

/// Opaque room identifier.
///
/// Distinct ids always address distinct games. Routes like `/room42` are
/// normalised by [`RoomId::from_route`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Room named by a URL path: leading slashes are dropped and an empty
    /// path falls back to `default_room`.
    pub fn from_route(route: &str, default_room: &str) -> Self {
        let trimmed = route.trim_start_matches('/');
        if trimmed.is_empty() {
            Self::new(default_room)
        } else {
            Self::new(trimmed)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for RoomId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}
