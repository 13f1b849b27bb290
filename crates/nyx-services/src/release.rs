use serde::{Deserialize, Serialize};

/// A handle to a remote release, as returned by a publish service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseHandle {
    pub tag_name: String,
    pub id: String,
    pub url: String,
}

impl ReleaseHandle {
    #[must_use]
    pub fn new(tag_name: impl Into<String>, id: impl Into<String>, url: impl Into<String>) -> Self {
        Self { tag_name: tag_name.into(), id: id.into(), url: url.into() }
    }
}
