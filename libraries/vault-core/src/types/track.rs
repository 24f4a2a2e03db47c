/// Track domain type
use serde::{Deserialize, Serialize};

/// A streamable track from the user's catalog
///
/// Tracks are immutable once fetched and carry no identifier of their own:
/// a track is identified only by its position in the catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,

    /// Stream URL handed to the device player
    pub url: String,

    /// Collection the track belongs to (optional)
    #[serde(default)]
    pub collection: Option<String>,
}

impl Track {
    /// Create a track without a collection
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            collection: None,
        }
    }

    /// Set the collection name
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Collection name worth announcing: present, non-empty and distinct from the title
    pub fn distinct_collection(&self) -> Option<&str> {
        self.collection
            .as_deref()
            .filter(|c| !c.is_empty() && *c != self.title)
    }
}
