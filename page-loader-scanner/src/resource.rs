use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a local resource, inferred from the element it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Image,
    Stylesheet,
    Script,
    /// A `<link>` target without a file extension, saved as an HTML document.
    LinkDocument,
}

impl ResourceKind {
    /// Linked documents are fetched as UTF-8 text, everything else as raw bytes.
    pub fn is_text(self) -> bool {
        matches!(self, ResourceKind::LinkDocument)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ResourceKind::Image => "image",
            ResourceKind::Stylesheet => "stylesheet",
            ResourceKind::Script => "script",
            ResourceKind::LinkDocument => "document",
        };
        f.write_str(label)
    }
}

/// A same-host reference found while scanning a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// The attribute value exactly as it appeared in the markup.
    pub original_url: String,
    pub kind: ResourceKind,
}

impl ResourceReference {
    pub fn new(original_url: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            original_url: original_url.into(),
            kind,
        }
    }
}
