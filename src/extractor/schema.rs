//! The structured-document model: the sole contract handed to collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Normalized extraction result for one page.
///
/// Created once per scrape by the extractor, mutated only by the asset
/// retriever (resolving [`DocumentImage`] entries in place), then handed to
/// exporters read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Normalized input URL the document was extracted from.
    pub source_url: String,
    /// Never empty; falls back to the source domain.
    pub title: String,
    /// description/keywords/author plus every Open Graph property
    /// (keyed `og_<property>`). Keys unique.
    pub metadata: BTreeMap<String, String>,
    /// Whitespace-normalized main text; no blank lines.
    pub body_text: String,
    /// Tables in document order; only tables with at least one non-empty row.
    pub tables: Vec<Table>,
    /// Image catalog in document order.
    pub images: Vec<DocumentImage>,
    /// Links in document order, URL-unique (first occurrence wins).
    pub links: Vec<LinkRef>,
    /// When extraction ran.
    pub extracted_at: DateTime<Utc>,
}

/// An extracted table. Rows keep their original cell counts; nothing is
/// forced rectangular at extraction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub title: String,
    pub rows: Vec<Vec<String>>,
}

/// A cataloged image reference, before retrieval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Absolute URL or inline-encoded (`data:`) payload.
    pub url: String,
    pub alt_text: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// True when `url` is a `data:` payload rather than a remote address.
    pub is_inline_encoded: bool,
}

/// A retrieved image stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    pub local_path: PathBuf,
    pub alt_text: String,
    pub original_url: String,
}

/// Image slot in a document: unresolved catalog entry or stored asset.
///
/// The asset retriever replaces `Unresolved` entries with `Stored` ones in
/// place, preserving order; entries past the retrieval cap and failed items
/// stay `Unresolved`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DocumentImage {
    Unresolved(ImageRef),
    Stored(AssetRef),
}

impl DocumentImage {
    /// The unresolved reference, if this slot was never retrieved.
    #[must_use]
    pub fn as_unresolved(&self) -> Option<&ImageRef> {
        match self {
            Self::Unresolved(image) => Some(image),
            Self::Stored(_) => None,
        }
    }

    /// The stored asset, if retrieval succeeded.
    #[must_use]
    pub fn as_stored(&self) -> Option<&AssetRef> {
        match self {
            Self::Stored(asset) => Some(asset),
            Self::Unresolved(_) => None,
        }
    }
}

/// An extracted link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Absolute URL (http(s), mailto: or tel:).
    pub url: String,
    /// Anchor text of the first occurrence; falls back to the URL itself.
    pub text: String,
}
