//! Link descriptor — one hypermedia link attached to a schema.
//!
//! Hyper-schema documents attach a `links` collection to schema nodes; each
//! entry describes one link (relation, URI template, method, media type,
//! optional target schema, optional own schema). Descriptors are plain
//! values: this crate never mutates one after construction, and they live
//! and die with the owning schema document.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::SchemaNodeRef;

/// Default media type applied to every link that does not set one.
pub const JSON_MEDIA_TYPE: &str = "application/json";

fn default_media_type() -> String {
    JSON_MEDIA_TYPE.to_string()
}

/// One hypermedia link attached to a schema node.
///
/// Structural equality and hashing (including the cycle-safe comparison of
/// the embedded [`schema`](LinkDescriptor::schema) graph) live in
/// [`crate::compare`]; a `HashSet<LinkDescriptor>` deduplicates by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Relation name (e.g. `"self"`, `"next"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,

    /// URI template of the link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Request method, e.g. an HTTP verb.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Media type of the link target. Never absent: defaults to
    /// [`JSON_MEDIA_TYPE`] at construction and deserialization.
    #[serde(default = "default_media_type")]
    pub media_type: String,

    /// Schema describing the representation behind the link target. Opaque
    /// JSON owned by (or shared with) the enclosing document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_schema: Option<Value>,

    /// The link's own schema node, resolved into the document's schema
    /// graph (possibly cyclic). `None` means the link was not resolved.
    /// Resolution is the document loader's job, so the field does not
    /// round-trip through serialization.
    #[serde(skip)]
    pub schema: Option<SchemaNodeRef>,
}

impl LinkDescriptor {
    /// Create an empty descriptor with the default media type.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for LinkDescriptor {
    fn default() -> Self {
        Self {
            title: None,
            rel: None,
            href: None,
            method: None,
            media_type: default_media_type(),
            target_schema: None,
            schema: None,
        }
    }
}
