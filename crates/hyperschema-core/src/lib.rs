//! # hyperschema-core
//!
//! In-memory JSON Hyper-Schema link model with cycle-safe structural
//! equality.
//!
//! This crate defines the link descriptor attached to schema nodes and the
//! machinery that lets descriptors key associative containers:
//! - [`LinkDescriptor`] — one hypermedia link (relation, URI template,
//!   method, media type, target schema, own schema)
//! - Schema graph types ([`SchemaNode`], [`SchemaEdge`], [`SchemaNodeId`]) —
//!   a minimal cyclic graph of schema nodes for a link's resolved schema
//! - [`compare`] — the cycle-safe equality/hash engine behind the
//!   `PartialEq`/`Eq`/`Hash` impls on [`LinkDescriptor`]
//! - [`value::stable_hash`] — a hash over `serde_json::Value` consistent
//!   with its deep equality
//! - Error hierarchy ([`HyperschemaError`], [`GraphError`])
//!
//! Schema documents routinely reference themselves, so comparing two
//! descriptors can mean comparing two cyclic graphs; every traversal here
//! terminates by tracking visited node identities instead of recursing.

pub mod compare;
pub mod error;
pub mod link;
pub mod schema;
pub mod value;

pub use compare::{descriptor_eq, descriptor_hash};
pub use error::{GraphError, HyperschemaError, Result};
pub use link::{LinkDescriptor, JSON_MEDIA_TYPE};
pub use schema::{SchemaEdge, SchemaNode, SchemaNodeId, SchemaNodeRef};
