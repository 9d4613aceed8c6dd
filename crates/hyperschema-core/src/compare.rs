//! Cycle-safe structural equality and hashing for link descriptors.
//!
//! A link's embedded schema node can sit inside a cyclic graph (a schema
//! referencing an ancestor or itself), so field-by-field recursion would
//! never terminate. Both traversals here run an explicit work list over
//! identity keys instead:
//!
//! - equality walks *pairs* of nodes breadth-first and assumes any
//!   already-visited pair equal instead of descending again, bounding the
//!   walk at `nodes_a * nodes_b` pair visits;
//! - hashing walks single nodes the same way, folding each node's local
//!   hash on first visit and a fixed sentinel when an edge re-reaches a
//!   visited node.
//!
//! Both are pure, never panic, and agree: descriptors that compare equal
//! hash equal. The `PartialEq`/`Eq`/`Hash` impls at the bottom expose the
//! engine to `HashSet`/`HashMap`, so a set keyed by [`LinkDescriptor`]
//! deduplicates by structural value.

use std::collections::{HashSet, VecDeque};
use std::hash::{Hash, Hasher};
use std::ptr;
use std::sync::Arc;

use tracing::trace;

use crate::link::LinkDescriptor;
use crate::schema::{SchemaNode, SchemaNodeId, SchemaNodeRef};
use crate::value::{combine, hash_one, stable_hash};

/// Folded into a graph hash instead of descending when a traversal
/// re-reaches an already-visited node.
const CYCLE_SENTINEL: u64 = 0x9e37_79b9_7f4a_7c15;

/// Structural equality over two descriptors.
///
/// Scalar fields compare by exact text (absent equals only absent), the
/// target schema by JSON deep equality, and the embedded schema graph by
/// the cycle-safe pairwise walk.
#[must_use]
pub fn descriptor_eq(a: &LinkDescriptor, b: &LinkDescriptor) -> bool {
    if ptr::eq(a, b) {
        return true;
    }
    a.title == b.title
        && a.rel == b.rel
        && a.href == b.href
        && a.method == b.method
        && a.media_type == b.media_type
        && a.target_schema == b.target_schema
        && match (&a.schema, &b.schema) {
            (None, None) => true,
            (Some(sa), Some(sb)) => graphs_equal(sa, sb),
            _ => false,
        }
}

/// Structural hash over a descriptor, consistent with [`descriptor_eq`].
///
/// Per-field hashes fold in the same fixed order equality checks them,
/// with the `(h * 397) ^ field` combiner and `0` for absent fields.
#[must_use]
pub fn descriptor_hash(link: &LinkDescriptor) -> u64 {
    let mut h = opt_text_hash(&link.title);
    h = combine(h, opt_text_hash(&link.rel));
    h = combine(h, opt_text_hash(&link.href));
    h = combine(h, opt_text_hash(&link.method));
    h = combine(h, hash_one(&link.media_type));
    h = combine(h, link.target_schema.as_ref().map_or(0, stable_hash));
    h = combine(h, link.schema.as_ref().map_or(0, graph_hash));
    h
}

fn opt_text_hash(text: &Option<String>) -> u64 {
    text.as_ref().map_or(0, hash_one)
}

/// Breadth-first pairwise graph equality.
///
/// The visited set records a pair *before* its children are enqueued, so a
/// back-reference lands on an already-recorded pair and closes the cycle
/// instead of descending again.
fn graphs_equal(root_a: &SchemaNodeRef, root_b: &SchemaNodeRef) -> bool {
    let mut visited: HashSet<(SchemaNodeId, SchemaNodeId)> = HashSet::new();
    let mut work: VecDeque<(SchemaNodeRef, SchemaNodeRef)> = VecDeque::new();

    visited.insert((root_a.identity(), root_b.identity()));
    work.push_back((Arc::clone(root_a), Arc::clone(root_b)));

    while let Some((a, b)) = work.pop_front() {
        // Two handles to one node: the subgraphs are the same graph.
        if Arc::ptr_eq(&a, &b) {
            continue;
        }
        if !nodes_locally_equal(&a, &b) {
            return false;
        }
        for (edge_a, edge_b) in a.outgoing().iter().zip(b.outgoing()) {
            let pair = (edge_a.target.identity(), edge_b.target.identity());
            if visited.insert(pair) {
                work.push_back((Arc::clone(&edge_a.target), Arc::clone(&edge_b.target)));
            } else {
                trace!("revisited node pair during schema comparison, assuming equal");
            }
        }
    }
    true
}

/// Node-local comparison: constraints pairwise (names by text, values by
/// JSON deep equality), then edge shape (count and keywords). Children are
/// the traversal's concern.
fn nodes_locally_equal(a: &SchemaNode, b: &SchemaNode) -> bool {
    if a.constraints() != b.constraints() {
        return false;
    }
    let (edges_a, edges_b) = (a.outgoing(), b.outgoing());
    edges_a.len() == edges_b.len()
        && edges_a
            .iter()
            .zip(edges_b)
            .all(|(ea, eb)| ea.keyword == eb.keyword)
}

/// Breadth-first cycle-safe graph hash.
///
/// Children are enqueued in the same declaration order the equality walk
/// uses, so equal graphs fold their node contributions in matching order.
fn graph_hash(root: &SchemaNodeRef) -> u64 {
    let mut visited: HashSet<SchemaNodeId> = HashSet::new();
    let mut work: VecDeque<SchemaNodeRef> = VecDeque::new();

    visited.insert(root.identity());
    work.push_back(Arc::clone(root));

    let mut h = 0u64;
    while let Some(node) = work.pop_front() {
        h = combine(h, node_local_hash(&node));
        for edge in node.outgoing() {
            if visited.insert(edge.target.identity()) {
                work.push_back(Arc::clone(&edge.target));
            } else {
                trace!("revisited node during schema hashing, folding sentinel");
                h = combine(h, CYCLE_SENTINEL);
            }
        }
    }
    h
}

fn node_local_hash(node: &SchemaNode) -> u64 {
    let mut h = 0u64;
    for (name, value) in node.constraints() {
        h = combine(h, hash_one(name));
        h = combine(h, stable_hash(value));
    }
    for edge in node.outgoing() {
        h = combine(h, hash_one(&edge.keyword));
    }
    h
}

// The comparer adapter: associative containers take their equality/hash
// strategy from these impls, one process-wide by construction.

impl PartialEq for LinkDescriptor {
    fn eq(&self, other: &Self) -> bool {
        descriptor_eq(self, other)
    }
}

// Sound: equality is reflexive, symmetric, and transitive over the
// descriptor's value domain. Floats only occur inside `serde_json::Value`,
// which cannot represent NaN.
impl Eq for LinkDescriptor {}

impl Hash for LinkDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(descriptor_hash(self));
    }
}
