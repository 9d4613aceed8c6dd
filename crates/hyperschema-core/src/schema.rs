//! In-memory schema graph: nodes, labeled reference edges, node identity.
//!
//! A schema document is represented as a graph of [`SchemaNode`]s. Edges are
//! keyword-scoped references to sub-schemas (direct nesting or resolved
//! `$ref` pointers) and may form cycles: a node can reference an ancestor or
//! itself. Graphs are assembled in two phases so cycles are constructible:
//! create every node first, then attach each node's edge list exactly once
//! with [`SchemaNode::connect`]. After assembly the graph is immutable and
//! edge reads are lock-free.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde_json::Value;

use crate::error::GraphError;

/// Shared handle to a schema node. Cycles are real `Arc` cycles; the graph
/// lives as long as the owning document keeps any handle into it.
pub type SchemaNodeRef = Arc<SchemaNode>;

/// Opaque identity key for a schema node, stable for the node's lifetime.
///
/// Derived from the node's address (nodes are pinned inside their `Arc`
/// allocation), so two handles to the same node always agree and two live
/// nodes never collide. Usable as a `HashMap`/`HashSet` key for
/// cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SchemaNodeId(usize);

/// One keyword-scoped reference edge to a sub-schema.
#[derive(Debug, Clone)]
pub struct SchemaEdge {
    /// The keyword path that produced this edge (e.g. `items`,
    /// `properties/name`, `not`).
    pub keyword: String,
    /// The referenced node.
    pub target: SchemaNodeRef,
}

impl SchemaEdge {
    #[must_use]
    pub fn new(keyword: impl Into<String>, target: SchemaNodeRef) -> Self {
        Self {
            keyword: keyword.into(),
            target,
        }
    }
}

/// One node of a schema graph.
///
/// A node carries its scalar/JSON-valued constraints (`type`, `pattern`,
/// `maximum`, ...) in declaration order, plus an ordered list of outgoing
/// reference edges. Constraint and edge order is preserved exactly as
/// declared; traversals rely on it being deterministic across calls.
pub struct SchemaNode {
    constraints: Vec<(String, Value)>,
    edges: OnceLock<Vec<SchemaEdge>>,
}

impl SchemaNode {
    /// Create an unconnected node with the given constraints.
    ///
    /// The node is a leaf until [`SchemaNode::connect`] attaches its edges.
    #[must_use]
    pub fn new(constraints: Vec<(String, Value)>) -> SchemaNodeRef {
        Arc::new(Self {
            constraints,
            edges: OnceLock::new(),
        })
    }

    /// Create a node with no constraints and no edges.
    #[must_use]
    pub fn empty() -> SchemaNodeRef {
        Self::new(Vec::new())
    }

    /// Attach this node's outgoing edges. May be called at most once.
    ///
    /// Targets may include the node itself or any other node of the graph,
    /// which is how cyclic documents are represented.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EdgesAlreadyConnected`] if the edges were
    /// already attached.
    pub fn connect(&self, edges: Vec<SchemaEdge>) -> Result<(), GraphError> {
        self.edges
            .set(edges)
            .map_err(|_| GraphError::EdgesAlreadyConnected)
    }

    /// The node's constraints, in declaration order.
    #[must_use]
    pub fn constraints(&self) -> &[(String, Value)] {
        &self.constraints
    }

    /// The node's outgoing edges, in declaration order. Empty for a leaf or
    /// a not-yet-connected node.
    #[must_use]
    pub fn outgoing(&self) -> &[SchemaEdge] {
        self.edges.get().map(Vec::as_slice).unwrap_or(&[])
    }

    /// This node's identity key.
    #[must_use]
    pub fn identity(&self) -> SchemaNodeId {
        SchemaNodeId(self as *const SchemaNode as usize)
    }
}

// Hand-written: a derived impl would follow edge targets and recurse forever
// on a cyclic graph. Edges print as their keywords only.
impl fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keywords: Vec<&str> = self.outgoing().iter().map(|e| e.keyword.as_str()).collect();
        f.debug_struct("SchemaNode")
            .field("constraints", &self.constraints)
            .field("edges", &keywords)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_is_stable_and_distinct() {
        let a = SchemaNode::empty();
        let b = SchemaNode::empty();

        assert_eq!(a.identity(), a.identity());
        assert_ne!(a.identity(), b.identity());

        // Two handles to one node agree.
        let a2 = Arc::clone(&a);
        assert_eq!(a.identity(), a2.identity());
    }

    #[test]
    fn unconnected_node_is_a_leaf() {
        let node = SchemaNode::new(vec![("type".to_string(), json!("string"))]);
        assert!(node.outgoing().is_empty());
        assert_eq!(node.constraints().len(), 1);
    }

    #[test]
    fn connect_twice_is_an_error() {
        let node = SchemaNode::empty();
        node.connect(Vec::new()).expect("first connect");
        let err = node.connect(Vec::new()).expect_err("second connect");
        assert!(matches!(err, GraphError::EdgesAlreadyConnected));
    }

    #[test]
    fn self_cycle_is_constructible() {
        let node = SchemaNode::new(vec![("type".to_string(), json!("object"))]);
        node.connect(vec![SchemaEdge::new("properties/self", Arc::clone(&node))])
            .expect("connect");

        assert_eq!(node.outgoing().len(), 1);
        assert_eq!(node.outgoing()[0].target.identity(), node.identity());
    }

    #[test]
    fn debug_output_terminates_on_cycles() {
        let node = SchemaNode::empty();
        node.connect(vec![SchemaEdge::new("items", Arc::clone(&node))])
            .expect("connect");

        let rendered = format!("{node:?}");
        assert!(rendered.contains("items"));
    }

    #[test]
    fn edge_order_is_preserved() {
        let a = SchemaNode::empty();
        let b = SchemaNode::empty();
        let root = SchemaNode::empty();
        root.connect(vec![
            SchemaEdge::new("properties/a", a),
            SchemaEdge::new("properties/b", b),
        ])
        .expect("connect");

        let keywords: Vec<&str> = root.outgoing().iter().map(|e| e.keyword.as_str()).collect();
        assert_eq!(keywords, vec!["properties/a", "properties/b"]);
    }
}
