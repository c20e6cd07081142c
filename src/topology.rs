// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The electrical topology of a diagram: named nodes and directed edges that
//! mirror the conceptual connectivity, independent of the drawn geometry.

mod creation;
pub mod iterators;
mod retrieval;
mod traversal;
mod validation;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `NodeIndexMap` stores the corresponding `NodeIndex` for any node name, so
/// that nodes in the `DiGraph` can be retrieved by name.
pub(crate) type NodeIndexMap = HashMap<String, NodeIndex>;

/// A directed graph of named electrical nodes, rooted at the incoming bus.
///
/// An empty graph is valid.  A non-empty graph has exactly one root, no
/// cycles, and every node is reachable from the root.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "TopologyDoc", into = "TopologyDoc")]
pub struct TopologyGraph {
    graph: DiGraph<String, ()>,
    node_indices: NodeIndexMap,
    root: Option<NodeIndex>,
}

/// The document form of a [`TopologyGraph`]: `{nodes: [..], edges: [[from, to], ..]}`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyDoc {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
}

impl TryFrom<TopologyDoc> for TopologyGraph {
    type Error = crate::Error;

    fn try_from(doc: TopologyDoc) -> Result<Self, Self::Error> {
        TopologyGraph::try_new(doc.nodes, doc.edges)
    }
}

impl From<TopologyGraph> for TopologyDoc {
    fn from(graph: TopologyGraph) -> Self {
        TopologyDoc {
            nodes: graph.nodes().map(str::to_string).collect(),
            edges: graph
                .edges()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl PartialEq for TopologyGraph {
    fn eq(&self, other: &Self) -> bool {
        self.nodes().eq(other.nodes()) && self.edges().eq(other.edges())
    }
}
