// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the acyclicity and connectedness of a
//! [`TopologyGraph`].

use petgraph::algo::{kosaraju_scc, toposort};
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;
use std::collections::BTreeSet;

use crate::Error;

use super::TopologyGraph;

impl TopologyGraph {
    pub(super) fn validate(&self) -> Result<(), Error> {
        let Some(root) = self.root else {
            return Ok(());
        };
        self.validate_connected_graph(root)?;
        self.validate_acyclicity()?;
        Ok(())
    }

    /// Validates that all nodes are connected into a single graph.
    ///
    /// It does so by ensuring that all the nodes are reachable by traversing
    /// the graph from the root node.
    fn validate_connected_graph(&self, root: NodeIndex) -> Result<(), Error> {
        let mut visited = BTreeSet::new();
        let mut bfs = Bfs::new(&self.graph, root);
        while let Some(index) = bfs.next(&self.graph) {
            visited.insert(index);
        }

        let unvisited = self
            .graph
            .node_indices()
            .filter(|i| !visited.contains(i))
            .map(|i| self.graph[i].as_str())
            .collect::<Vec<_>>();

        if !unvisited.is_empty() {
            return Err(Error::invalid_topology(format!(
                "Nodes {:?} are not connected to the root.",
                unvisited
            )));
        }

        Ok(())
    }

    /// Validates that there are no cycles in the graph.
    ///
    /// If a cycle is detected, an error is returned, that lists the nodes of
    /// the first strongly connected component that forms one, in insertion
    /// order.
    fn validate_acyclicity(&self) -> Result<(), Error> {
        let Err(cycle) = toposort(&self.graph, None) else {
            return Ok(());
        };

        let mut members = kosaraju_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .min_by_key(|scc| scc.iter().min().copied())
            .unwrap_or_else(|| vec![cycle.node_id()]);
        members.sort();

        Err(Error::invalid_topology(format!(
            "Cycle detected between nodes {:?}.",
            members
                .iter()
                .map(|i| self.graph[*i].as_str())
                .collect::<Vec<_>>()
        )))
    }
}
