// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains methods that help with graph traversal.

use super::TopologyGraph;
use crate::Error;

/// Traversal methods.
impl TopologyGraph {
    /// Find the node that satisfies the given predicate starting from the given
    /// node and traversing away from the root.
    pub fn find_successor(
        &self,
        from: &str,
        mut pred: impl FnMut(&str) -> bool,
    ) -> Result<Option<&str>, Error> {
        let index = self
            .node_indices
            .get(from)
            .ok_or_else(|| Error::node_not_found(format!("Node {} not found.", from)))?;
        let mut stack = vec![*index];

        while let Some(index) = stack.pop() {
            let node = self.graph[index].as_str();
            if pred(node) {
                return Ok(Some(node));
            }

            let neighbors = self
                .graph
                .neighbors_directed(index, petgraph::Direction::Outgoing);
            stack.extend(neighbors);
        }

        Ok(None)
    }

    /// Returns true if `to` can be reached from `from` by following edges.
    pub fn path_exists(&self, from: &str, to: &str) -> Result<bool, Error> {
        if !self.contains(to) {
            return Err(Error::node_not_found(format!("Node {} not found.", to)));
        }
        self.find_successor(from, |n| n == to).map(|n| n.is_some())
    }

    /// Returns the names of the leaf nodes whose name starts with `prefix`,
    /// in insertion order.
    pub fn leaves_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.graph
            .node_indices()
            .filter(move |i| {
                self.graph
                    .neighbors_directed(*i, petgraph::Direction::Outgoing)
                    .next()
                    .is_none()
            })
            .map(move |i| self.graph[i].as_str())
            .filter(move |n| n.starts_with(prefix))
    }
}
