// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving nodes and edges from a [`TopologyGraph`].

use super::iterators::{Edges, Neighbors, Nodes};
use super::TopologyGraph;
use crate::Error;

/// Node and edge retrieval.
impl TopologyGraph {
    /// Returns the name of the root node, or `None` for an empty graph.
    pub fn root(&self) -> Option<&str> {
        self.root.map(|i| self.graph[i].as_str())
    }

    /// Returns true if a node with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.node_indices.contains_key(name)
    }

    /// Returns an iterator over the node names in the graph.
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the edges in the graph.
    pub fn edges(&self) -> Edges<'_> {
        Edges {
            graph: &self.graph,
            iter: self.graph.raw_edges().iter(),
        }
    }

    /// Returns an iterator over the *predecessors* of the node with the given
    /// name.
    ///
    /// Returns an error if the given node does not exist.
    pub fn predecessors(&self, name: &str) -> Result<Neighbors<'_>, Error> {
        self.neighbors(name, petgraph::Direction::Incoming)
    }

    /// Returns an iterator over the *successors* of the node with the given
    /// name.
    ///
    /// Returns an error if the given node does not exist.
    pub fn successors(&self, name: &str) -> Result<Neighbors<'_>, Error> {
        self.neighbors(name, petgraph::Direction::Outgoing)
    }

    fn neighbors(&self, name: &str, direction: petgraph::Direction) -> Result<Neighbors<'_>, Error> {
        self.node_indices
            .get(name)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self.graph.neighbors_directed(index, direction),
            })
            .ok_or_else(|| Error::node_not_found(format!("Node {} not found.", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Result<TopologyGraph, Error> {
        TopologyGraph::try_new(
            ["MV_BUS", "TRANSFORMER_HV", "LV_BUS", "PCS_FEEDER_1", "PCS_FEEDER_2"],
            [
                ("MV_BUS", "TRANSFORMER_HV"),
                ("TRANSFORMER_HV", "LV_BUS"),
                ("LV_BUS", "PCS_FEEDER_1"),
                ("LV_BUS", "PCS_FEEDER_2"),
            ],
        )
    }

    #[test]
    fn test_nodes_and_edges() -> Result<(), Error> {
        let graph = graph()?;
        assert_eq!(graph.root(), Some("MV_BUS"));
        assert!(graph.contains("PCS_FEEDER_2"));
        assert!(!graph.contains("PCS_FEEDER_3"));
        assert!(graph.nodes().eq([
            "MV_BUS",
            "TRANSFORMER_HV",
            "LV_BUS",
            "PCS_FEEDER_1",
            "PCS_FEEDER_2"
        ]));
        assert!(graph
            .edges()
            .filter(|(from, _)| *from == "LV_BUS")
            .eq([("LV_BUS", "PCS_FEEDER_1"), ("LV_BUS", "PCS_FEEDER_2")]));
        Ok(())
    }

    #[test]
    fn test_neighbors() -> Result<(), Error> {
        let graph = graph()?;

        assert!(graph.predecessors("MV_BUS").is_ok_and(|mut x| x.next().is_none()));
        assert!(graph
            .predecessors("PCS_FEEDER_1")
            .is_ok_and(|x| x.eq(["LV_BUS"])));

        let mut feeders = graph.successors("LV_BUS")?.collect::<Vec<_>>();
        feeders.sort();
        assert_eq!(feeders, vec!["PCS_FEEDER_1", "PCS_FEEDER_2"]);

        assert!(graph
            .successors("PCS_FEEDER_9")
            .is_err_and(|e| e == Error::node_not_found("Node PCS_FEEDER_9 not found.")));
        Ok(())
    }
}
