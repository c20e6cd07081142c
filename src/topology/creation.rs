// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`TopologyGraph`] instances from given nodes and
//! edges.

use petgraph::graph::{DiGraph, NodeIndex};

use crate::Error;

use super::{NodeIndexMap, TopologyGraph};

/// `TopologyGraph` instantiation.
impl TopologyGraph {
    /// Creates a new [`TopologyGraph`] from the given node names and
    /// `(from, to)` edges.
    ///
    /// Returns an error if the graph is invalid.
    pub fn try_new<N, E>(
        nodes: impl IntoIterator<Item = N>,
        edges: impl IntoIterator<Item = (E, E)>,
    ) -> Result<Self, Error>
    where
        N: Into<String>,
        E: AsRef<str>,
    {
        let (graph, indices) = Self::create_graph(nodes)?;

        let mut tg = Self {
            graph,
            node_indices: indices,
            root: None,
        };
        tg.add_edges(edges)?;
        tg.root = Self::find_root(&tg.graph)?;

        tg.validate()?;

        Ok(tg)
    }

    fn find_root(graph: &DiGraph<String, ()>) -> Result<Option<NodeIndex>, Error> {
        if graph.node_count() == 0 {
            return Ok(None);
        }
        let mut roots_iter = graph.node_indices().filter(|i| {
            graph
                .neighbors_directed(*i, petgraph::Direction::Incoming)
                .next()
                .is_none()
        });

        let root = roots_iter
            .next()
            .ok_or_else(|| Error::invalid_topology("No root node found."))?;

        if let Some(other) = roots_iter.next() {
            return Err(Error::invalid_topology(format!(
                "Multiple root nodes found: {} and {}.",
                graph[root], graph[other]
            )));
        }

        Ok(Some(root))
    }

    fn create_graph<N: Into<String>>(
        nodes: impl IntoIterator<Item = N>,
    ) -> Result<(DiGraph<String, ()>, NodeIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = NodeIndexMap::new();

        for node in nodes {
            let name: String = node.into();

            if name.is_empty() {
                return Err(Error::invalid_topology("Node names can't be empty."));
            }
            if indices.contains_key(&name) {
                return Err(Error::invalid_topology(format!(
                    "Duplicate node name found: {name}"
                )));
            }

            let idx = graph.add_node(name.clone());
            indices.insert(name, idx);
        }

        Ok((graph, indices))
    }

    fn add_edges<E: AsRef<str>>(&mut self, edges: impl IntoIterator<Item = (E, E)>) -> Result<(), Error> {
        for (from, to) in edges {
            let (from, to) = (from.as_ref(), to.as_ref());

            if from == to {
                return Err(Error::invalid_topology(format!(
                    "Edge:({from}, {to}) Can't connect a node to itself."
                )));
            }
            for name in [from, to] {
                if !self.node_indices.contains_key(name) {
                    return Err(Error::invalid_topology(format!(
                        "Edge:({from}, {to}) Can't find a node named {name}"
                    )));
                }
            }

            let source_idx = self.node_indices[from];
            let dest_idx = self.node_indices[to];
            self.graph.update_edge(source_idx, dest_idx, ());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes_and_edges() -> (Vec<&'static str>, Vec<(&'static str, &'static str)>) {
        let nodes = vec!["MV_BUS", "MV_BREAKER", "TRANSFORMER_HV", "TRANSFORMER_LV", "LV_BUS"];
        let edges = vec![
            ("MV_BUS", "MV_BREAKER"),
            ("MV_BREAKER", "TRANSFORMER_HV"),
            ("TRANSFORMER_HV", "TRANSFORMER_LV"),
            ("TRANSFORMER_LV", "LV_BUS"),
        ];
        (nodes, edges)
    }

    #[test]
    fn test_node_validation() {
        let (mut nodes, edges) = nodes_and_edges();
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone()).is_ok());

        nodes.push("LV_BUS");
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone())
            .is_err_and(|e| e == Error::invalid_topology("Duplicate node name found: LV_BUS")));

        nodes.pop();
        nodes.push("");
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone())
            .is_err_and(|e| e == Error::invalid_topology("Node names can't be empty.")));

        nodes.pop();
        nodes.push("PCS_FEEDER_1");
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone()).is_err_and(|e| e
            == Error::invalid_topology("Multiple root nodes found: MV_BUS and PCS_FEEDER_1.")));
    }

    #[test]
    fn test_edge_validation() {
        let (nodes, mut edges) = nodes_and_edges();

        edges.push(("LV_BUS", "LV_BUS"));
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone()).is_err_and(|e| e
            == Error::invalid_topology("Edge:(LV_BUS, LV_BUS) Can't connect a node to itself.")));

        edges.pop();
        edges.push(("LV_BUS", "PCS_FEEDER_9"));
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone()).is_err_and(|e| e
            == Error::invalid_topology(
                "Edge:(LV_BUS, PCS_FEEDER_9) Can't find a node named PCS_FEEDER_9"
            )));

        edges.pop();
        edges.push(("LV_BUS", "MV_BUS"));
        assert!(TopologyGraph::try_new(nodes.clone(), edges.clone())
            .is_err_and(|e| e == Error::invalid_topology("No root node found.")));
    }

    #[test]
    fn test_empty_graph() {
        let graph = TopologyGraph::try_new(Vec::<String>::new(), Vec::<(String, String)>::new());
        assert!(graph.is_ok_and(|g| g.root().is_none() && g.nodes().count() == 0));
    }
}
