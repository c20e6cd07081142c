// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over nodes and edges in a `TopologyGraph`.

use petgraph::graph::DiGraph;

/// An iterator over the node names in a `TopologyGraph`, in insertion order.
pub struct Nodes<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<String>>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| n.weight.as_str())
    }
}

/// An iterator over the `(from, to)` edges in a `TopologyGraph`, in
/// insertion order.
pub struct Edges<'a> {
    pub(crate) graph: &'a DiGraph<String, ()>,
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Edge<()>>,
}

impl<'a> Iterator for Edges<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter
            .next()
            .map(|e| (self.graph[e.source()].as_str(), self.graph[e.target()].as_str()))
    }
}

/// An iterator over the neighbors of a node in a `TopologyGraph`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<String, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| self.graph[i].as_str())
    }
}
