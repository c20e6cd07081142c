// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains the
//! `SceneBuilder`, which can declaratively build hand-crafted scene graphs
//! for use in tests.

use crate::geometry::{Point, Size};
use crate::scene::{PlacedInstance, SceneGraph};
use crate::symbol_kind::{Anchor, BusClass, Orientation, Role, SymbolKind};
use crate::symbols::{busbar, node_dot, pcs_box, transformer, Primitive, SymbolDefinition};
use crate::topology::TopologyGraph;

/// A builder for scene graphs with symbols at arbitrary positions.
#[derive(Clone, Debug)]
pub(crate) struct SceneBuilder {
    instances: Vec<PlacedInstance>,
    next_wire: usize,
}

impl SceneBuilder {
    /// Creates an empty `SceneBuilder`.
    pub(crate) fn new() -> Self {
        SceneBuilder {
            instances: Vec::new(),
            next_wire: 0,
        }
    }

    /// Adds a symbol with its `anchor` at `at`.
    pub(crate) fn symbol(
        mut self,
        id: &str,
        definition: SymbolDefinition,
        anchor: Anchor,
        at: Point,
    ) -> Self {
        self.instances
            .push(PlacedInstance::with_anchor_at(id, definition, anchor, at));
        self
    }

    /// Adds a busbar whose left end is at `left`.
    pub(crate) fn busbar(self, id: &str, class: BusClass, left: Point, length: f64) -> Self {
        self.symbol(id, busbar(length, class), Anchor::Left, left)
    }

    /// Adds a conductor from `from` to `to`, with the id `wire_N`.
    pub(crate) fn wire(mut self, from: Point, to: Point) -> Self {
        self.next_wire += 1;
        let end = to.sub_point(from);
        let definition = SymbolDefinition::try_new(
            SymbolKind::Conductor,
            Role::Conductor,
            vec![Primitive::Line {
                from: Point::new(0.0, 0.0),
                to: end,
            }],
            [(Anchor::Start, Point::new(0.0, 0.0)), (Anchor::End, end)],
        )
        .unwrap();
        self.instances.push(PlacedInstance::new(
            format!("wire_{}", self.next_wire),
            definition,
            from,
        ));
        self
    }

    /// A minimal valid AC block: an MV bus feeding a transformer, whose LV
    /// side feeds an LV bus with `feeders` PCS boxes.
    ///
    /// The MV bus spans `(0, 0)..(200, 0)`, the transformer's `lv` anchor is
    /// at `(100, 54)`, the LV bus spans `(0, 80)..(200, 80)`, and feeder `k`
    /// connects a dot on the LV bus to the top of `pcs_k` at `y = 100`.
    /// Conductors are `wire_1` (MV), `wire_2` (LV) and `wire_{k + 2}`.
    pub(crate) fn small_block(feeders: usize) -> Self {
        let mut builder = SceneBuilder::new()
            .busbar("mv_bus", BusClass::Mv, Point::new(0.0, 0.0), 200.0)
            .symbol("tee", node_dot(2.0), Anchor::Center, Point::new(100.0, 0.0))
            .wire(Point::new(100.0, 0.0), Point::new(100.0, 20.0))
            .symbol(
                "transformer",
                transformer(10.0, Orientation::Vertical),
                Anchor::Hv,
                Point::new(100.0, 20.0),
            )
            .wire(Point::new(100.0, 54.0), Point::new(100.0, 80.0))
            .busbar("lv_bus", BusClass::Lv, Point::new(0.0, 80.0), 200.0)
            .symbol(
                "lv_incomer",
                node_dot(2.0),
                Anchor::Center,
                Point::new(100.0, 80.0),
            );

        for k in 1..=feeders {
            let x = match feeders {
                1 => 100.0,
                n => 40.0 + 120.0 * (k - 1) as f64 / (n - 1) as f64,
            };
            builder = builder
                .symbol(
                    &format!("feeder_{k}_dot"),
                    node_dot(2.0),
                    Anchor::Center,
                    Point::new(x, 80.0),
                )
                .wire(Point::new(x, 80.0), Point::new(x, 100.0))
                .symbol(
                    &format!("pcs_{k}"),
                    pcs_box(30.0),
                    Anchor::Top,
                    Point::new(x, 100.0),
                );
        }
        builder
    }

    /// Builds the scene graph.  The topology is left empty.
    pub(crate) fn build(&self) -> SceneGraph {
        let mut scene = SceneGraph::new(Size::new(400.0, 300.0), TopologyGraph::default());
        for instance in &self.instances {
            scene.push_instance(instance.clone());
        }
        scene
    }
}
