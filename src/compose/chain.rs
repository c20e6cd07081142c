// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! A running cursor that lays symbols out along a vertical chain.
//!
//! For every element the cursor emits a lead-in conductor, advances past it,
//! places the element with its entry anchor on the cursor and advances past
//! the element.  Conductor ends and anchors therefore meet exactly.

use crate::geometry::Point;
use crate::scene::PlacedInstance;
use crate::symbol_kind::{Anchor, Orientation};
use crate::symbols::{conductor, SymbolDefinition};

/// Hands out unique conductor ids.
#[derive(Debug, Default)]
pub(super) struct WireIds {
    next: usize,
}

impl WireIds {
    pub(super) fn next_id(&mut self) -> String {
        self.next += 1;
        format!("wire_{}", self.next)
    }
}

/// A cursor moving down the vertical axis at a fixed `x`.
#[derive(Debug, Clone, Copy)]
pub(super) struct ChainCursor {
    at: Point,
    unit: f64,
}

impl ChainCursor {
    pub(super) fn new(at: Point, unit: f64) -> Self {
        Self { at, unit }
    }

    pub(super) fn at(&self) -> Point {
        self.at
    }

    /// Emits a vertical conductor `units` long starting at the cursor and
    /// moves the cursor to its end.
    pub(super) fn lead(&mut self, wires: &mut WireIds, units: f64) -> PlacedInstance {
        let length = units * self.unit;
        let wire = PlacedInstance::new(
            wires.next_id(),
            conductor(length, Orientation::Vertical),
            self.at,
        );
        self.at = Point::new(self.at.x(), self.at.y() + length);
        wire
    }

    /// Places `definition` with its `entry` anchor on the cursor and moves
    /// the cursor to its `exit` anchor.  Single-anchor symbols pass the same
    /// anchor twice and leave the cursor where it is.
    pub(super) fn place(
        &mut self,
        id: impl Into<String>,
        definition: SymbolDefinition,
        entry: Anchor,
        exit: Anchor,
    ) -> PlacedInstance {
        let instance = PlacedInstance::with_anchor_at(id, definition, entry, self.at);
        if let Some(out) = instance.anchor(exit) {
            self.at = out;
        }
        instance
    }

    /// Like [`place`][Self::place], but for symbols drawn over a through
    /// conductor.  Returns the through conductor, spanning `entry` to `exit`,
    /// followed by the symbol.
    pub(super) fn place_inline(
        &mut self,
        wires: &mut WireIds,
        id: impl Into<String>,
        definition: SymbolDefinition,
        entry: Anchor,
        exit: Anchor,
    ) -> [PlacedInstance; 2] {
        let start = self.at;
        let instance = self.place(id, definition, entry, exit);
        let through = PlacedInstance::new(
            wires.next_id(),
            conductor(self.at.y() - start.y(), Orientation::Vertical),
            start,
        );
        [through, instance]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{circuit_breaker, ct, node_dot};

    #[test]
    fn test_lead_and_place_meet_exactly() {
        let mut wires = WireIds::default();
        let mut cursor = ChainCursor::new(Point::new(100.0, 40.0), 20.0);

        let wire = cursor.lead(&mut wires, 1.5);
        assert_eq!(wire.id(), "wire_1");
        assert_eq!(
            wire.endpoints(),
            Some((Point::new(100.0, 40.0), Point::new(100.0, 70.0)))
        );

        let cb = cursor.place(
            "cb",
            circuit_breaker(40.0, Orientation::Vertical),
            Anchor::In,
            Anchor::Out,
        );
        assert_eq!(cb.anchor(Anchor::In), Some(Point::new(100.0, 70.0)));
        assert_eq!(cursor.at(), Point::new(100.0, 110.0));

        let dot = cursor.place("dot", node_dot(3.0), Anchor::Center, Anchor::Center);
        assert_eq!(dot.anchor(Anchor::Center), Some(cursor.at()));
        assert_eq!(cursor.at(), Point::new(100.0, 110.0));
    }

    #[test]
    fn test_place_inline() {
        let mut wires = WireIds::default();
        let mut cursor = ChainCursor::new(Point::new(0.0, 0.0), 20.0);
        let [through, ct] = cursor.place_inline(
            &mut wires,
            "ct",
            ct(30.0, Orientation::Vertical),
            Anchor::In,
            Anchor::Out,
        );
        assert_eq!(
            through.endpoints(),
            Some((Point::new(0.0, 0.0), Point::new(0.0, 30.0)))
        );
        assert_eq!(ct.anchor(Anchor::Out), Some(Point::new(0.0, 30.0)));
        assert_eq!(cursor.at(), Point::new(0.0, 30.0));
    }
}
