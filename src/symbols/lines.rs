// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Busbars, conductors and junction dots.

use super::{Primitive, SymbolDefinition};
use crate::geometry::{Point, Size};
use crate::symbol_kind::{Anchor, BusClass, Orientation, SymbolKind};

/// Thickness of the drawn bar relative to its length.
const BUSBAR_THICKNESS: f64 = 0.0125;

/// A horizontal busbar of the given length, with `left` at the origin and
/// `right` at `(length, 0)`.
pub fn busbar(length: f64, class: BusClass) -> SymbolDefinition {
    let kind = SymbolKind::Busbar(class);
    let thickness = length * BUSBAR_THICKNESS;
    SymbolDefinition::oriented(
        kind,
        kind.default_role(),
        Orientation::Vertical,
        vec![Primitive::Rect {
            origin: Point::new(0.0, -thickness / 2.0),
            size: Size::new(length, thickness),
        }],
        [
            (Anchor::Left, Point::new(0.0, 0.0)),
            (Anchor::Right, Point::new(length, 0.0)),
        ],
    )
}

/// A straight wire from `start` to `end`.
pub fn conductor(length: f64, orientation: Orientation) -> SymbolDefinition {
    let end = Point::new(0.0, length);
    SymbolDefinition::oriented(
        SymbolKind::Conductor,
        SymbolKind::Conductor.default_role(),
        orientation,
        vec![Primitive::line(Point::new(0.0, 0.0), end)],
        [(Anchor::Start, Point::new(0.0, 0.0)), (Anchor::End, end)],
    )
}

/// A filled dot marking a junction of three or more conductors.
pub fn node_dot(radius: f64) -> SymbolDefinition {
    SymbolDefinition::oriented(
        SymbolKind::NodeDot,
        SymbolKind::NodeDot.default_role(),
        Orientation::Vertical,
        vec![Primitive::Circle {
            center: Point::new(0.0, 0.0),
            radius,
        }],
        [(Anchor::Center, Point::new(0.0, 0.0))],
    )
}
