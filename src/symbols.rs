// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The symbol library: pure generators that turn sizing parameters into a
//! [`SymbolDefinition`], i.e. local geometry plus named anchor points.
//!
//! Every generator puts its primary anchor at the local origin and its
//! secondary anchor at the far end of the orientation axis.  Geometry is
//! drawn along the vertical axis and mirrored onto the horizontal one, so
//! that `in -> out` stays monotonic along whichever axis is requested.

mod lines;
mod machines;
mod switchgear;

pub use lines::{busbar, conductor, node_dot};
pub use machines::{pcs_box, transformer};
pub use switchgear::{bus_coupler, circuit_breaker, ct, earthing_switch, surge_arrester, switch};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::geometry::{Bounds, Point, Size};
use crate::symbol_kind::{Anchor, KindPredicates, Orientation, Role, SymbolKind};
use crate::Error;

/// A primitive shape in either a symbol's local frame or absolute space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Line { from: Point, to: Point },
    Rect { origin: Point, size: Size },
    Circle { center: Point, radius: f64 },
    Polygon { points: Vec<Point> },
}

impl Primitive {
    pub(crate) fn line(from: Point, to: Point) -> Self {
        Primitive::Line { from, to }
    }

    /// Applies `f` to every defining point of the primitive.
    ///
    /// `f` must be a translation, a uniform scale or an axis swap, so that
    /// rectangles stay axis-aligned and radii keep their meaning.
    fn map_points(&self, f: impl Fn(Point) -> Point) -> Self {
        match self {
            Primitive::Line { from, to } => Primitive::Line {
                from: f(*from),
                to: f(*to),
            },
            Primitive::Rect { origin, size } => {
                let far = origin.add_point(Point::new(size.width(), size.height()));
                let b = Bounds::from_corners(f(*origin), f(far));
                Primitive::Rect {
                    origin: b.min_point(),
                    size: Size::new(b.width(), b.height()),
                }
            }
            Primitive::Circle { center, radius } => Primitive::Circle {
                center: f(*center),
                radius: *radius,
            },
            Primitive::Polygon { points } => Primitive::Polygon {
                points: points.iter().map(|p| f(*p)).collect(),
            },
        }
    }

    /// Returns the primitive moved by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        self.map_points(|p| p.add_point(offset))
    }

    /// Returns the bounds of the primitive.
    pub fn bounds(&self) -> Bounds {
        match self {
            Primitive::Line { from, to } => Bounds::from_corners(*from, *to),
            Primitive::Rect { origin, size } => Bounds::new_from_top_left(*origin, *size),
            Primitive::Circle { center, radius } => Bounds::from_corners(*center, *center).inflate(*radius),
            Primitive::Polygon { points } => points
                .iter()
                .map(|p| Bounds::from_corners(*p, *p))
                .reduce(|a, b| a.merge(&b))
                .unwrap_or_default(),
        }
    }
}

/// A symbol in its local coordinate frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolDefinition {
    kind: SymbolKind,
    role: Role,
    shapes: Vec<Primitive>,
    anchors: BTreeMap<Anchor, Point>,
}

impl SymbolDefinition {
    /// Creates a new [`SymbolDefinition`].
    ///
    /// Returns an error unless `anchors` names exactly the anchor set of
    /// `kind`, each anchor once.
    pub fn try_new(
        kind: SymbolKind,
        role: Role,
        shapes: Vec<Primitive>,
        anchors: impl IntoIterator<Item = (Anchor, Point)>,
    ) -> Result<Self, Error> {
        let mut map = BTreeMap::new();
        for (anchor, offset) in anchors {
            if map.insert(anchor, offset).is_some() {
                return Err(Error::invalid_symbol(format!(
                    "{kind} defines anchor `{anchor}` more than once."
                )));
            }
        }
        let expected = kind.anchor_set();
        if let Some(missing) = expected.iter().find(|a| !map.contains_key(a)) {
            return Err(Error::invalid_symbol(format!(
                "{kind} is missing anchor `{missing}`."
            )));
        }
        if let Some(extra) = map.keys().find(|a| !expected.contains(a)) {
            return Err(Error::invalid_symbol(format!(
                "{kind} can't have anchor `{extra}`."
            )));
        }
        if role == Role::Conductor && kind != SymbolKind::Conductor {
            return Err(Error::invalid_symbol(format!(
                "{kind} can't have the conductor role."
            )));
        }
        Ok(Self {
            kind,
            role,
            shapes,
            anchors: map,
        })
    }

    /// Used by the generators, which always produce the full anchor set in
    /// the vertical frame and mirror it to the requested orientation.
    fn oriented(
        kind: SymbolKind,
        role: Role,
        orientation: Orientation,
        shapes: Vec<Primitive>,
        anchors: impl IntoIterator<Item = (Anchor, Point)>,
    ) -> Self {
        let orient = |p: Point| match orientation {
            Orientation::Vertical => p,
            Orientation::Horizontal => Point::new(p.y(), p.x()),
        };
        Self {
            kind,
            role,
            shapes: shapes.iter().map(|s| s.map_points(orient)).collect(),
            anchors: anchors.into_iter().map(|(a, p)| (a, orient(p))).collect(),
        }
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn shapes(&self) -> &[Primitive] {
        &self.shapes
    }

    /// Returns the local offset of the given anchor, if the symbol has it.
    pub fn anchor(&self, anchor: Anchor) -> Option<Point> {
        self.anchors.get(&anchor).copied()
    }

    /// Returns all anchors in their local frame, ordered by name.
    pub fn anchors(&self) -> impl Iterator<Item = (Anchor, Point)> + '_ {
        self.anchors.iter().map(|(a, p)| (*a, *p))
    }

    /// Returns the local bounds of the geometry and anchors.
    pub fn bounds(&self) -> Bounds {
        self.shapes
            .iter()
            .map(Primitive::bounds)
            .chain(self.anchors.values().map(|p| Bounds::from_corners(*p, *p)))
            .reduce(|a, b| a.merge(&b))
            .unwrap_or_default()
    }

    /// Returns the overall width and height of the symbol.
    pub fn size(&self) -> Size {
        let b = self.bounds();
        Size::new(b.width(), b.height())
    }

    /// Returns the distance between the primary and the secondary anchor, or
    /// zero for single-anchor symbols.
    pub fn length(&self) -> f64 {
        match self.kind.anchor_set() {
            [first, second, ..] => match (self.anchor(*first), self.anchor(*second)) {
                (Some(a), Some(b)) => a.distance(b),
                _ => 0.0,
            },
            _ => 0.0,
        }
    }
}

impl KindPredicates for SymbolDefinition {
    fn symbol_kind(&self) -> SymbolKind {
        self.kind
    }
}

/// The three-bar earth glyph, with its stem starting at `top` and the last
/// bar ending at `bottom` on the vertical axis.
fn ground_glyph(top: f64, bottom: f64, width: f64) -> Vec<Primitive> {
    let step = (bottom - top) / 3.0;
    let bar = |y: f64, w: f64| Primitive::line(Point::new(-w / 2.0, y), Point::new(w / 2.0, y));
    vec![
        Primitive::line(Point::new(0.0, top), Point::new(0.0, top + step)),
        bar(top + step, width),
        bar(top + 2.0 * step, width * 0.6),
        bar(bottom, width * 0.2),
    ]
}
