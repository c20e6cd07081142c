// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Two-terminal switchgear: disconnectors, breakers, earthing switches,
//! current transformers and surge arresters.

use super::{ground_glyph, Primitive, SymbolDefinition};
use crate::geometry::{Point, Size};
use crate::symbol_kind::{Anchor, Orientation, Role, SymbolKind};

/// Horizontal reach of an open blade, as a share of the symbol length.
const BLADE_OFFSET: f64 = 0.4;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

/// An open disconnector.  The blade pivots at 70% of the length and its tip
/// stands off the axis by 40% of the length.
pub fn switch(length: f64, orientation: Orientation) -> SymbolDefinition {
    let l = length;
    let contact = 0.1 * l;
    SymbolDefinition::oriented(
        SymbolKind::Switch,
        Role::Device,
        orientation,
        vec![
            Primitive::line(p(0.0, 0.0), p(0.0, 0.3 * l)),
            Primitive::line(p(-contact, 0.3 * l), p(contact, 0.3 * l)),
            Primitive::line(p(0.0, 0.7 * l), p(-BLADE_OFFSET * l, 0.35 * l)),
            Primitive::line(p(0.0, 0.7 * l), p(0.0, l)),
        ],
        [(Anchor::In, p(0.0, 0.0)), (Anchor::Out, p(0.0, l))],
    )
}

fn breaker_shapes(l: f64) -> Vec<Primitive> {
    let side = 0.5 * l;
    vec![
        Primitive::line(p(0.0, 0.0), p(0.0, 0.25 * l)),
        Primitive::Rect {
            origin: p(-side / 2.0, 0.25 * l),
            size: Size::new(side, side),
        },
        Primitive::line(p(0.0, 0.75 * l), p(0.0, l)),
    ]
}

/// A circuit breaker: a square body centred on the segment midpoint.
pub fn circuit_breaker(length: f64, orientation: Orientation) -> SymbolDefinition {
    SymbolDefinition::oriented(
        SymbolKind::CircuitBreaker,
        Role::Device,
        orientation,
        breaker_shapes(length),
        [(Anchor::In, p(0.0, 0.0)), (Anchor::Out, p(0.0, length))],
    )
}

/// A horizontal breaker tying two sections of a split LV bus together.
pub fn bus_coupler(length: f64) -> SymbolDefinition {
    SymbolDefinition::oriented(
        SymbolKind::CircuitBreaker,
        Role::Coupler,
        Orientation::Horizontal,
        breaker_shapes(length),
        [(Anchor::In, p(0.0, 0.0)), (Anchor::Out, p(0.0, length))],
    )
}

/// An earthing switch: an open blade followed by an earth glyph whose last
/// bar carries the `ground` anchor.
pub fn earthing_switch(length: f64, orientation: Orientation) -> SymbolDefinition {
    let l = length;
    let mut shapes = vec![
        Primitive::line(p(0.0, 0.0), p(0.0, 0.2 * l)),
        Primitive::line(p(0.0, 0.55 * l), p(-0.25 * l, 0.25 * l)),
        Primitive::line(p(0.0, 0.55 * l), p(0.0, 0.65 * l)),
    ];
    shapes.extend(ground_glyph(0.65 * l, l, 0.5 * l));
    SymbolDefinition::oriented(
        SymbolKind::EarthingSwitch,
        Role::Device,
        orientation,
        shapes,
        [(Anchor::In, p(0.0, 0.0)), (Anchor::Ground, p(0.0, l))],
    )
}

/// A current transformer: three overlapping rings on the axis between `in`
/// and `out`.  It is drawn over a through conductor, not in series with one.
pub fn ct(length: f64, orientation: Orientation) -> SymbolDefinition {
    let l = length;
    let radius = 0.2 * l;
    let ring = |y: f64| Primitive::Circle {
        center: p(0.0, y),
        radius,
    };
    SymbolDefinition::oriented(
        SymbolKind::Ct,
        Role::Device,
        orientation,
        vec![ring(0.3 * l), ring(0.5 * l), ring(0.7 * l)],
        [(Anchor::In, p(0.0, 0.0)), (Anchor::Out, p(0.0, l))],
    )
}

/// A surge arrester: a lead into a parallel-bar body with a gap circle, then
/// an earth glyph.
pub fn surge_arrester(length: f64, orientation: Orientation) -> SymbolDefinition {
    let l = length;
    let half = 0.12 * l;
    let mut shapes = vec![
        Primitive::line(p(0.0, 0.0), p(0.0, 0.15 * l)),
        Primitive::line(p(-half, 0.15 * l), p(half, 0.15 * l)),
        Primitive::line(p(-half, 0.15 * l), p(-half, 0.5 * l)),
        Primitive::line(p(half, 0.15 * l), p(half, 0.5 * l)),
        Primitive::line(p(-half, 0.5 * l), p(half, 0.5 * l)),
        Primitive::Circle {
            center: p(0.0, 0.325 * l),
            radius: 0.07 * l,
        },
        Primitive::line(p(0.0, 0.5 * l), p(0.0, 0.65 * l)),
    ];
    shapes.extend(ground_glyph(0.65 * l, l, 0.4 * l));
    SymbolDefinition::oriented(
        SymbolKind::SurgeArrester,
        Role::Device,
        orientation,
        shapes,
        [(Anchor::Tap, p(0.0, 0.0)), (Anchor::Ground, p(0.0, l))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_switch_blade_stands_off_axis() {
        let sw = switch(50.0, Orientation::Vertical);
        assert_approx_eq!(f64, sw.bounds().min_x(), -20.0);
        assert_eq!(sw.anchor(Anchor::Out), Some(p(0.0, 50.0)));
    }

    #[test]
    fn test_breaker_body_is_centred() {
        let cb = circuit_breaker(40.0, Orientation::Vertical);
        let Primitive::Rect { origin, size } = &cb.shapes()[1] else {
            panic!("breaker body must be a rectangle");
        };
        assert_approx_eq!(f64, origin.y() + size.height() / 2.0, 20.0);
        assert_approx_eq!(f64, origin.x() + size.width() / 2.0, 0.0);
    }

    #[test]
    fn test_bus_coupler() {
        let coupler = bus_coupler(40.0);
        assert_eq!(coupler.kind(), SymbolKind::CircuitBreaker);
        assert_eq!(coupler.role(), Role::Coupler);
        assert_eq!(coupler.anchor(Anchor::Out), Some(p(40.0, 0.0)));
    }

    #[test]
    fn test_ct_rings_sit_between_anchors() {
        let ct = ct(30.0, Orientation::Vertical);
        for shape in ct.shapes() {
            let Primitive::Circle { center, .. } = shape else {
                panic!("CT is drawn with circles only");
            };
            assert_approx_eq!(f64, center.x(), 0.0);
            assert!(center.y() > 0.0 && center.y() < 30.0);
        }
        assert_eq!(ct.shapes().len(), 3);
    }

    #[test]
    fn test_earthing_and_surge_ground_anchor() {
        let es = earthing_switch(40.0, Orientation::Vertical);
        assert_eq!(es.anchor(Anchor::Ground), Some(p(0.0, 40.0)));
        assert_approx_eq!(f64, es.bounds().max_y(), 40.0);

        let sa = surge_arrester(40.0, Orientation::Horizontal);
        assert_eq!(sa.anchor(Anchor::Tap), Some(p(0.0, 0.0)));
        assert_eq!(sa.anchor(Anchor::Ground), Some(p(40.0, 0.0)));
    }
}
