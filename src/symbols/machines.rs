// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Transformers and power-conversion boxes.

use super::{Primitive, SymbolDefinition};
use crate::geometry::{Point, Size};
use crate::symbol_kind::{Anchor, Orientation, Role, SymbolKind};

/// Distance between the winding centres, as a multiple of the radius.
const WINDING_SPACING: f64 = 1.4;

/// A two-winding transformer: two stacked circles, delta on the HV winding
/// and star on the LV winding.  `hv` is at the top of the upper circle and
/// `lv` at the bottom of the lower one, so the overall height is
/// `(2 + 1.4) * radius` and the width `2 * radius`.
pub fn transformer(radius: f64, orientation: Orientation) -> SymbolDefinition {
    let r = radius;
    let hv_center = Point::new(0.0, r);
    let lv_center = Point::new(0.0, r + WINDING_SPACING * r);
    let height = 2.0 * r + WINDING_SPACING * r;

    let marker = 0.45 * r;
    let dx = marker * 0.866;
    let delta = Primitive::Polygon {
        points: vec![
            hv_center.add_point(Point::new(0.0, -marker)),
            hv_center.add_point(Point::new(-dx, marker / 2.0)),
            hv_center.add_point(Point::new(dx, marker / 2.0)),
        ],
    };
    let star_arm = |offset: Point| Primitive::line(lv_center, lv_center.add_point(offset));

    SymbolDefinition::oriented(
        SymbolKind::Transformer,
        Role::Device,
        orientation,
        vec![
            Primitive::Circle {
                center: hv_center,
                radius: r,
            },
            Primitive::Circle {
                center: lv_center,
                radius: r,
            },
            delta,
            star_arm(Point::new(0.0, -marker)),
            star_arm(Point::new(-dx, marker / 2.0)),
            star_arm(Point::new(dx, marker / 2.0)),
        ],
        [
            (Anchor::Hv, Point::new(0.0, 0.0)),
            (Anchor::Lv, Point::new(0.0, height)),
        ],
    )
}

/// A power conversion system: a bordered square hanging from its `top`
/// anchor, split by a diagonal, with an AC mark top-left and a DC mark
/// bottom-right.
pub fn pcs_box(side: f64) -> SymbolDefinition {
    let s = side;
    let half = s / 2.0;
    let mark = 0.18 * s;
    let ac_y = 0.25 * s;
    let dc_y = 0.75 * s;
    let ac_x = -0.22 * s;
    let dc_x = 0.22 * s;

    SymbolDefinition::oriented(
        SymbolKind::PcsBox,
        Role::Device,
        Orientation::Vertical,
        vec![
            Primitive::Rect {
                origin: Point::new(-half, 0.0),
                size: Size::new(s, s),
            },
            Primitive::line(Point::new(-half, s), Point::new(half, 0.0)),
            Primitive::Polygon {
                points: vec![
                    Point::new(ac_x - mark / 2.0, ac_y),
                    Point::new(ac_x - mark / 4.0, ac_y - mark / 4.0),
                    Point::new(ac_x + mark / 4.0, ac_y + mark / 4.0),
                    Point::new(ac_x + mark / 2.0, ac_y),
                ],
            },
            Primitive::line(
                Point::new(dc_x - mark / 2.0, dc_y - mark / 6.0),
                Point::new(dc_x + mark / 2.0, dc_y - mark / 6.0),
            ),
            Primitive::line(
                Point::new(dc_x - mark / 2.0, dc_y + mark / 6.0),
                Point::new(dc_x + mark / 2.0, dc_y + mark / 6.0),
            ),
        ],
        [(Anchor::Top, Point::new(0.0, 0.0))],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_transformer_extent() {
        let tx = transformer(25.0, Orientation::Vertical);
        assert_approx_eq!(f64, tx.size().width(), 50.0);
        assert_approx_eq!(f64, tx.size().height(), 85.0);
        assert_eq!(tx.anchor(Anchor::Lv), Some(Point::new(0.0, 85.0)));
        assert_approx_eq!(f64, tx.length(), 85.0);
    }

    #[test]
    fn test_pcs_box() {
        let pcs = pcs_box(60.0);
        assert_eq!(pcs.size(), Size::new(60.0, 60.0));
        assert_eq!(pcs.anchor(Anchor::Top), Some(Point::new(0.0, 0.0)));
        assert_approx_eq!(f64, pcs.length(), 0.0);
    }
}
