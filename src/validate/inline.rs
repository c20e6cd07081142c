// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Checks that inline components sit on a conductor.

use crate::geometry::{distance_to_line, Bounds, Point};
use crate::symbol_kind::{Anchor, KindPredicates};
use crate::Error;

use super::SceneChecks;

impl SceneChecks<'_> {
    /// Whether `a` and `b` both lie on the segment of a single conductor.
    fn on_one_conductor(&self, a: Point, b: Point) -> bool {
        self.scene
            .conductors()
            .filter_map(|c| c.endpoints())
            .any(|(start, end)| {
                let area = Bounds::from_corners(start, end).inflate(self.tolerance);
                [a, b].iter().all(|p| {
                    distance_to_line(*p, start, end) <= self.tolerance && area.contains(*p)
                })
            })
    }

    pub(super) fn check_inline_components(&self, errors: &mut Vec<Error>) {
        for instance in self.scene.instances().filter(|i| i.is_inline()) {
            let (Some(a), Some(b)) = (instance.anchor(Anchor::In), instance.anchor(Anchor::Out))
            else {
                continue;
            };
            if !self.on_one_conductor(a, b) {
                errors.push(Error::not_inline(format!(
                    "{} {} at {} is not inline with a conductor.",
                    instance.kind(),
                    instance.id(),
                    instance.position()
                )));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::Point;
    use crate::symbol_kind::{Anchor, Orientation};
    use crate::symbols::ct;
    use crate::test_utils::SceneBuilder;
    use crate::{Error, Validator};

    fn ct_scene(through: bool) -> SceneBuilder {
        let builder = SceneBuilder::small_block(1)
            .wire(Point::new(200.0, 0.0), Point::new(200.0, 10.0))
            .symbol(
                "ct",
                ct(10.0, Orientation::Vertical),
                Anchor::In,
                Point::new(200.0, 10.0),
            );
        if through {
            builder.wire(Point::new(200.0, 10.0), Point::new(200.0, 20.0))
        } else {
            builder
        }
    }

    #[test]
    fn test_ct_over_conductor_is_inline() {
        let report = Validator::default().validate(&ct_scene(true).build());
        assert!(report.ok(), "{:?}", report.messages());
    }

    #[test]
    fn test_ct_without_conductor_is_not_inline() {
        let report = Validator::default().validate(&ct_scene(false).build());
        assert_eq!(
            report.errors(),
            &[Error::not_inline(
                "CT ct at (200.0, 10.0) is not inline with a conductor."
            )]
        );
    }

    #[test]
    fn test_ct_beside_conductor_is_not_inline() {
        let mut scene = ct_scene(true)
            .wire(Point::new(210.0, 0.0), Point::new(210.0, 10.0))
            .build();
        scene
            .instance_mut("ct")
            .unwrap()
            .translate(Point::new(10.0, 0.0));
        let report = Validator::default().validate(&scene);
        assert_eq!(
            report.errors().last(),
            Some(&Error::not_inline(
                "CT ct at (210.0, 10.0) is not inline with a conductor."
            ))
        );
    }
}
