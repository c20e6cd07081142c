// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Checks on the MV and LV busbars, and on the transformer feeding the LV
//! side.

use std::collections::BTreeSet;

use crate::geometry::Point;
use crate::scene::PlacedInstance;
use crate::symbol_kind::{Anchor, KindPredicates, Role};
use crate::Error;

use super::SceneChecks;

impl SceneChecks<'_> {
    fn lv_buses(&self) -> impl Iterator<Item = &PlacedInstance> + '_ {
        self.scene.instances().filter(|i| i.is_lv_busbar())
    }

    /// Whether `p` lies on the span of some LV busbar.
    fn on_lv_bus(&self, p: Point) -> bool {
        self.lv_buses().any(|bus| {
            let (Some(left), Some(right)) = (bus.anchor(Anchor::Left), bus.anchor(Anchor::Right))
            else {
                return false;
            };
            let (min_x, max_x) = (left.x().min(right.x()), left.x().max(right.x()));
            (p.y() - left.y()).abs() <= self.tolerance
                && p.x() >= min_x - self.tolerance
                && p.x() <= max_x + self.tolerance
        })
    }

    /// Checks that there is exactly one MV busbar and at least one LV
    /// busbar.
    pub(super) fn check_required_buses(&self, errors: &mut Vec<Error>) {
        let mv_buses = self
            .scene
            .instances()
            .filter(|i| i.is_mv_busbar())
            .collect::<Vec<_>>();
        match mv_buses.as_slice() {
            [] => errors.push(Error::missing_mv_bus("No MV busbar found.")),
            [_] => {}
            [first, rest @ ..] => errors.push(Error::duplicate_mv_bus(format!(
                "Found {} MV busbars, expected one: {} at {} and {}.",
                mv_buses.len(),
                first.id(),
                first.position(),
                rest.iter()
                    .map(|b| format!("{} at {}", b.id(), b.position()))
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }

        if self.lv_buses().next().is_none() {
            errors.push(Error::missing_lv_bus("No LV busbar found."));
        }
    }

    /// Checks that the `lv` anchor of every transformer lies on an LV
    /// busbar, directly or at the far end of a chain of conductors.
    ///
    /// Skipped when there is no LV busbar, which is already reported.
    pub(super) fn check_transformer_lv(&self, errors: &mut Vec<Error>) {
        if self.lv_buses().next().is_none() {
            return;
        }
        for transformer in self.scene.instances().filter(|i| i.is_transformer()) {
            let Some(lv) = transformer.anchor(Anchor::Lv) else {
                continue;
            };
            if !self.reaches_lv_bus(lv) {
                errors.push(Error::transformer_lv_disconnected(format!(
                    "Transformer {} LV at {} is not connected to the LV bus.",
                    transformer.id(),
                    lv
                )));
            }
        }
    }

    /// Walks conductors outward from `start` and returns whether any point
    /// reached lies on an LV busbar.
    fn reaches_lv_bus(&self, start: Point) -> bool {
        let conductors = self
            .scene
            .conductors()
            .filter_map(|c| c.endpoints())
            .collect::<Vec<_>>();

        let mut visited = BTreeSet::new();
        let mut stack = vec![start];
        while let Some(p) = stack.pop() {
            if self.on_lv_bus(p) {
                return true;
            }
            for (i, (a, b)) in conductors.iter().enumerate() {
                let next = if a.coincides(p, self.tolerance) {
                    *b
                } else if b.coincides(p, self.tolerance) {
                    *a
                } else {
                    continue;
                };
                if visited.insert(i) {
                    stack.push(next);
                }
            }
        }
        false
    }

    /// Checks that a split LV bus comes with a bus coupler.
    pub(super) fn check_bus_coupler(&self, errors: &mut Vec<Error>) {
        let lv_buses = self.lv_buses().count();
        if lv_buses < 2 {
            return;
        }
        if self.scene.instances().any(|i| i.role() == Role::Coupler) {
            return;
        }
        errors.push(Error::missing_bus_coupler(format!(
            "Found {} LV busbars but no bus coupler.",
            lv_buses
        )));
    }
}
