// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Checks that conductors end on anchors and that no symbol floats.

use crate::symbol_kind::KindPredicates;
use crate::Error;

use super::SceneChecks;

impl SceneChecks<'_> {
    /// Reports every conductor endpoint that doesn't meet a symbol anchor.
    ///
    /// With junctions allowed, an endpoint shared with another conductor is
    /// fine too.
    pub(super) fn check_anchor_snap(&self, errors: &mut Vec<Error>) {
        for end in &self.conductor_ends {
            let on_anchor = self
                .scene
                .instances()
                .filter(|i| !i.is_conductor())
                .flat_map(|i| i.anchors())
                .any(|(_, p)| p.coincides(end.at, self.tolerance));
            if on_anchor {
                continue;
            }

            let on_junction = self.allow_junctions
                && self
                    .conductor_ends
                    .iter()
                    .any(|other| other.id != end.id && other.at.coincides(end.at, self.tolerance));
            if on_junction {
                continue;
            }

            errors.push(Error::unsnapped_conductor(format!(
                "Conductor {} end at {} is not snapped to any anchor.",
                end.id, end.at
            )));
        }
    }

    /// Reports every symbol that needs a connection but has none of its
    /// anchors on a conductor endpoint.
    pub(super) fn check_floating_symbols(&self, errors: &mut Vec<Error>) {
        for instance in self.scene.instances().filter(|i| i.needs_connection()) {
            if instance.anchors().any(|(_, p)| self.touches_conductor(p)) {
                continue;
            }
            errors.push(Error::floating_symbol(format!(
                "{} {} at {} is floating.",
                instance.kind(),
                instance.id(),
                instance.position()
            )));
        }
    }
}
