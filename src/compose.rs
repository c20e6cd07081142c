// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The diagram composer: lays out a battery-storage AC block as a vertical
//! chain of symbols and returns it as a [`SceneGraph`].
//!
//! The main path runs top to bottom:
//!
//! ```text
//! MV bus -> tee -> switch -> breaker -> CT -> tap -> transformer -> LV bus
//!                                            |-> earthing switch (left stub)
//!                                            |-> surge arrester (right stub)
//! LV bus -> N x (dot -> breaker -> PCS box)
//! ```
//!
//! Every length is a multiple of a base unit times the configured scale, so
//! proportions don't depend on the scale.  The composer never validates its
//! own output; run the [`Validator`][crate::Validator] for that.

mod chain;
mod electrical;
pub mod labels;

pub use labels::{place_label, LabelPlacement, MAX_LABEL_SHIFTS};

use crate::config::DiagramConfig;
use crate::geometry::{Bounds, Point, Size};
use crate::scene::{Label, PlacedInstance, SceneGraph};
use crate::symbol_kind::{Anchor, BusClass, Orientation};
use crate::symbols;
use crate::topology::TopologyGraph;

use chain::{ChainCursor, WireIds};

/// Length of one layout unit at scale `1.0`.
pub const BASE_UNIT: f64 = 20.0;

// Everything below is in layout units.
const CANVAS_WIDTH: f64 = 40.0;
const TOP_MARGIN: f64 = 3.0;
const BOTTOM_MARGIN: f64 = 2.0;
const MV_BUS_LENGTH: f64 = 16.0;
const LV_BUS_LENGTH: f64 = 24.0;
const FEEDER_SPAN: f64 = 20.0;
const BRANCH_STUB: f64 = 4.0;
const BRANCH_LENGTH: f64 = 2.0;
const DOT_RADIUS: f64 = 0.15;
const FONT_SIZE: f64 = 0.6;

/// `(lead-in, length)` of each element on the main chain.
const SWITCH: (f64, f64) = (1.5, 2.0);
const BREAKER: (f64, f64) = (1.0, 2.0);
const CT: (f64, f64) = (1.0, 1.5);
const TAP_LEAD: f64 = 1.0;
const TRANSFORMER_LEAD: f64 = 1.5;
const TRANSFORMER_RADIUS: f64 = 1.25;
const LV_BUS_LEAD: f64 = 1.5;

/// `(lead-in, length)` of the elements on each feeder.
const FEEDER_BREAKER: (f64, f64) = (1.0, 2.0);
const PCS_LEAD: f64 = 1.5;
const PCS_SIDE: f64 = 3.0;

/// Composes the single-line diagram of an AC block.
///
/// Out-of-range parameters are normalised, with a warning, and never
/// rejected.  Identical configurations always produce identical scene
/// graphs.
pub fn compose(config: &DiagramConfig) -> SceneGraph {
    let feeders = config.normalized_feeder_count();
    if feeders as i64 != config.feeder_count {
        tracing::warn!(
            "Feeder count {} is out of range, drawing {} feeders.",
            config.feeder_count,
            feeders
        );
    }
    let scale = config.normalized_scale();
    if scale != config.scale {
        tracing::warn!("Scale {} is not a positive number, using {}.", config.scale, scale);
    }

    let topology = electrical::ac_block_topology(feeders).unwrap_or_else(|e| {
        tracing::error!("Could not build the AC block topology: {}", e);
        TopologyGraph::default()
    });

    let mut composer = Composer::new(BASE_UNIT * scale, topology, config.show_labels);
    let (mv_caption, lv_caption) = bus_captions(&config.voltage_label);

    let lv_bus_y = composer.main_chain(&mv_caption, config);
    let bottom = composer.feeders(feeders, lv_bus_y, &lv_caption);
    let scene = composer.finish(bottom);

    tracing::debug!(
        "Composed AC block with {} feeders: {} nodes on a {}x{} canvas.",
        feeders,
        scene.nodes().len(),
        scene.size().width(),
        scene.size().height()
    );
    scene
}

/// Returns the offsets of `count` feeders from the centre of a bus section
/// `span` wide, spaced evenly from one end of the span to the other.
///
/// A single feeder sits in the centre.
pub fn feeder_offsets(count: usize, span: f64) -> Vec<f64> {
    match count {
        0 => vec![],
        1 => vec![0.0],
        n => {
            let spacing = span / (n - 1) as f64;
            (0..n).map(|i| -span / 2.0 + i as f64 * spacing).collect()
        }
    }
}

/// Splits `33.0 kV/690 V` into `("MV BUS 33.0 kV", "LV BUS 690 V")`.
fn bus_captions(voltage_label: &str) -> (String, String) {
    let caption = |prefix: &str, part: &str| {
        let part = part.trim();
        if part.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix} {part}")
        }
    };
    match voltage_label.split_once('/') {
        Some((mv, lv)) => (caption("MV BUS", mv), caption("LV BUS", lv)),
        None => (caption("MV BUS", voltage_label), caption("LV BUS", "")),
    }
}

struct Composer {
    unit: f64,
    scene: SceneGraph,
    wires: WireIds,
    committed: Vec<Bounds>,
    labels: Vec<Label>,
    show_labels: bool,
}

impl Composer {
    fn new(unit: f64, topology: TopologyGraph, show_labels: bool) -> Self {
        Self {
            unit,
            scene: SceneGraph::new(Size::new(CANVAS_WIDTH * unit, 0.0), topology),
            wires: WireIds::default(),
            committed: Vec::new(),
            labels: Vec::new(),
            show_labels,
        }
    }

    fn u(&self, units: f64) -> f64 {
        units * self.unit
    }

    fn center_x(&self) -> f64 {
        self.u(CANVAS_WIDTH / 2.0)
    }

    fn push(&mut self, instance: PlacedInstance) {
        self.scene.push_instance(instance);
    }

    fn node_dot(&mut self, id: impl Into<String>, at: Point) {
        let dot = PlacedInstance::with_anchor_at(
            id,
            symbols::node_dot(self.u(DOT_RADIUS)),
            Anchor::Center,
            at,
        );
        self.push(dot);
    }

    /// Lays out everything from the MV bus down to the LV bus and returns the
    /// y-coordinate of the LV bus.
    fn main_chain(&mut self, mv_caption: &str, config: &DiagramConfig) -> f64 {
        let cx = self.center_x();
        let top = Point::new(cx, self.u(TOP_MARGIN));

        let mv_bus_left = Point::new(cx - self.u(MV_BUS_LENGTH / 2.0), top.y());
        self.push(PlacedInstance::new(
            "mv_bus",
            symbols::busbar(self.u(MV_BUS_LENGTH), BusClass::Mv),
            mv_bus_left,
        ));
        self.node_dot("tee", top);
        self.label(
            mv_caption,
            Point::new(mv_bus_left.x(), top.y() - self.u(FONT_SIZE * 2.5)),
        );

        let mut cursor = ChainCursor::new(top, self.unit);

        let wire = cursor.lead(&mut self.wires, SWITCH.0);
        self.push(wire);
        let switch = symbols::switch(self.u(SWITCH.1), Orientation::Vertical);
        self.push(cursor.place("mv_switch", switch, Anchor::In, Anchor::Out));

        let wire = cursor.lead(&mut self.wires, BREAKER.0);
        self.push(wire);
        let breaker = symbols::circuit_breaker(self.u(BREAKER.1), Orientation::Vertical);
        self.push(cursor.place("mv_breaker", breaker, Anchor::In, Anchor::Out));

        let wire = cursor.lead(&mut self.wires, CT.0);
        self.push(wire);
        let ct = symbols::ct(self.u(CT.1), Orientation::Vertical);
        for instance in cursor.place_inline(&mut self.wires, "ct", ct, Anchor::In, Anchor::Out) {
            self.push(instance);
        }

        let wire = cursor.lead(&mut self.wires, TAP_LEAD);
        self.push(wire);
        let tap = cursor.at();
        self.node_dot("tap", tap);
        self.branches(tap);

        let wire = cursor.lead(&mut self.wires, TRANSFORMER_LEAD);
        self.push(wire);
        let transformer_top = cursor.at();
        let transformer =
            symbols::transformer(self.u(TRANSFORMER_RADIUS), Orientation::Vertical);
        self.push(cursor.place("transformer", transformer, Anchor::Hv, Anchor::Lv));
        let label_at = Point::new(
            cx + self.u(TRANSFORMER_RADIUS + 0.75),
            transformer_top.y() + self.u(1.0),
        );
        self.label(&config.voltage_label, label_at);
        self.label(&config.rating_label, label_at);

        let wire = cursor.lead(&mut self.wires, LV_BUS_LEAD);
        self.push(wire);
        let incomer = cursor.at();
        self.push(PlacedInstance::new(
            "lv_bus",
            symbols::busbar(self.u(LV_BUS_LENGTH), BusClass::Lv),
            Point::new(cx - self.u(LV_BUS_LENGTH / 2.0), incomer.y()),
        ));
        self.node_dot("lv_incomer", incomer);

        incomer.y()
    }

    /// Attaches the earthing switch and the surge arrester to the tap node,
    /// each on its own horizontal stub.
    fn branches(&mut self, tap: Point) {
        let stub = self.u(BRANCH_STUB);

        let earthing_at = Point::new(tap.x() - stub, tap.y());
        let wire = PlacedInstance::new(
            self.wires.next_id(),
            symbols::conductor(stub, Orientation::Horizontal),
            earthing_at,
        );
        self.push(wire);
        let earthing = symbols::earthing_switch(self.u(BRANCH_LENGTH), Orientation::Vertical);
        self.push(PlacedInstance::with_anchor_at(
            "earthing_switch",
            earthing,
            Anchor::In,
            earthing_at,
        ));

        let surge_at = Point::new(tap.x() + stub, tap.y());
        let wire = PlacedInstance::new(
            self.wires.next_id(),
            symbols::conductor(stub, Orientation::Horizontal),
            tap,
        );
        self.push(wire);
        let arrester = symbols::surge_arrester(self.u(BRANCH_LENGTH), Orientation::Vertical);
        self.push(PlacedInstance::with_anchor_at(
            "surge_arrester",
            arrester,
            Anchor::Tap,
            surge_at,
        ));
    }

    /// Lays out `count` feeders below the LV bus and returns the lowest
    /// y-coordinate used.
    fn feeders(&mut self, count: usize, lv_bus_y: f64, lv_caption: &str) -> f64 {
        let cx = self.center_x();
        self.label(
            lv_caption,
            Point::new(
                cx - self.u(LV_BUS_LENGTH / 2.0),
                lv_bus_y - self.u(FONT_SIZE * 2.5),
            ),
        );

        let mut bottom = lv_bus_y;
        for (i, offset) in feeder_offsets(count, self.u(FEEDER_SPAN))
            .into_iter()
            .enumerate()
        {
            let k = i + 1;
            let at = Point::new(cx + offset, lv_bus_y);
            self.node_dot(format!("feeder_{k}_dot"), at);

            let mut cursor = ChainCursor::new(at, self.unit);
            let wire = cursor.lead(&mut self.wires, FEEDER_BREAKER.0);
            self.push(wire);
            let breaker =
                symbols::circuit_breaker(self.u(FEEDER_BREAKER.1), Orientation::Vertical);
            self.push(cursor.place(
                format!("feeder_{k}_breaker"),
                breaker,
                Anchor::In,
                Anchor::Out,
            ));

            let wire = cursor.lead(&mut self.wires, PCS_LEAD);
            self.push(wire);
            let pcs_top = cursor.at();
            self.push(cursor.place(
                format!("pcs_{k}"),
                symbols::pcs_box(self.u(PCS_SIDE)),
                Anchor::Top,
                Anchor::Top,
            ));

            let pcs_bottom = pcs_top.y() + self.u(PCS_SIDE);
            let text = format!("PCS-{k}");
            let width = labels::text_box(&text, self.u(FONT_SIZE), at).width();
            self.label(
                &text,
                Point::new(at.x() - width / 2.0, pcs_bottom + self.u(0.4)),
            );
            bottom = bottom.max(pcs_bottom);
        }
        bottom
    }

    /// Places a label at `top_left`, or lower if it would overlap an earlier
    /// one.  Empty texts and disabled labels are skipped.
    fn label(&mut self, text: &str, top_left: Point) {
        if !self.show_labels || text.trim().is_empty() {
            return;
        }
        let font_size = self.u(FONT_SIZE);
        let target = labels::text_box(text, font_size, top_left);
        let (placement, committed) = place_label(
            std::mem::take(&mut self.committed),
            target,
            labels::shift_step(font_size),
        );
        self.committed = committed;
        self.labels.push(Label::new(text, placement.bounds(), font_size));
    }

    fn finish(mut self, bottom: f64) -> SceneGraph {
        let height = self
            .labels
            .iter()
            .map(|l| l.bounds().max_y())
            .fold(bottom, f64::max)
            + self.u(BOTTOM_MARGIN);
        let width = self.u(CANVAS_WIDTH);
        self.scene.set_size(Size::new(width, height));
        for label in self.labels {
            self.scene.push_label(label);
        }
        self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbol_kind::{KindPredicates, SymbolKind};
    use crate::{Validator, ValidatorConfig};
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    fn config(feeder_count: i64) -> DiagramConfig {
        DiagramConfig {
            feeder_count,
            voltage_label: "33.0 kV/690 V".to_string(),
            rating_label: "7.7 MVA".to_string(),
            ..Default::default()
        }
    }

    fn pcs_xs(scene: &SceneGraph) -> Vec<f64> {
        scene
            .instances()
            .filter(|i| i.kind() == SymbolKind::PcsBox)
            .map(|i| i.position().x())
            .collect()
    }

    #[test]
    fn test_feeder_offsets() {
        assert_eq!(feeder_offsets(0, 400.0), Vec::<f64>::new());
        assert_eq!(feeder_offsets(1, 400.0), vec![0.0]);
        assert_eq!(feeder_offsets(2, 400.0), vec![-200.0, 200.0]);
        assert_eq!(feeder_offsets(5, 400.0), vec![-200.0, -100.0, 0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_bus_captions() {
        assert_eq!(
            bus_captions("33.0 kV/690 V"),
            ("MV BUS 33.0 kV".to_string(), "LV BUS 690 V".to_string())
        );
        assert_eq!(
            bus_captions("11 kV"),
            ("MV BUS 11 kV".to_string(), "LV BUS".to_string())
        );
        assert_eq!(bus_captions(""), ("MV BUS".to_string(), "LV BUS".to_string()));
    }

    #[test]
    fn test_feeders_are_evenly_spaced() {
        for n in 2..=6 {
            let scene = compose(&config(n));
            let xs = pcs_xs(&scene);
            assert_eq!(xs.len(), n as usize);
            let spacing = xs[1] - xs[0];
            assert_approx_eq!(
                f64,
                spacing,
                FEEDER_SPAN * BASE_UNIT / (n - 1) as f64,
                epsilon = 1e-9
            );
            for pair in xs.windows(2) {
                assert_approx_eq!(f64, pair[1] - pair[0], spacing, epsilon = 1e-9);
            }
            let feeders = scene.topology().leaves_with_prefix("PCS_FEEDER_").count();
            assert_eq!(feeders, n as usize);
        }
    }

    #[test]
    fn test_out_of_range_feeder_counts_are_clamped() {
        assert_eq!(pcs_xs(&compose(&config(1))).len(), 2);
        assert_eq!(pcs_xs(&compose(&config(0))).len(), 2);
        assert_eq!(pcs_xs(&compose(&config(7))).len(), 6);
        assert_eq!(compose(&config(1)), compose(&config(2)));
        assert_eq!(compose(&config(7)), compose(&config(6)));
        for x in pcs_xs(&compose(&config(1))) {
            assert!(x.is_finite());
        }
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose(&config(4));
        let b = compose(&config(4));
        assert_eq!(a, b);
        assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
    }

    #[test]
    fn test_main_chain_order() {
        let scene = compose(&config(4));
        let y = |id: &str| scene.instance(id).unwrap().position().y();
        assert!(y("mv_bus") < y("mv_switch"));
        assert!(y("mv_switch") < y("mv_breaker"));
        assert!(y("mv_breaker") < y("ct"));
        assert!(y("ct") < y("tap"));
        assert!(y("tap") < y("transformer"));
        assert!(y("transformer") < y("lv_bus"));
        assert!(y("lv_bus") < y("pcs_1"));

        let tap = scene.instance("tap").unwrap().anchor(Anchor::Center).unwrap();
        let earthing = scene.instance("earthing_switch").unwrap();
        let arrester = scene.instance("surge_arrester").unwrap();
        assert_approx_eq!(f64, earthing.anchor(Anchor::In).unwrap().y(), tap.y());
        assert!(earthing.position().x() < tap.x());
        assert_approx_eq!(f64, arrester.anchor(Anchor::Tap).unwrap().y(), tap.y());
        assert!(arrester.position().x() > tap.x());
    }

    #[test]
    fn test_every_conductor_end_meets_an_anchor() {
        for n in 2..=6 {
            let scene = compose(&config(n));
            let anchors: Vec<Point> = scene
                .instances()
                .filter(|i| !i.is_conductor())
                .flat_map(|i| i.anchors().map(|(_, p)| p).collect::<Vec<_>>())
                .collect();
            for wire in scene.conductors() {
                let (start, end) = wire.endpoints().unwrap();
                for end in [start, end] {
                    assert!(
                        anchors.iter().any(|a| a.coincides(end, 1e-9)),
                        "{} end {} is loose",
                        wire.id(),
                        end
                    );
                }
            }
        }
    }

    #[test]
    fn test_labels() {
        let scene = compose(&config(3));
        let texts: Vec<&str> = scene.labels().map(|l| l.text()).collect();
        assert_eq!(
            texts,
            vec![
                "MV BUS 33.0 kV",
                "33.0 kV/690 V",
                "7.7 MVA",
                "LV BUS 690 V",
                "PCS-1",
                "PCS-2",
                "PCS-3"
            ]
        );
        let boxes: Vec<Bounds> = scene.labels().map(|l| l.bounds()).collect();
        for (i, a) in boxes.iter().enumerate() {
            for b in &boxes[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }

        let mut quiet = config(3);
        quiet.show_labels = false;
        assert_eq!(compose(&quiet).labels().count(), 0);
    }

    #[test]
    fn test_scale_is_normalized() {
        let mut bad = config(4);
        bad.scale = -2.0;
        assert_eq!(compose(&bad), compose(&config(4)));
    }

    fn check_composed_diagram_is_valid(n: i64, scale: f64) -> Result<(), TestCaseError> {
        let mut cfg = config(n);
        cfg.scale = scale;
        let scene = compose(&cfg);
        let report = Validator::new(ValidatorConfig::default()).validate(&scene);
        prop_assert!(report.ok(), "{:?}", report.messages());
        Ok(())
    }

    fn check_doubling_scale_doubles_geometry(n: i64, scale: f64) -> Result<(), TestCaseError> {
        let mut small = config(n);
        small.scale = scale;
        let mut large = small.clone();
        large.scale = 2.0 * scale;
        let a = compose(&small);
        let b = compose(&large);

        prop_assert_eq!(b.size().width(), 2.0 * a.size().width());
        prop_assert_eq!(b.size().height(), 2.0 * a.size().height());
        prop_assert_eq!(a.topology(), b.topology());
        prop_assert_eq!(a.instances().count(), b.instances().count());
        for (x, y) in a.instances().zip(b.instances()) {
            prop_assert_eq!(x.id(), y.id());
            prop_assert_eq!(y.position(), x.position().scale(2.0));
            for ((_, p), (_, q)) in x.anchors().zip(y.anchors()) {
                prop_assert_eq!(q, p.scale(2.0));
            }
        }
        for (x, y) in a.labels().zip(b.labels()) {
            prop_assert_eq!(y.position(), x.position().scale(2.0));
        }
        let validator = Validator::new(ValidatorConfig::default());
        prop_assert_eq!(validator.validate(&a).ok(), validator.validate(&b).ok());
        Ok(())
    }

    proptest! {
        #[test]
        fn composed_diagram_is_valid(n in -2i64..10, scale in 0.25f64..4.0) {
            check_composed_diagram_is_valid(n, scale)?;
        }

        #[test]
        fn doubling_scale_doubles_geometry(n in 2i64..=6, scale in 0.25f64..4.0) {
            check_doubling_scale_doubles_geometry(n, scale)?;
        }
    }
}
