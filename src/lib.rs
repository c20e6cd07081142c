// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# BESS Single-Line Diagrams

This is a library for drawing the AC block of a battery energy storage system
(BESS) as a single-line diagram, and for checking that the drawing is
electrically connected.

## Symbols

The [`symbols`] module has one pure generator per symbol kind.  Each returns a
[`SymbolDefinition`]: primitive shapes plus a fixed set of named [`Anchor`]s
in the symbol's local frame.  Placing a definition in a scene yields a
[`PlacedInstance`], whose anchors are always derived from its position.

## Composing

[`compose`] turns a [`DiagramConfig`], as handed over by the sizing stage,
into a [`SceneGraph`]:

- The main chain runs from the MV bus through switchgear, a current
  transformer and the transformer down to the LV bus.
- An earthing switch and a surge arrester branch off a tap point.
- Between two and six feeders fan out evenly below the LV bus, each ending in
  a PCS box.

The scene graph also carries a [`TopologyGraph`], the electrical structure of
the block independent of its geometry.  Out-of-range parameters are
normalised, never rejected.

## Validation

The [`Validator`] takes a finished [`SceneGraph`], or its JSON form, and runs
these checks, in order:

- Every conductor endpoint meets a symbol anchor.
- No symbol floats, i.e. every symbol that needs a connection touches a
  conductor.
- There is exactly one MV busbar and at least one LV busbar.
- The transformer's LV side reaches an LV busbar.
- Current transformers sit on a conductor.
- A split LV bus has a bus coupler.

Findings are collected as [`Error`]s in a [`ValidationReport`]; the
validator itself never fails.
*/

mod compose;
pub use compose::{compose, feeder_offsets, labels, LabelPlacement, BASE_UNIT, MAX_LABEL_SHIFTS};

mod config;
pub use config::{DiagramConfig, ValidatorConfig, MAX_FEEDERS, MIN_FEEDERS};

mod error;
pub use error::{Error, ErrorKind};

mod geometry;
pub use geometry::{Bounds, Point, Size};

mod scene;
pub use scene::{Label, PlacedInstance, SceneGraph, SceneNode, SCENE_FORMAT, SCENE_VERSION};

mod symbol_kind;
pub use symbol_kind::{Anchor, BusClass, Orientation, Role, SymbolKind, SymbolTag};

pub mod symbols;
pub use symbols::{Primitive, SymbolDefinition};

mod topology;
pub use topology::{iterators, TopologyDoc, TopologyGraph};

mod validate;
pub use validate::{validate_json, ValidationReport, Validator};

#[cfg(test)]
mod test_utils;
