// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The connectivity validator.
//!
//! The validator only reads a finished [`SceneGraph`] and never fails: every
//! problem it finds becomes an [`Error`] in the returned
//! [`ValidationReport`], and callers decide whether to block on it.

mod buses;
mod connectivity;
mod inline;

use serde::ser::SerializeStruct;
use serde::Serialize;

use crate::config::ValidatorConfig;
use crate::geometry::Point;
use crate::scene::SceneGraph;
use crate::{Error, ErrorKind};

/// The findings of one validation run, in check order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<Error>,
}

impl ValidationReport {
    /// Whether no check failed.
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Returns the human readable descriptions of all findings.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.description().to_string()).collect()
    }

    /// Returns the number of findings of the given kind.
    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut report = serializer.serialize_struct("ValidationReport", 2)?;
        report.serialize_field("ok", &self.ok())?;
        report.serialize_field("errors", &self.messages())?;
        report.end()
    }
}

/// Checks the electrical connectivity of a scene graph.
#[derive(Clone, Debug, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Creates a validator.  A tolerance that is negative or not finite is
    /// replaced by the default.
    pub fn new(mut config: ValidatorConfig) -> Self {
        let tolerance = config.normalized_tolerance();
        if tolerance.to_bits() != config.tolerance.to_bits() {
            tracing::warn!(
                "Invalid validator tolerance {}, using {}.",
                config.tolerance,
                tolerance
            );
            config.tolerance = tolerance;
        }
        Self { config }
    }

    /// Runs every check on `scene`.
    pub fn validate(&self, scene: &SceneGraph) -> ValidationReport {
        let checks = SceneChecks {
            scene,
            tolerance: self.config.tolerance,
            allow_junctions: self.config.allow_conductor_junctions,
            conductor_ends: conductor_ends(scene),
        };

        let mut errors = vec![];
        checks.check_anchor_snap(&mut errors);
        checks.check_floating_symbols(&mut errors);
        checks.check_required_buses(&mut errors);
        checks.check_transformer_lv(&mut errors);
        checks.check_inline_components(&mut errors);
        checks.check_bus_coupler(&mut errors);

        tracing::debug!(
            "Validated scene with {} nodes: {} errors.",
            scene.nodes().len(),
            errors.len()
        );
        ValidationReport { errors }
    }

    /// Decodes a scene-graph document and runs every check on it.
    ///
    /// A document that can't be decoded, including one without a `nodes`
    /// array, yields a report with a single `MalformedScene` error.
    pub fn validate_json(&self, json: &str) -> ValidationReport {
        match decode_scene(json) {
            Ok(scene) => self.validate(&scene),
            Err(err) => {
                tracing::debug!("Rejected scene document: {}", err);
                ValidationReport { errors: vec![err] }
            }
        }
    }
}

/// Decodes `json` and validates the resulting scene graph with `config`.
pub fn validate_json(json: &str, config: &ValidatorConfig) -> ValidationReport {
    Validator::new(config.clone()).validate_json(json)
}

fn decode_scene(json: &str) -> Result<SceneGraph, Error> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| Error::malformed_scene(format!("Scene document is not valid JSON: {e}")))?;
    if !value.get("nodes").is_some_and(|n| n.is_array()) {
        return Err(Error::malformed_scene(
            "Scene document has no `nodes` array.",
        ));
    }
    SceneGraph::from_value(value).map_err(|e| Error::malformed_scene(e.description()))
}

/// A conductor endpoint, tagged with the conductor it belongs to.
struct ConductorEnd<'a> {
    id: &'a str,
    at: Point,
}

fn conductor_ends(scene: &SceneGraph) -> Vec<ConductorEnd<'_>> {
    scene
        .conductors()
        .filter_map(|c| c.endpoints().map(|ends| (c.id(), ends)))
        .flat_map(|(id, (start, end))| [ConductorEnd { id, at: start }, ConductorEnd { id, at: end }])
        .collect()
}

/// The state shared by the individual checks of one validation run.
struct SceneChecks<'a> {
    scene: &'a SceneGraph,
    tolerance: f64,
    allow_junctions: bool,
    conductor_ends: Vec<ConductorEnd<'a>>,
}

impl SceneChecks<'_> {
    /// Whether some conductor ends within tolerance of `p`.
    fn touches_conductor(&self, p: Point) -> bool {
        self.conductor_ends
            .iter()
            .any(|end| end.at.coincides(p, self.tolerance))
    }
}
