// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the configuration options for the composer and the
//! validator.

use serde::Deserialize;

/// The smallest number of feeders the composer draws.
pub const MIN_FEEDERS: usize = 2;

/// The largest number of feeders the composer draws.
pub const MAX_FEEDERS: usize = 6;

/// Input parameters for [`compose`][crate::compose], as handed over by the
/// sizing stage.
///
/// Out-of-range values are normalised by the composer, never rejected.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagramConfig {
    /// Number of PCS feeders hanging off the LV bus.  Clamped to
    /// `[MIN_FEEDERS, MAX_FEEDERS]`.
    pub feeder_count: i64,

    /// Transformer voltage ratio, e.g. `33.0 kV/690 V`.  The part before the
    /// `/` captions the MV bus, the part after it the LV bus.
    pub voltage_label: String,

    /// Transformer rating, e.g. `7.7 MVA`.
    pub rating_label: String,

    /// Multiplier applied to every length.  Non-positive or non-finite values
    /// fall back to `1.0`.
    pub scale: f64,

    /// Whether to emit text labels.
    pub show_labels: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            feeder_count: 4,
            voltage_label: String::new(),
            rating_label: String::new(),
            scale: 1.0,
            show_labels: true,
        }
    }
}

impl DiagramConfig {
    /// Returns the feeder count clamped into `[MIN_FEEDERS, MAX_FEEDERS]`.
    pub fn normalized_feeder_count(&self) -> usize {
        self.feeder_count.clamp(MIN_FEEDERS as i64, MAX_FEEDERS as i64) as usize
    }

    /// Returns the scale, or `1.0` if it is not a positive finite number.
    pub fn normalized_scale(&self) -> f64 {
        if self.scale.is_finite() && self.scale > 0.0 {
            self.scale
        } else {
            1.0
        }
    }
}

/// Configuration options for the [`Validator`][crate::Validator].
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Largest distance at which two points count as coincident.
    pub tolerance: f64,

    /// Whether a conductor endpoint that only meets other conductor
    /// endpoints, without a symbol anchor, counts as snapped.
    pub allow_conductor_junctions: bool,
}

impl ValidatorConfig {
    /// Returns the tolerance, or `1.0` if it is not a finite number `>= 0`.
    pub fn normalized_tolerance(&self) -> f64 {
        if self.tolerance.is_finite() && self.tolerance >= 0.0 {
            self.tolerance
        } else {
            1.0
        }
    }
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            allow_conductor_junctions: false,
        }
    }
}
