// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Collision-avoiding label placement.
//!
//! Placement is a pure function over an explicitly threaded list of already
//! committed label boxes.  A colliding box is pushed down by a fixed step at
//! most [`MAX_LABEL_SHIFTS`] times; after that the overlap is accepted.

use crate::geometry::{Bounds, Point, Size};

/// Upper bound on the number of downward shifts tried for one label.
pub const MAX_LABEL_SHIFTS: usize = 8;

/// Average glyph width as a share of the font size.
const GLYPH_WIDTH: f64 = 0.6;

/// Line height as a share of the font size.
const LINE_HEIGHT: f64 = 1.2;

/// Shift step as a share of the font size.  Larger than the line height so
/// that one step clears a label of the same size.
const SHIFT_STEP: f64 = 1.4;

/// The outcome of placing one label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LabelPlacement {
    /// The box overlaps no previously committed box.
    Clear(Bounds),
    /// The shift budget ran out; the box still overlaps another one.
    Overlapping(Bounds),
}

impl LabelPlacement {
    /// Returns the committed box.
    pub fn bounds(&self) -> Bounds {
        match self {
            LabelPlacement::Clear(b) | LabelPlacement::Overlapping(b) => *b,
        }
    }

    pub fn is_clear(&self) -> bool {
        matches!(self, LabelPlacement::Clear(_))
    }
}

/// Estimates the box a single line of `text` occupies with its top-left
/// corner at `top_left`.
pub fn text_box(text: &str, font_size: f64, top_left: Point) -> Bounds {
    let width = GLYPH_WIDTH * font_size * text.chars().count() as f64;
    Bounds::new_from_top_left(top_left, Size::new(width, LINE_HEIGHT * font_size))
}

/// Returns the distance a colliding label is moved down per attempt.
pub fn shift_step(font_size: f64) -> f64 {
    SHIFT_STEP * font_size
}

/// Places `target`, shifting it down by `step` while it intersects any box
/// in `committed`.
///
/// The placed box is appended to the returned list, whether or not it ended
/// up clear.
pub fn place_label(
    mut committed: Vec<Bounds>,
    target: Bounds,
    step: f64,
) -> (LabelPlacement, Vec<Bounds>) {
    let collides = |candidate: &Bounds, committed: &[Bounds]| {
        committed.iter().any(|c| c.intersects(candidate))
    };

    let shifted = |shift: usize| target.translate(Point::new(0.0, shift as f64 * step));

    for shift in 0..=MAX_LABEL_SHIFTS {
        let candidate = shifted(shift);
        if !collides(&candidate, &committed) {
            committed.push(candidate);
            return (LabelPlacement::Clear(candidate), committed);
        }
    }

    let candidate = shifted(MAX_LABEL_SHIFTS);
    tracing::warn!(
        "Label box at {} still overlaps after {} shifts, keeping it there.",
        candidate.min_point(),
        MAX_LABEL_SHIFTS
    );
    committed.push(candidate);
    (LabelPlacement::Overlapping(candidate), committed)
}
