// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Synthetic bathymetry: the sloped-bottom depth gradient.

use crate::Field;
use swell_geom::GridShape;

/// Linear depth gradient along the column axis, constant down each column.
///
/// The first column is `min_depth`, the last is `max_depth`, intermediate
/// columns are evenly spaced (endpoint-inclusive, `linspace` semantics). A
/// single-column grid gets `min_depth` everywhere.
pub fn sloped_bottom(shape: GridShape, min_depth: f32, max_depth: f32) -> Field {
    let span = max_depth - min_depth;
    let denom = if shape.cols > 1 {
        (shape.cols - 1) as f32
    } else {
        1.0
    };
    Field::from_fn(shape, |_r, c| min_depth + span * (c as f32) / denom)
}
