// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Basis-pattern synthesis and rescaling.

use crate::{Field, FieldError};
use swell_geom::GridShape;
use tracing::warn;

/// A synthesized basis pattern plus the translation strides that tile it
/// edge-to-edge across the zone.
#[derive(Clone, Debug)]
pub struct CentralSquare {
    /// The pattern: a square field of 1.0 with a central plateau of 2.0.
    pub pattern: Field,
    /// Row-axis translation stride (the plateau size).
    pub x_stride: usize,
    /// Column-axis translation stride (the plateau size).
    pub y_stride: usize,
}

/// Synthesize a square pattern with a centered plateau.
///
/// The pattern is `width × width` filled with `1.0`, with a centered
/// `width/4 × width/4` square of `2.0`. Widths that are not a multiple of 8
/// are snapped down to the nearest multiple so the plateau stays centered and
/// proportioned; the snap is a non-fatal diagnostic (`warn!`) and the call
/// proceeds with the adjusted width. The returned strides equal the plateau
/// size on both axes.
///
/// # Errors
///
/// Returns [`FieldError::PatternTooSmall`] for widths under 8, where snapping
/// would leave nothing to build.
pub fn central_square(width: usize) -> Result<CentralSquare, FieldError> {
    if width < 8 {
        return Err(FieldError::PatternTooSmall { width });
    }
    let snapped = (width / 8) * 8;
    if snapped != width {
        warn!(
            requested = width,
            using = snapped,
            "pattern width not a multiple of 8; snapping down to keep proportions"
        );
    }
    let width = snapped;

    let plateau = width / 4;
    let start = width / 2 - plateau / 2;
    let pattern = Field::from_fn(GridShape::new(width, width), |r, c| {
        let inside =
            r >= start && r < start + plateau && c >= start && c < start + plateau;
        if inside {
            2.0
        } else {
            1.0
        }
    });
    Ok(CentralSquare {
        pattern,
        x_stride: plateau,
        y_stride: plateau,
    })
}

/// Bilinear resampling of `src` to `new_shape`.
///
/// Align-corners convention: the first and last samples of each axis map onto
/// the first and last source cells, interior samples interpolate between the
/// four surrounding cells. Resampling to the source shape is the identity.
pub fn rescale(src: &Field, new_shape: GridShape) -> Field {
    let (src_rows, src_cols) = (src.rows(), src.cols());
    let row_scale = axis_scale(src_rows, new_shape.rows);
    let col_scale = axis_scale(src_cols, new_shape.cols);

    Field::from_fn(new_shape, |r, c| {
        let sr = r as f32 * row_scale;
        let sc = c as f32 * col_scale;
        let r0 = sr.floor() as usize;
        let c0 = sc.floor() as usize;
        let r1 = (r0 + 1).min(src_rows - 1);
        let c1 = (c0 + 1).min(src_cols - 1);
        let fr = sr - r0 as f32;
        let fc = sc - c0 as f32;

        let top = src.get(r0, c0) * (1.0 - fc) + src.get(r0, c1) * fc;
        let bottom = src.get(r1, c0) * (1.0 - fc) + src.get(r1, c1) * fc;
        top * (1.0 - fr) + bottom * fr
    })
}

// Source cells spanned per destination step, endpoints pinned to endpoints.
fn axis_scale(src: usize, dst: usize) -> f32 {
    if dst > 1 {
        (src - 1) as f32 / (dst - 1) as f32
    } else {
        0.0
    }
}
