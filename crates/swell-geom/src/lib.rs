// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Swell geometry primitives.
//!
//! `swell-geom` describes WHERE things live on the experiment grid: the grid
//! shape, the subduction-zone bounds, and the ordered set of valid pattern
//! placements inside the zone. It owns no arrays — `swell-field` holds the
//! data, `swell-basis` holds the generated collection. Everything here is a
//! small `Copy` value validated once at construction and immutable after.
//!
//! # Axis Convention
//!
//! `x` indexes the **row** axis and `y` the **column** axis, in grid cells.
//! Placement enumeration iterates the row axis in the outer loop and the
//! column axis in the inner loop; collection index assignment downstream
//! depends on exactly this order.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod placements;
pub use placements::Placements;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shape of the full experiment grid, in cells.
///
/// Row-major throughout the workspace: a grid of shape `(rows, cols)` is laid
/// out as `rows` consecutive runs of `cols` elements.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct GridShape {
    /// Number of rows (the x axis).
    pub rows: usize,
    /// Number of columns (the y axis).
    pub cols: usize,
}

impl GridShape {
    /// Shorthand constructor.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.rows * self.cols
    }
}

impl std::fmt::Display for GridShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Rectangular sub-region of the grid where basis patterns may be placed
/// (the "subduction zone").
///
/// Bounds are half-open on both axes: rows `x_start..x_end`, columns
/// `y_start..y_end`. `ZoneBounds` is plain data — validity against a grid is
/// established by [`Geometry::new`], not here.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ZoneBounds {
    /// First row inside the zone.
    pub x_start: usize,
    /// One past the last row inside the zone.
    pub x_end: usize,
    /// First column inside the zone.
    pub y_start: usize,
    /// One past the last column inside the zone.
    pub y_end: usize,
}

impl ZoneBounds {
    /// Shorthand constructor in `(x_start, x_end, y_start, y_end)` order.
    pub fn new(x_start: usize, x_end: usize, y_start: usize, y_end: usize) -> Self {
        Self {
            x_start,
            x_end,
            y_start,
            y_end,
        }
    }

    /// Build bounds from a top-left corner plus extents.
    ///
    /// `top_left` is `(row, col)`; the zone covers `height` rows and `width`
    /// columns from there.
    pub fn from_rect(top_left: (usize, usize), height: usize, width: usize) -> Self {
        Self {
            x_start: top_left.0,
            x_end: top_left.0 + height,
            y_start: top_left.1,
            y_end: top_left.1 + width,
        }
    }
}

/// Errors produced by geometry validation and placement enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeomError {
    /// Zone bounds are inverted on an axis or exceed the grid shape.
    #[error("invalid geometry: zone {bounds:?} does not fit grid {grid}")]
    InvalidGeometry {
        /// The grid the bounds were validated against.
        grid: GridShape,
        /// The offending bounds.
        bounds: ZoneBounds,
    },
    /// Pattern exceeds the zone extent on at least one axis.
    #[error("pattern {pattern} exceeds zone {zone} on at least one axis")]
    PatternTooLarge {
        /// Shape of the rejected pattern.
        pattern: GridShape,
        /// Shape of the zone it was checked against.
        zone: GridShape,
    },
    /// A translation stride of zero would never advance the enumeration.
    #[error("translation stride must be positive, got ({x_stride}, {y_stride})")]
    InvalidStride {
        /// Row-axis stride as supplied.
        x_stride: usize,
        /// Column-axis stride as supplied.
        y_stride: usize,
    },
}

/// Immutable description of one experiment's grid and subduction zone.
///
/// Constructed once per experiment via [`Geometry::new`] and passed by copy to
/// each collaborator (basis store, surface holder, depth-map holder). There is
/// no shared base object: composition over inheritance.
///
/// Deliberately not deserializable: the only way to obtain a `Geometry` is
/// through the validating constructor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Geometry {
    grid: GridShape,
    zone: ZoneBounds,
}

impl Geometry {
    /// Validate `bounds` against `grid` and freeze the pair.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::InvalidGeometry`] when the grid is empty on either
    /// axis, when `start >= end` on either zone axis, or when the zone pokes
    /// out of the grid.
    pub fn new(grid: GridShape, bounds: ZoneBounds) -> Result<Self, GeomError> {
        let row_ok = bounds.x_start < bounds.x_end && bounds.x_end <= grid.rows;
        let col_ok = bounds.y_start < bounds.y_end && bounds.y_end <= grid.cols;
        if grid.rows == 0 || grid.cols == 0 || !row_ok || !col_ok {
            return Err(GeomError::InvalidGeometry { grid, bounds });
        }
        Ok(Self { grid, zone: bounds })
    }

    /// The full grid shape.
    pub fn grid(&self) -> GridShape {
        self.grid
    }

    /// The validated zone bounds.
    pub fn zone(&self) -> ZoneBounds {
        self.zone
    }

    /// Extent of the zone as a shape (`rows = x_end - x_start`, etc.).
    pub fn zone_shape(&self) -> GridShape {
        GridShape {
            rows: self.zone.x_end - self.zone.x_start,
            cols: self.zone.y_end - self.zone.y_start,
        }
    }
}
