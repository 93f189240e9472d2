// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Row-major 2D `f32` array keyed by [`GridShape`].

use swell_geom::GridShape;
use thiserror::Error;

/// Errors produced by field constructors and shape-checked setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A supplied array's shape does not match what the operation expects.
    #[error("[FIELD_SHAPE_MISMATCH] expected {expected}, got {got}")]
    ShapeMismatch {
        /// Shape the operation requires.
        expected: GridShape,
        /// Shape that was supplied.
        got: GridShape,
    },
    /// A flat buffer's length disagrees with its declared shape.
    #[error("[FIELD_LENGTH_MISMATCH] shape {shape} needs {expected} elements, got {got}")]
    LengthMismatch {
        /// The declared shape.
        shape: GridShape,
        /// Element count the shape requires.
        expected: usize,
        /// Element count actually supplied.
        got: usize,
    },
    /// A pattern width too small to carve a central square out of.
    #[error("[FIELD_PATTERN_WIDTH] width {width} is below the minimum of 8")]
    PatternTooSmall {
        /// The rejected width.
        width: usize,
    },
}

/// A dense row-major 2D array of `f32` cells.
///
/// The element type matches the collection slab downstream (`f32`, as the
/// original experiment data). Cells are addressed `(row, col)`; the flat
/// buffer index of `(r, c)` is `r * cols + c`.
#[derive(Clone, PartialEq, Debug)]
pub struct Field {
    shape: GridShape,
    data: Vec<f32>,
}

impl Field {
    /// All-zero field of the given shape.
    pub fn zeros(shape: GridShape) -> Self {
        Self {
            shape,
            data: vec![0.0; shape.area()],
        }
    }

    /// Field with every cell set to `value`.
    pub fn filled(shape: GridShape, value: f32) -> Self {
        Self {
            shape,
            data: vec![value; shape.area()],
        }
    }

    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::LengthMismatch`] when `data.len()` is not
    /// `shape.area()`.
    pub fn from_vec(shape: GridShape, data: Vec<f32>) -> Result<Self, FieldError> {
        if data.len() != shape.area() {
            return Err(FieldError::LengthMismatch {
                shape,
                expected: shape.area(),
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// Build a field by evaluating `f(row, col)` at every cell.
    pub fn from_fn(shape: GridShape, f: impl Fn(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(shape.area());
        for r in 0..shape.rows {
            for c in 0..shape.cols {
                data.push(f(r, c));
            }
        }
        Self { shape, data }
    }

    /// Shape of the field.
    #[inline]
    pub fn shape(&self) -> GridShape {
        self.shape
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Read one cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the shape.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        debug_assert!(row < self.shape.rows && col < self.shape.cols);
        self.data[row * self.shape.cols + col]
    }

    /// Write one cell.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the shape.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        debug_assert!(row < self.shape.rows && col < self.shape.cols);
        self.data[row * self.shape.cols + col] = value;
    }

    /// One row as a contiguous slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.shape.cols;
        &self.data[start..start + self.shape.cols]
    }

    /// The whole buffer, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// The whole buffer, row-major, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Elementwise `self += other`.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] when shapes differ.
    pub fn accumulate(&mut self, other: &Field) -> Result<(), FieldError> {
        if other.shape != self.shape {
            return Err(FieldError::ShapeMismatch {
                expected: self.shape,
                got: other.shape,
            });
        }
        for (dst, src) in self.data.iter_mut().zip(&other.data) {
            *dst += src;
        }
        Ok(())
    }
}
