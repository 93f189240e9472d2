// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Slab-backed basis-map collection store for Swell.
//!
//! `swell-basis` owns the one resource-heavy piece of the pipeline: the
//! ordered collection of full-grid basis maps, `count × rows × cols` cells of
//! `f32`. The [`BasisStore`] trait fixes the contract — fixed-size allocation
//! up front, per-slot embed writes, per-slot reads, and a streaming
//! elementwise sum — and ships two tiers: [`MemoryTier`] for modest
//! collections and [`FileTier`] for collections that must not live in
//! process memory.
//!
//! # Slab Layout
//!
//! A slab is `count` consecutive row-major `rows × cols` blocks of `f32`,
//! native-endian, contiguous, no header. Any reader that knows
//! `(count, rows, cols)` out of band can address slot `k` at byte offset
//! `k * rows * cols * 4`.
//!
//! # Index Assignment
//!
//! Slot indices are assigned by placement enumeration order (row axis outer,
//! column axis inner — see `swell_geom::Placements`). Downstream consumers
//! address maps by index, so this order is load-bearing.
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

mod builder;
mod file;
mod memory;

pub use builder::{BasisMapBuilder, BuildError};
pub use file::FileTier;
pub use memory::MemoryTier;

use swell_field::Field;
use swell_geom::GridShape;
use thiserror::Error;

/// Errors produced by slab allocation and slot access.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Slot index at or past the allocated count.
    #[error("[BASIS_INDEX_RANGE] slot {index} out of range for collection of {count}")]
    IndexOutOfRange {
        /// The requested slot.
        index: usize,
        /// The allocated slot count.
        count: usize,
    },
    /// Write region pokes out of the grid shape.
    #[error(
        "[BASIS_OFFSET_BOUNDS] {pattern} write at ({row_offset}, {col_offset}) exceeds grid {grid}"
    )]
    OffsetOutOfBounds {
        /// Shape of the pattern being embedded.
        pattern: GridShape,
        /// Row offset of the write region.
        row_offset: usize,
        /// Column offset of the write region.
        col_offset: usize,
        /// Grid shape of each slot.
        grid: GridShape,
    },
    /// Backing-file failure (file tier only).
    #[error("[BASIS_IO] slab I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixed-size slab of full-grid basis maps.
///
/// Allocation is **not** incremental: `count` must be known before
/// [`allocate`](BasisStore::allocate) because the backing storage is sized
/// once. Re-allocating discards the previous collection. One writer set at a
/// time; readers only after all writes complete.
pub trait BasisStore {
    /// Create a zero-initialized `[count, shape.rows, shape.cols]` slab,
    /// discarding any previous collection.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when backing storage cannot be created.
    fn allocate(&mut self, count: usize, shape: GridShape) -> Result<(), StoreError>;

    /// Embed `pattern` into slot `index` with its top-left cell at
    /// `(row_offset, col_offset)`. Cells outside the embed region are left
    /// as they were (all-zero for a freshly allocated slot).
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] past the allocated count,
    /// [`StoreError::OffsetOutOfBounds`] when the region exceeds the grid,
    /// [`StoreError::Io`] on backing-store failure.
    fn write(
        &mut self,
        index: usize,
        row_offset: usize,
        col_offset: usize,
        pattern: &Field,
    ) -> Result<(), StoreError>;

    /// Copy slot `index` out as a full-grid field.
    ///
    /// # Errors
    ///
    /// [`StoreError::IndexOutOfRange`] past the allocated count,
    /// [`StoreError::Io`] on backing-store failure.
    fn read(&self, index: usize) -> Result<Field, StoreError>;

    /// Elementwise sum of every slot, streamed one slot at a time.
    ///
    /// An empty collection sums to the all-zero grid.
    ///
    /// # Errors
    ///
    /// [`StoreError::Io`] on backing-store failure.
    fn sum_all(&self) -> Result<Field, StoreError>;

    /// Number of allocated slots (0 before the first allocation).
    fn count(&self) -> usize;

    /// Grid shape of each slot (`0x0` before the first allocation).
    fn grid(&self) -> GridShape;

    /// Drop the collection, returning to the unallocated state.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when backing storage cannot be removed.
    fn clear(&mut self) -> Result<(), StoreError>;
}

/// Shared bounds check for slot writes.
fn check_write(
    index: usize,
    count: usize,
    row_offset: usize,
    col_offset: usize,
    pattern: GridShape,
    grid: GridShape,
) -> Result<(), StoreError> {
    if index >= count {
        return Err(StoreError::IndexOutOfRange { index, count });
    }
    if row_offset + pattern.rows > grid.rows || col_offset + pattern.cols > grid.cols {
        return Err(StoreError::OffsetOutOfBounds {
            pattern,
            row_offset,
            col_offset,
            grid,
        });
    }
    Ok(())
}
