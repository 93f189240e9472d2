// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory slab tier.
//!
//! [`MemoryTier`] backs the collection with one contiguous `Vec<f32>`. Fine
//! whenever `count × grid_area` fits comfortably in process memory; the
//! contract is identical to [`FileTier`](crate::FileTier), so call sites can
//! swap tiers without code changes.

use crate::{check_write, BasisStore, StoreError};
use swell_field::Field;
use swell_geom::GridShape;

/// Contiguous in-memory slab of basis maps.
#[derive(Clone, Debug)]
pub struct MemoryTier {
    grid: GridShape,
    count: usize,
    data: Vec<f32>,
}

impl Default for MemoryTier {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryTier {
    /// Empty, unallocated tier.
    pub fn new() -> Self {
        Self {
            grid: GridShape::new(0, 0),
            count: 0,
            data: Vec::new(),
        }
    }

    fn slot_range(&self, index: usize) -> std::ops::Range<usize> {
        let area = self.grid.area();
        index * area..(index + 1) * area
    }
}

impl BasisStore for MemoryTier {
    fn allocate(&mut self, count: usize, shape: GridShape) -> Result<(), StoreError> {
        self.grid = shape;
        self.count = count;
        self.data = vec![0.0; count * shape.area()];
        Ok(())
    }

    fn write(
        &mut self,
        index: usize,
        row_offset: usize,
        col_offset: usize,
        pattern: &Field,
    ) -> Result<(), StoreError> {
        check_write(
            index,
            self.count,
            row_offset,
            col_offset,
            pattern.shape(),
            self.grid,
        )?;
        let slot_start = self.slot_range(index).start;
        for r in 0..pattern.rows() {
            let dst_start = slot_start + (row_offset + r) * self.grid.cols + col_offset;
            self.data[dst_start..dst_start + pattern.cols()].copy_from_slice(pattern.row(r));
        }
        Ok(())
    }

    fn read(&self, index: usize) -> Result<Field, StoreError> {
        if index >= self.count {
            return Err(StoreError::IndexOutOfRange {
                index,
                count: self.count,
            });
        }
        let slot = self.data[self.slot_range(index)].to_vec();
        // Length is area by construction, so from_vec cannot fail here.
        Ok(Field::from_vec(self.grid, slot).unwrap_or_else(|_| Field::zeros(self.grid)))
    }

    fn sum_all(&self) -> Result<Field, StoreError> {
        let mut acc = Field::zeros(self.grid);
        for index in 0..self.count {
            let slot = &self.data[self.slot_range(index)];
            for (dst, src) in acc.as_mut_slice().iter_mut().zip(slot) {
                *dst += src;
            }
        }
        Ok(acc)
    }

    fn count(&self) -> usize {
        self.count
    }

    fn grid(&self) -> GridShape {
        self.grid
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.grid = GridShape::new(0, 0);
        self.count = 0;
        self.data = Vec::new();
        Ok(())
    }
}
