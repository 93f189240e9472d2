// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named-file slab tier.
//!
//! [`FileTier`] realizes the collection as a named file sized at allocation:
//! `count` consecutive row-major `f32` blocks, no header. Writes and reads
//! use positioned I/O on row-sized spans, so no more than one grid row (or
//! one slot, for [`sum_all`](crate::BasisStore::sum_all)) is resident at a
//! time — collections much larger than process memory stay usable.
//!
//! The file is created by `allocate`, not by construction; a builder run that
//! fails validation never touches the filesystem.

use crate::{check_write, BasisStore, StoreError};
use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use swell_field::Field;
use swell_geom::GridShape;
use tracing::debug;

const CELL_BYTES: u64 = std::mem::size_of::<f32>() as u64;

/// File-backed slab of basis maps.
#[derive(Debug)]
pub struct FileTier {
    path: PathBuf,
    file: Option<File>,
    grid: GridShape,
    count: usize,
}

impl FileTier {
    /// Tier that will back its slab with the file at `path`.
    ///
    /// Nothing is created until [`allocate`](BasisStore::allocate).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
            grid: GridShape::new(0, 0),
            count: 0,
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte offset of cell `(row, 0)` within slot `index`.
    fn row_offset_bytes(&self, index: usize, row: usize) -> u64 {
        let cells = index as u64 * self.grid.area() as u64 + row as u64 * self.grid.cols as u64;
        cells * CELL_BYTES
    }

    fn backing(&self) -> Result<&File, StoreError> {
        self.file.as_ref().ok_or_else(|| {
            StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "slab not allocated",
            ))
        })
    }

    fn read_slot_into(&self, index: usize, buf: &mut [f32]) -> Result<(), StoreError> {
        let file = self.backing()?;
        let offset = self.row_offset_bytes(index, 0);
        file.read_exact_at(bytemuck::cast_slice_mut(buf), offset)?;
        Ok(())
    }
}

impl BasisStore for FileTier {
    fn allocate(&mut self, count: usize, shape: GridShape) -> Result<(), StoreError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)?;
        let bytes = count as u64 * shape.area() as u64 * CELL_BYTES;
        file.set_len(bytes)?;
        debug!(path = %self.path.display(), count, grid = %shape, bytes, "slab allocated");
        self.file = Some(file);
        self.grid = shape;
        self.count = count;
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
        let file = self.backing()?;
        for r in 0..pattern.rows() {
            let offset = self.row_offset_bytes(index, row_offset + r)
                + col_offset as u64 * CELL_BYTES;
            file.write_all_at(bytemuck::cast_slice(pattern.row(r)), offset)?;
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
        let mut buf = vec![0.0f32; self.grid.area()];
        self.read_slot_into(index, &mut buf)?;
        // Length matches the shape by construction.
        Ok(Field::from_vec(self.grid, buf).unwrap_or_else(|_| Field::zeros(self.grid)))
    }

    fn sum_all(&self) -> Result<Field, StoreError> {
        let mut acc = Field::zeros(self.grid);
        let mut buf = vec![0.0f32; self.grid.area()];
        for index in 0..self.count {
            self.read_slot_into(index, &mut buf)?;
            for (dst, src) in acc.as_mut_slice().iter_mut().zip(&buf) {
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
        self.file = None;
        self.grid = GridShape::new(0, 0);
        self.count = 0;
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn tier_in(dir: &tempfile::TempDir) -> FileTier {
        FileTier::new(dir.path().join("basis.slab"))
    }

    // ── 1. allocation creates a zero-filled file of the exact size ──────

    #[test]
    fn allocate_sizes_and_zeroes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(3, GridShape::new(4, 5)).unwrap();

        let meta = std::fs::metadata(tier.path()).unwrap();
        assert_eq!(meta.len(), 3 * 4 * 5 * 4);
        for index in 0..3 {
            let slot = tier.read(index).unwrap();
            assert!(slot.as_slice().iter().all(|&v| v == 0.0));
        }
    }

    // ── 2. nothing exists on disk before allocation ─────────────────────

    #[test]
    fn no_file_before_allocate() {
        let dir = tempfile::tempdir().unwrap();
        let tier = tier_in(&dir);
        assert!(!tier.path().exists());
        assert_eq!(tier.count(), 0);
    }

    // ── 3. embed + read round-trip through disk ─────────────────────────

    #[test]
    fn write_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(2, GridShape::new(6, 6)).unwrap();

        let pattern =
            Field::from_vec(GridShape::new(2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        tier.write(1, 2, 1, &pattern).unwrap();

        let slot = tier.read(1).unwrap();
        assert_eq!(slot.get(2, 1), 1.0);
        assert_eq!(slot.get(2, 3), 3.0);
        assert_eq!(slot.get(3, 1), 4.0);
        assert_eq!(slot.get(3, 3), 6.0);
        assert_eq!(slot.get(0, 0), 0.0);
        // Slot 0 was never written.
        let untouched = tier.read(0).unwrap();
        assert!(untouched.as_slice().iter().all(|&v| v == 0.0));
    }

    // ── 4. raw bytes follow the headerless row-major layout ─────────────

    #[test]
    fn on_disk_layout_is_headerless_row_major() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(2, GridShape::new(2, 2)).unwrap();
        tier.write(1, 0, 0, &Field::filled(GridShape::new(2, 2), 1.5))
            .unwrap();

        let bytes = std::fs::read(tier.path()).unwrap();
        assert_eq!(bytes.len(), 2 * 4 * 4);
        let cells: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect();
        // Slot 0 untouched, slot 1 filled — contiguous, no header.
        assert_eq!(cells, vec![0.0, 0.0, 0.0, 0.0, 1.5, 1.5, 1.5, 1.5]);
    }

    // ── 5. bounds checks mirror the memory tier ─────────────────────────

    #[test]
    fn bounds_checks() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(1, GridShape::new(4, 4)).unwrap();

        let pattern = Field::filled(GridShape::new(2, 2), 1.0);
        assert!(matches!(
            tier.write(1, 0, 0, &pattern),
            Err(StoreError::IndexOutOfRange { .. })
        ));
        assert!(matches!(
            tier.write(0, 3, 0, &pattern),
            Err(StoreError::OffsetOutOfBounds { .. })
        ));
        assert!(matches!(
            tier.read(1),
            Err(StoreError::IndexOutOfRange { .. })
        ));
    }

    // ── 6. sum_all streams every slot ───────────────────────────────────

    #[test]
    fn sum_all_matches_manual_accumulation() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(3, GridShape::new(5, 5)).unwrap();
        let pattern = Field::filled(GridShape::new(2, 2), 1.0);
        tier.write(0, 0, 0, &pattern).unwrap();
        tier.write(1, 1, 1, &pattern).unwrap();
        tier.write(2, 2, 2, &pattern).unwrap();

        let sum = tier.sum_all().unwrap();
        let mut expected = Field::zeros(GridShape::new(5, 5));
        for index in 0..3 {
            expected.accumulate(&tier.read(index).unwrap()).unwrap();
        }
        assert_eq!(sum, expected);
        // Diagonal overlaps stack.
        assert_eq!(sum.get(1, 1), 2.0);
        assert_eq!(sum.get(2, 2), 2.0);
    }

    // ── 7. clear removes the backing file ───────────────────────────────

    #[test]
    fn clear_removes_file_and_resets() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(1, GridShape::new(2, 2)).unwrap();
        assert!(tier.path().exists());

        tier.clear().unwrap();
        assert!(!tier.path().exists());
        assert_eq!(tier.count(), 0);
        // clear on an already-clean tier is a no-op.
        tier.clear().unwrap();
    }

    // ── 8. re-allocation truncates the previous slab ────────────────────

    #[test]
    fn reallocate_discards_previous_slab() {
        let dir = tempfile::tempdir().unwrap();
        let mut tier = tier_in(&dir);
        tier.allocate(1, GridShape::new(3, 3)).unwrap();
        tier.write(0, 0, 0, &Field::filled(GridShape::new(3, 3), 9.0))
            .unwrap();

        tier.allocate(2, GridShape::new(3, 3)).unwrap();
        for index in 0..2 {
            let slot = tier.read(index).unwrap();
            assert!(slot.as_slice().iter().all(|&v| v == 0.0));
        }
    }
}
