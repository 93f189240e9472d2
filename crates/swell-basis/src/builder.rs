// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Two-pass count-then-write collection builder.

use crate::{BasisStore, StoreError};
use swell_field::Field;
use swell_geom::{GeomError, Geometry, Placements};
use thiserror::Error;
use tracing::info;

/// Errors surfaced by [`BasisMapBuilder::generate`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// Pattern/zone/stride validation failed before any storage was touched.
    #[error(transparent)]
    Geometry(#[from] GeomError),
    /// The store rejected an allocation or a slot write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Orchestrates basis-map generation over a [`Geometry`].
///
/// The builder borrows a [`BasisStore`] only for the duration of one
/// [`generate`](BasisMapBuilder::generate) call; the store owns the backing
/// buffer throughout.
#[derive(Clone, Copy, Debug)]
pub struct BasisMapBuilder {
    geometry: Geometry,
}

impl BasisMapBuilder {
    /// Builder for one experiment's geometry.
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// The geometry this builder generates against.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Generate the full basis collection into `store`.
    ///
    /// Pass 1 counts valid placements (the slab is fixed-size, so `count`
    /// must exist before allocation); pass 2 re-runs the identical
    /// enumeration and embeds the pattern into slot `k` at the absolute grid
    /// offset `(zone.x_start + i, zone.y_start + j)`. Both passes execute
    /// the same [`Placements`] code, so index assignment cannot drift.
    ///
    /// Returns the number of slots written.
    ///
    /// # Errors
    ///
    /// Validation failures ([`GeomError::PatternTooLarge`],
    /// [`GeomError::InvalidStride`]) surface before the store is touched.
    /// Any later failure clears the store — a failed generate never leaves a
    /// partially-visible collection behind.
    pub fn generate<S: BasisStore>(
        &self,
        store: &mut S,
        pattern: &Field,
        x_stride: usize,
        y_stride: usize,
    ) -> Result<usize, BuildError> {
        let placements = Placements::new(
            self.geometry.zone_shape(),
            pattern.shape(),
            x_stride,
            y_stride,
        )?;
        let count = placements.clone().count();

        if let Err(err) = self.fill(store, pattern, placements, count) {
            // Failed mid-build: discard whatever landed in the slab. The
            // original cause outranks any secondary cleanup failure.
            let _ = store.clear();
            return Err(err.into());
        }
        info!(
            count,
            grid = %self.geometry.grid(),
            pattern = %pattern.shape(),
            "basis collection generated"
        );
        Ok(count)
    }

    fn fill<S: BasisStore>(
        &self,
        store: &mut S,
        pattern: &Field,
        placements: Placements,
        count: usize,
    ) -> Result<(), StoreError> {
        store.allocate(count, self.geometry.grid())?;
        let bounds = self.geometry.zone();
        for (k, (i, j)) in placements.enumerate() {
            store.write(k, bounds.x_start + i, bounds.y_start + j, pattern)?;
        }
        Ok(())
    }
}
