// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shape-checked holders for the water surface and the depth map.
//!
//! Both wrap a full-grid [`Field`] plus the experiment [`Geometry`]; their
//! setters validate the supplied array's shape eagerly and leave the held map
//! untouched on rejection.

use crate::{Field, FieldError};
use swell_geom::Geometry;

/// Water-surface map over the full grid, writable inside the zone.
#[derive(Clone, Debug)]
pub struct Surface {
    geometry: Geometry,
    map: Field,
}

impl Surface {
    /// All-zero surface over the geometry's grid.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            map: Field::zeros(geometry.grid()),
        }
    }

    /// Write a zone-shaped array into the subduction zone.
    ///
    /// Cells outside the zone keep their current values.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] when `zone_map` is not exactly
    /// the zone's shape; the held map is not modified.
    pub fn set_zone(&mut self, zone_map: &Field) -> Result<(), FieldError> {
        let expected = self.geometry.zone_shape();
        if zone_map.shape() != expected {
            return Err(FieldError::ShapeMismatch {
                expected,
                got: zone_map.shape(),
            });
        }
        let bounds = self.geometry.zone();
        for r in 0..expected.rows {
            for c in 0..expected.cols {
                self.map
                    .set(bounds.x_start + r, bounds.y_start + c, zone_map.get(r, c));
            }
        }
        Ok(())
    }

    /// The geometry this surface was built over.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The full-grid surface map.
    pub fn map(&self) -> &Field {
        &self.map
    }
}

/// Depth map over the full grid.
#[derive(Clone, Debug)]
pub struct DepthMap {
    geometry: Geometry,
    map: Field,
}

impl DepthMap {
    /// All-zero depth map over the geometry's grid.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            map: Field::zeros(geometry.grid()),
        }
    }

    /// Replace the whole depth map.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::ShapeMismatch`] unless `depth` matches the grid
    /// shape exactly.
    pub fn set(&mut self, depth: Field) -> Result<(), FieldError> {
        if depth.shape() != self.geometry.grid() {
            return Err(FieldError::ShapeMismatch {
                expected: self.geometry.grid(),
                got: depth.shape(),
            });
        }
        self.map = depth;
        Ok(())
    }

    /// The geometry this depth map was built over.
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// The full-grid depth map.
    pub fn map(&self) -> &Field {
        &self.map
    }
}
