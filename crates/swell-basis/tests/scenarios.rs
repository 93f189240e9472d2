// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! End-to-end scenarios for the generate → read/sum pipeline, run against
//! both tiers.

#![allow(missing_docs, clippy::unwrap_used, clippy::float_cmp)]

use swell_basis::{BasisMapBuilder, BasisStore, BuildError, FileTier, MemoryTier};
use swell_field::Field;
use swell_geom::{GeomError, Geometry, GridShape, ZoneBounds};

fn scenario_geometry() -> Geometry {
    // 24x24 grid with an 8x8 zone at rows/cols 8..16.
    Geometry::new(GridShape::new(24, 24), ZoneBounds::new(8, 16, 8, 16)).unwrap()
}

fn ones(rows: usize, cols: usize) -> Field {
    Field::filled(GridShape::new(rows, cols), 1.0)
}

fn run_scenario_a(store: &mut impl BasisStore) {
    let builder = BasisMapBuilder::new(scenario_geometry());
    let count = builder.generate(store, &ones(4, 4), 4, 4).unwrap();
    assert_eq!(count, 4);

    let expected_offsets = [(8, 8), (8, 12), (12, 8), (12, 12)];
    for (k, &(row, col)) in expected_offsets.iter().enumerate() {
        let slot = store.read(k).unwrap();
        for r in 0..24 {
            for c in 0..24 {
                let inside = (row..row + 4).contains(&r) && (col..col + 4).contains(&c);
                let expected = if inside { 1.0 } else { 0.0 };
                assert_eq!(slot.get(r, c), expected, "slot {k} cell ({r},{c})");
            }
        }
    }

    // sum_all == elementwise sum of every read(k).
    let mut manual = Field::zeros(GridShape::new(24, 24));
    for k in 0..count {
        manual.accumulate(&store.read(k).unwrap()).unwrap();
    }
    assert_eq!(store.sum_all().unwrap(), manual);
}

#[test]
fn scenario_a_memory_tier() {
    run_scenario_a(&mut MemoryTier::new());
}

#[test]
fn scenario_a_file_tier() {
    let dir = tempfile::tempdir().unwrap();
    let mut tier = FileTier::new(dir.path().join("a.slab"));
    run_scenario_a(&mut tier);
}

#[test]
fn scenario_b_oversize_pattern_creates_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let slab = dir.path().join("b.slab");
    let mut tier = FileTier::new(&slab);
    let builder = BasisMapBuilder::new(scenario_geometry());

    // 9 rows against an 8-row zone.
    let err = builder.generate(&mut tier, &ones(9, 4), 1, 1).unwrap_err();
    assert!(matches!(
        err,
        BuildError::Geometry(GeomError::PatternTooLarge { .. })
    ));
    assert_eq!(tier.count(), 0);
    assert!(!slab.exists(), "validation failure must not touch the fs");
}

#[test]
fn scenario_c_single_offset_per_axis() {
    let mut store = MemoryTier::new();
    let builder = BasisMapBuilder::new(scenario_geometry());

    // Strides equal to the slack + pattern extent leave exactly one offset.
    let count = builder.generate(&mut store, &ones(4, 4), 8, 8).unwrap();
    assert_eq!(count, 1);

    let slot = store.read(0).unwrap();
    // Embedded at the zone origin (8, 8).
    assert_eq!(slot.get(8, 8), 1.0);
    assert_eq!(slot.get(11, 11), 1.0);
    assert_eq!(slot.get(12, 12), 0.0);
    assert_eq!(slot.get(7, 7), 0.0);
}

#[test]
fn scenario_d_inverted_bounds_fail_at_geometry() {
    let err =
        Geometry::new(GridShape::new(24, 24), ZoneBounds::new(16, 8, 8, 16)).unwrap_err();
    assert!(matches!(err, GeomError::InvalidGeometry { .. }));
}

#[test]
fn embed_extract_round_trip_exact() {
    let mut store = MemoryTier::new();
    let builder = BasisMapBuilder::new(scenario_geometry());
    let pattern = Field::from_fn(GridShape::new(3, 5), |r, c| (r * 5 + c) as f32 + 0.5);

    let count = builder.generate(&mut store, &pattern, 2, 3).unwrap();
    assert!(count > 0);

    // Extract the embedded rectangle from slot 0 (placed at the zone origin)
    // and compare cell-for-cell.
    let slot = store.read(0).unwrap();
    for r in 0..3 {
        for c in 0..5 {
            assert_eq!(slot.get(8 + r, 8 + c), pattern.get(r, c));
        }
    }
}

#[test]
fn file_and_memory_tiers_agree() {
    let dir = tempfile::tempdir().unwrap();
    let mut file_tier = FileTier::new(dir.path().join("agree.slab"));
    let mut mem_tier = MemoryTier::new();
    let builder = BasisMapBuilder::new(scenario_geometry());
    let pattern = Field::from_fn(GridShape::new(2, 2), |r, c| (r * 2 + c) as f32);

    let n_file = builder.generate(&mut file_tier, &pattern, 3, 3).unwrap();
    let n_mem = builder.generate(&mut mem_tier, &pattern, 3, 3).unwrap();
    assert_eq!(n_file, n_mem);

    for k in 0..n_file {
        assert_eq!(file_tier.read(k).unwrap(), mem_tier.read(k).unwrap());
    }
    assert_eq!(file_tier.sum_all().unwrap(), mem_tier.sum_all().unwrap());
}

#[test]
fn slab_readable_out_of_band() {
    // A reader that only knows (count, rows, cols) must be able to address
    // slot k at byte offset k * rows * cols * 4.
    let dir = tempfile::tempdir().unwrap();
    let slab = dir.path().join("oob.slab");
    let mut tier = FileTier::new(&slab);
    let builder = BasisMapBuilder::new(scenario_geometry());

    let count = builder.generate(&mut tier, &ones(4, 4), 4, 4).unwrap();
    let bytes = std::fs::read(&slab).unwrap();
    let area = 24 * 24;
    assert_eq!(bytes.len(), count * area * 4);

    for k in 0..count {
        let expected = tier.read(k).unwrap();
        let base = k * area * 4;
        for (cell, chunk) in expected
            .as_slice()
            .iter()
            .zip(bytes[base..base + area * 4].chunks_exact(4))
        {
            let raw = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            assert_eq!(*cell, raw);
        }
    }
}
