// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Swell developer CLI.
//!
//! Wires the library crates into the end-to-end experiment flow: load a
//! scenario description, synthesize the basis pattern and depth map, generate
//! the basis collection into a named slab file, and export the combined
//! overlay or the bathymetry as whitespace text.

// CLI results go to stdout by design; diagnostics go through tracing.
#![allow(clippy::print_stdout)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swell_basis::{BasisMapBuilder, BasisStore, FileTier, MemoryTier};
use swell_field::{central_square, rescale, save_ascii, sloped_bottom, DepthMap, Field};
use swell_geom::{Geometry, GridShape, ZoneBounds};
use tracing::info;

/// One experiment's inputs, loaded from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scenario {
    /// Full grid shape.
    grid: GridShape,
    /// Subduction-zone bounds within the grid.
    zone: ZoneBounds,
    /// Width handed to the central-square pattern synthesizer.
    pattern_width: usize,
    /// Optional square size to rescale the synthesized pattern to.
    #[serde(default)]
    pattern_size: Option<usize>,
    /// Optional row-axis stride override (defaults to the pattern's own).
    #[serde(default)]
    x_stride: Option<usize>,
    /// Optional column-axis stride override (defaults to the pattern's own).
    #[serde(default)]
    y_stride: Option<usize>,
    /// Depth at the first grid column.
    min_depth: f32,
    /// Depth at the last grid column.
    max_depth: f32,
}

#[derive(Parser)]
#[command(name = "swell", about = "Seafloor-deformation basis scenario tools", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate the basis collection into a slab file and report the count.
    Generate {
        /// Scenario JSON path.
        #[arg(long)]
        config: PathBuf,
        /// Slab file to create.
        #[arg(long)]
        out: PathBuf,
    },
    /// Generate in memory, sum every basis map, export the overlay as text.
    Overlay {
        /// Scenario JSON path.
        #[arg(long)]
        config: PathBuf,
        /// Overlay text file to create.
        #[arg(long)]
        out: PathBuf,
    },
    /// Export the sloped-bottom depth map as text.
    Bathy {
        /// Scenario JSON path.
        #[arg(long)]
        config: PathBuf,
        /// Bathymetry text file to create.
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate { config, out } => generate(&config, &out),
        Command::Overlay { config, out } => overlay(&config, &out),
        Command::Bathy { config, out } => bathy(&config, &out),
    }
}

fn load_scenario(path: &Path) -> Result<(Scenario, Geometry)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    let scenario: Scenario =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    let geometry = Geometry::new(scenario.grid, scenario.zone)?;
    Ok((scenario, geometry))
}

/// Synthesize (and optionally rescale) the scenario's basis pattern.
///
/// Returns the pattern plus the strides to tile it with: the synthesizer's
/// own strides scale with the pattern, and explicit overrides win.
fn build_pattern(scenario: &Scenario) -> Result<(Field, usize, usize)> {
    let square = central_square(scenario.pattern_width)?;
    let (pattern, mut sx, mut sy) = match scenario.pattern_size {
        Some(size) => {
            let scaled = rescale(&square.pattern, GridShape::new(size, size));
            let factor = |stride: usize| (stride * size / square.pattern.rows()).max(1);
            (scaled, factor(square.x_stride), factor(square.y_stride))
        }
        None => (square.pattern, square.x_stride, square.y_stride),
    };
    if let Some(overridden) = scenario.x_stride {
        sx = overridden;
    }
    if let Some(overridden) = scenario.y_stride {
        sy = overridden;
    }
    Ok((pattern, sx, sy))
}

fn generate(config: &Path, out: &Path) -> Result<()> {
    let (scenario, geometry) = load_scenario(config)?;
    let (pattern, sx, sy) = build_pattern(&scenario)?;

    let mut tier = FileTier::new(out);
    let builder = BasisMapBuilder::new(geometry);
    let count = builder.generate(&mut tier, &pattern, sx, sy)?;

    info!(slab = %out.display(), count, "slab written");
    println!(
        "{count} basis maps ({grid} grid) -> {path}",
        grid = geometry.grid(),
        path = out.display()
    );
    Ok(())
}

fn overlay(config: &Path, out: &Path) -> Result<()> {
    let (scenario, geometry) = load_scenario(config)?;
    let (pattern, sx, sy) = build_pattern(&scenario)?;

    let mut tier = MemoryTier::new();
    let builder = BasisMapBuilder::new(geometry);
    let count = builder.generate(&mut tier, &pattern, sx, sy)?;
    let combined = tier.sum_all()?;
    save_ascii(&combined, out).with_context(|| format!("writing {}", out.display()))?;

    println!(
        "overlay of {count} basis maps -> {path}",
        path = out.display()
    );
    Ok(())
}

fn bathy(config: &Path, out: &Path) -> Result<()> {
    let (scenario, geometry) = load_scenario(config)?;
    let mut depth_map = DepthMap::new(geometry);
    depth_map.set(sloped_bottom(
        geometry.grid(),
        scenario.min_depth,
        scenario.max_depth,
    ))?;
    save_ascii(depth_map.map(), out).with_context(|| format!("writing {}", out.display()))?;

    println!(
        "bathymetry {min}..{max} -> {path}",
        min = scenario.min_depth,
        max = scenario.max_depth,
        path = out.display()
    );
    Ok(())
}
