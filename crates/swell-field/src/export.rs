// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Whitespace text export — the `.bath` hand-off format.
//!
//! One line per row, values separated by single spaces. Any reader that can
//! split on whitespace reconstructs the grid; shape travels out of band.

use crate::Field;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write `field` as whitespace-separated text.
///
/// # Errors
///
/// Propagates any I/O failure from the writer.
pub fn write_ascii<W: Write>(field: &Field, mut writer: W) -> io::Result<()> {
    for r in 0..field.rows() {
        let mut first = true;
        for &value in field.row(r) {
            if first {
                first = false;
            } else {
                writer.write_all(b" ")?;
            }
            write!(writer, "{value}")?;
        }
        writer.write_all(b"\n")?;
    }
    Ok(())
}

/// Create `path` and write `field` through a buffered writer.
///
/// # Errors
///
/// Propagates file-creation and write failures.
pub fn save_ascii(field: &Field, path: &Path) -> io::Result<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ascii(field, &mut writer)?;
    writer.flush()
}
