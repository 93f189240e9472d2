// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Swell field kit.
//!
//! Grid-shaped `f32` arrays and the simple producers/consumers around the
//! basis-generation core: the sloped-bottom depth gradient, the central-square
//! basis pattern, bilinear rescaling, shape-checked surface and depth-map
//! holders, and whitespace text export (the `.bath` hand-off format).
//!
//! Everything here is stateless or plain-value; the resource-heavy collection
//! store lives in `swell-basis`.
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
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::use_self
)]

mod depth;
mod export;
mod field;
mod pattern;
mod surface;

pub use depth::sloped_bottom;
pub use export::{save_ascii, write_ascii};
pub use field::{Field, FieldError};
pub use pattern::{central_square, rescale, CentralSquare};
pub use surface::{DepthMap, Surface};
