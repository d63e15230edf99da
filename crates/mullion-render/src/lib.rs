#![forbid(unsafe_code)]

//! Cell-grid drawing surface.
//!
//! [`buffer::Buffer`] is the concrete surface the windowing engine draws
//! into: a row-major grid of [`cell::Cell`]s with a scissor stack for
//! clipped sub-region drawing. How the grid reaches a real terminal is the
//! embedder's concern.

pub mod buffer;
pub mod cell;
