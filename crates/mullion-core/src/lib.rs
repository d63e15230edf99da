#![forbid(unsafe_code)]

//! Geometry and event types for the mullion windowing engine.
//!
//! This crate carries no rendering or windowing logic of its own. It defines
//! the cell-grid coordinate system ([`geometry::Rect`]) and the terminal
//! event vocabulary ([`event::Event`]) that the rest of the workspace builds
//! on, plus the mapping from crossterm's native events into that vocabulary.

pub mod event;
pub mod geometry;
