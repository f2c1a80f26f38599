//! Side-scrolling arena shooter.
//!
//! `compute` holds the per-frame simulation, `render` turns a state into
//! drawing calls on any `Surface`.  The binary wires both to a terminal.

pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod render;
