//! Inkpad engine crate.
//!
//! This crate owns the signature pad core (stroke tessellation, vertex
//! stores, frame scheduling, capture) plus the platform + GPU runtime
//! pieces that host it.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod geometry;
pub mod mesh;
pub mod stroke;
pub mod schedule;
pub mod capture;
pub mod pad;
pub mod render;
pub mod paint;
