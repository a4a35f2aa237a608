//! Catalog query engine.
//!
//! - `filter`: the search pipeline (name → specifications → price → rating).
//! - `sort`: ordering and page slicing.
//!
//! Both stages take a borrowed product slice and return freshly owned
//! results; neither reorders nor truncates its input.

pub mod filter;
pub mod sort;
