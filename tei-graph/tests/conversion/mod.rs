//! Conversion tests
//!
//! End to end checks from markup source to graph elements.

mod properties;
mod references;
mod structure;
mod text;
