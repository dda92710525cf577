//! layergen CLI library
//!
//! Command implementations shared by the `layergen` binary and its tests.

pub mod commands;

pub use commands::{GenerateCommand, PathsCommand, PreviewCommand, ProjectCommand, TypesCommand};
