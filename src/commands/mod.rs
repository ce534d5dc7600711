//! Management commands for the fixture pipeline.
//!
//! Commands wrap the pipeline behind a console-style surface: metadata for
//! help output plus an `execute` entry point taking parsed arguments and
//! options.

mod import;

pub use import::{ImportArgs, ImportCommand, ImportOptions};
