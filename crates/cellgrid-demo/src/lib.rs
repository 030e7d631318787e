#![forbid(unsafe_code)]

//! Command-line harness for `cellgrid-layout`: load a layout document,
//! lay it out at a given width, and replay scripted drag gestures.

pub mod cli;
pub mod document;
pub mod error;
pub mod replay;

pub use cli::{Cli, Commands, init_tracing, run, run_from_env};
pub use error::{DemoError, Result};
