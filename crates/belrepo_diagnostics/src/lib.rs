//! Compilation warnings emitted while compiling BEL documents.
//!
//! A [`CompilationWarning`] records the offending source line, its position,
//! and a [`WarningKind`] classification. Warnings travel with the compiled
//! graph into every cache format and into the per-document warnings table.
//! [`TerminalRenderer`] formats them for the command line.

#![warn(missing_docs)]

pub mod kind;
pub mod renderer;
pub mod warning;

pub use kind::WarningKind;
pub use renderer::{TerminalRenderer, WarningRenderer};
pub use warning::CompilationWarning;
