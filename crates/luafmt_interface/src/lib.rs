//! Trait definitions for the luafmt formatting relay.
//!
//! The relay only depends on [`CodeFormatter`]; the HTTP client for the
//! text-generation API and test doubles both implement it.

mod formatter;

pub use formatter::CodeFormatter;
