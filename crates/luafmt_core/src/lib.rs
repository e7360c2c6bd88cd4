//! Core data types for the luafmt formatting relay.
//!
//! This crate provides the request model shared by the server and the
//! prompt builder that turns a request into model instructions.

mod context;
mod observability;
mod options;
mod prompt;
mod request;

pub use context::ScriptContext;
pub use observability::{LogFormat, init_observability};
pub use options::FormatOptions;
pub use prompt::{and_or_directive, build_prompt, parentheses_directive};
pub use request::{FormatRequest, FormatRequestBody, FormatRequestBuilder};
