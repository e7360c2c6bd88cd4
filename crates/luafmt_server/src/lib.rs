//! HTTP relay that formats Lua code through a text-generation API.
//!
//! `POST /format-lua` validates the request, renders the instruction prompt,
//! forwards it to a [`CodeFormatter`](luafmt_interface::CodeFormatter) and
//! returns the generated text as `formattedCode`.

mod api;
mod config;
mod response;
mod server;

pub use api::{ApiState, MAX_BODY_BYTES, create_router};
pub use config::{DEFAULT_PORT, ServerConfig, ServerConfigBuilder};
pub use response::{ApiError, ErrorBody, FormatResponse, handle_panic, upstream_details};
pub use server::run;
