//! Caller-tunable formatting options.

use serde::{Deserialize, Serialize};

/// Style switches that alter the generated prompt.
///
/// Missing fields in the JSON body take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Always wrap control-flow conditions in parentheses
    pub use_always_parentheses: bool,
    /// Allow `a and b or c` for conditional assignment when it is safe
    pub prefer_and_or_idiom: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_always_parentheses: true,
            prefer_and_or_idiom: false,
        }
    }
}
