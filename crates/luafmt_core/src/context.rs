//! Script kinds a caller can format for.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Roblox script kind the code will run as.
///
/// Labels are matched case-sensitively against the variant names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum ScriptContext {
    /// Runs on the server
    Script,
    /// Runs on the player's client
    LocalScript,
    /// Shared module loaded with `require`
    ModuleScript,
}

impl ScriptContext {
    /// Short description used when embedding the context in a prompt.
    pub fn description(&self) -> &'static str {
        match self {
            ScriptContext::Script => "a server-side Script that runs on the Roblox server",
            ScriptContext::LocalScript => {
                "a client-side LocalScript that runs on the player's device"
            }
            ScriptContext::ModuleScript => "a ModuleScript shared through require()",
        }
    }

    /// Comma-separated list of every accepted label.
    pub fn labels() -> String {
        Self::iter()
            .map(|ctx| ctx.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
