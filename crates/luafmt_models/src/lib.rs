//! Text-generation provider integrations for luafmt.

pub mod gemini;

pub use gemini::{GeminiClient, GeminiConfig};
