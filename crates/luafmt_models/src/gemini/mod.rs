//! Google Gemini integration.

mod client;
mod dto;

pub use client::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT, GeminiClient, GeminiConfig,
    GeminiConfigBuilder,
};
pub use dto::{
    Candidate, Content, GenerateContentRequest, GenerateContentRequestBuilder,
    GenerateContentResponse, GenerationConfig, Part,
};
