// Resume generation pipeline: prompt construction and the single outbound
// generation call. All Gemini calls go through llm_client.

pub mod generator;
pub mod prompt_builder;
pub mod prompts;

pub use generator::{generate, GenerationError, ServiceError};
