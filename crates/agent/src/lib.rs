//! Agent runtime: the LLM client, the two support tools, and the
//! sequential crew that chains policy lookup, offline knowledge, and web
//! search into one answer pipeline.

pub mod crew;
pub mod llm;
pub mod support;
pub mod tools;

pub use crew::{AgentSpec, Crew, TaskSpec};
pub use llm::{ChatCompletionsClient, LlmClient};
pub use support::support_crew;
pub use tools::{PolicyLookupTool, Tool, WebSearchTool, MAX_SEARCH_RESULTS};
