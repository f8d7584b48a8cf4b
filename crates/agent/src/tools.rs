//! Tools the agents can invoke.
//!
//! Both tools take the query as plain text and return plain text. Tool
//! failures propagate to the caller; there is no retry layer.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use supportcrew_core::PolicyDocument;
use supportcrew_search::SearchClient;

/// Hard cap on hits per web search.
pub const MAX_SEARCH_RESULTS: usize = 5;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    async fn call(&self, query: &str) -> Result<String>;
}

/// Hands the full policy document to the model for interpretation.
///
/// The query is accepted but ignored: selection of the relevant passage is
/// the model's job, not the tool's.
pub struct PolicyLookupTool {
    policy: Arc<PolicyDocument>,
}

impl PolicyLookupTool {
    pub fn new(policy: Arc<PolicyDocument>) -> Self {
        Self { policy }
    }
}

#[async_trait]
impl Tool for PolicyLookupTool {
    fn name(&self) -> &'static str {
        "Policy Knowledge Base"
    }

    fn description(&self) -> &'static str {
        "Useful for answering questions about AI Learning Center policies."
    }

    async fn call(&self, _query: &str) -> Result<String> {
        Ok(self.policy.text().to_string())
    }
}

/// Runs one capped web search and renders the hits as a bullet list.
pub struct WebSearchTool {
    search: Arc<dyn SearchClient>,
}

impl WebSearchTool {
    pub fn new(search: Arc<dyn SearchClient>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "DuckDuckGo Search"
    }

    fn description(&self) -> &'static str {
        "Search the web for current info and summarize relevant results."
    }

    async fn call(&self, query: &str) -> Result<String> {
        let hits = self.search.text_search(query, MAX_SEARCH_RESULTS).await?;

        if hits.is_empty() {
            return Ok("No results found.".to_string());
        }

        let formatted = hits
            .iter()
            .map(|hit| {
                format!("- {}\n  {}\n  {}", hit.display_title(), hit.link(), hit.summary())
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(formatted)
    }
}
