//! The AI Learning Center support crew.
//!
//! Three tiers, tried in order: the policy specialist answers from the
//! policy document, the offline generalist answers from model knowledge,
//! and the web-enabled generalist searches when the earlier tiers punt.
//! Escalation is signalled in plain text ("N/A", "NEEDS_WEB") inside the
//! task instructions; the runner does not enforce those signals.

use std::sync::Arc;

use anyhow::Result;

use supportcrew_core::PolicyDocument;
use supportcrew_search::SearchClient;

use crate::crew::{AgentSpec, Crew, TaskSpec};
use crate::llm::LlmClient;
use crate::tools::{PolicyLookupTool, Tool, WebSearchTool};

/// Build the three-tier support crew.
pub fn support_crew(
    policy: Arc<PolicyDocument>,
    search: Arc<dyn SearchClient>,
    llm: Arc<dyn LlmClient>,
    verbose: bool,
) -> Result<Crew> {
    let policy_tool: Arc<dyn Tool> = Arc::new(PolicyLookupTool::new(policy));
    let search_tool: Arc<dyn Tool> = Arc::new(WebSearchTool::new(search));

    let agents = vec![
        AgentSpec::new(
            "Senior Policy Support Specialist",
            "Provide accurate answers based strictly on company policy.",
            "You are the guardian of company rules. You never guess. \
             You use the Policy Knowledge Base.",
        )
        .with_tool(policy_tool),
        AgentSpec::new(
            "AI Education Generalist",
            "Answer general AI questions without web search, using internal knowledge only.",
            "You are a helpful educator. If you are unsure, say so and suggest a web search.",
        ),
        AgentSpec::new(
            "Web-Enabled AI Education Consultant",
            "Help users with general AI concepts, current trends and other questions.",
            "You are an enthusiastic educator. You can search the web to answer user questions.",
        )
        .with_tool(search_tool),
    ];

    let tasks = vec![
        TaskSpec::new(
            "Check if the query '{user_query}' requires policy info. If so, answer it. \
             If not, say 'Not a policy question'.",
            "Policy answer or 'N/A'",
            0,
        ),
        TaskSpec::new(
            "If the previous agent said 'N/A', answer the query '{user_query}' using \
             internal knowledge only. If you cannot answer confidently, respond with \
             'NEEDS_WEB'. If policy answered it, just summarize.",
            "Answer or 'NEEDS_WEB'.",
            1,
        ),
        TaskSpec::new(
            "If the previous agent said 'NEEDS_WEB', answer the query '{user_query}' using \
             web search. If the previous agent answered it or policy answered it, just \
             summarize.",
            "Final answer to user.",
            2,
        ),
    ];

    Crew::new(agents, tasks, llm, verbose)
}
