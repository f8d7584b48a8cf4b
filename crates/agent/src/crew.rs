//! Sequential crew runner.
//!
//! Agents are prompt personas with an optional toolbox. Tasks run strictly
//! in declaration order and each task sees the previous task's output as
//! read-only context. Whether a task escalates to the next one is carried
//! in the task text itself and honored (or not) by the model; the runner
//! never inspects outputs for routing.

use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::llm::LlmClient;
use crate::tools::Tool;

/// Upper bound on tool invocations per task.
const MAX_TOOL_ROUNDS: usize = 3;

const QUERY_PLACEHOLDER: &str = "{user_query}";

/// A prompt persona. Agents cannot delegate to each other; there is no
/// mechanism for it.
pub struct AgentSpec {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<Arc<dyn Tool>>,
}

impl AgentSpec {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self { role: role.into(), goal: goal.into(), backstory: backstory.into(), tools: vec![] }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    fn system_prompt(&self) -> String {
        let mut prompt = format!(
            "You are {role}.\nYour goal: {goal}\nBackstory: {backstory}",
            role = self.role,
            goal = self.goal,
            backstory = self.backstory,
        );

        if !self.tools.is_empty() {
            prompt.push_str("\n\nYou have access to the following tools:\n");
            for tool in &self.tools {
                prompt.push_str(&format!("- {}: {}\n", tool.name(), tool.description()));
            }
            prompt.push_str(
                "\nTo use a tool, reply with exactly two lines and nothing else:\n\
                 TOOL: <tool name>\n\
                 INPUT: <input text>\n\
                 The tool result will be given back to you as an observation. \
                 When you have enough information, reply with your answer instead.",
            );
        }

        prompt
    }

    fn find_tool(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|tool| tool.name().eq_ignore_ascii_case(name))
    }
}

/// One unit of work, bound to an agent by index into the crew's agent list.
pub struct TaskSpec {
    pub description: String,
    pub expected_output: String,
    pub agent: usize,
}

impl TaskSpec {
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: usize,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
        }
    }
}

pub struct Crew {
    agents: Vec<AgentSpec>,
    tasks: Vec<TaskSpec>,
    llm: Arc<dyn LlmClient>,
    verbose: bool,
}

impl Crew {
    pub fn new(
        agents: Vec<AgentSpec>,
        tasks: Vec<TaskSpec>,
        llm: Arc<dyn LlmClient>,
        verbose: bool,
    ) -> Result<Self> {
        for (index, task) in tasks.iter().enumerate() {
            if task.agent >= agents.len() {
                return Err(anyhow!(
                    "task {index} references agent {agent} but only {count} agents exist",
                    agent = task.agent,
                    count = agents.len(),
                ));
            }
        }

        Ok(Self { agents, tasks, llm, verbose })
    }

    /// Run every task in order and return the last task's output.
    pub async fn kickoff(&self, user_query: &str) -> Result<String> {
        let mut previous_output: Option<String> = None;

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = &self.agents[task.agent];
            let output = self.run_task(task, agent, user_query, previous_output.as_deref()).await?;

            if self.verbose {
                tracing::info!(
                    event_name = "task_completed",
                    task_index = index,
                    agent_role = %agent.role,
                    output = %output,
                    "task finished"
                );
            } else {
                tracing::debug!(
                    event_name = "task_completed",
                    task_index = index,
                    agent_role = %agent.role,
                    "task finished"
                );
            }

            previous_output = Some(output);
        }

        previous_output.ok_or_else(|| anyhow!("crew has no tasks"))
    }

    async fn run_task(
        &self,
        task: &TaskSpec,
        agent: &AgentSpec,
        user_query: &str,
        context: Option<&str>,
    ) -> Result<String> {
        let system = agent.system_prompt();

        let mut user = format!(
            "Task: {description}\nExpected output: {expected}",
            description = task.description.replace(QUERY_PLACEHOLDER, user_query),
            expected = task.expected_output,
        );
        if let Some(context) = context {
            user.push_str(&format!("\n\nContext from the previous task:\n{context}"));
        }

        let mut reply = self.llm.complete(&system, &user).await?;

        for _ in 0..MAX_TOOL_ROUNDS {
            let Some((tool_name, tool_input)) = parse_tool_invocation(&reply) else {
                return Ok(reply);
            };

            let observation = match agent.find_tool(&tool_name) {
                Some(tool) => tool.call(&tool_input).await?,
                None => format!("Unknown tool `{tool_name}`. Available tools were listed above."),
            };

            tracing::debug!(
                event_name = "tool_invoked",
                tool = %tool_name,
                agent_role = %agent.role,
                "tool round"
            );

            user.push_str(&format!(
                "\n\nObservation from {tool_name}:\n{observation}\n\n\
                 Continue the task with this observation."
            ));
            reply = self.llm.complete(&system, &user).await?;
        }

        // Rounds exhausted. Hand back whatever the model last said.
        if parse_tool_invocation(&reply).is_some() {
            tracing::warn!(
                event_name = "tool_rounds_exhausted",
                agent_role = %agent.role,
                "model kept requesting tools past the round limit"
            );
        }
        Ok(reply)
    }
}

/// Parse a `TOOL:` / `INPUT:` invocation out of a model reply.
///
/// The input line is optional; a bare `TOOL:` line yields an empty input.
fn parse_tool_invocation(reply: &str) -> Option<(String, String)> {
    let mut lines = reply.lines().map(str::trim);

    let name = lines.find_map(|line| line.strip_prefix("TOOL:"))?.trim();
    if name.is_empty() {
        return None;
    }

    let input = reply
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("INPUT:"))
        .unwrap_or("")
        .trim();

    Some((name.to_string(), input.to_string()))
}
