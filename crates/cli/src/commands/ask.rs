use std::io::{self, BufRead, Write};
use std::sync::Arc;

use supportcrew_agent::{support_crew, ChatCompletionsClient, LlmClient};
use supportcrew_core::config::{AppConfig, LoadOptions};
use supportcrew_core::PolicyDocument;
use supportcrew_search::{DuckDuckGoClient, SearchClient};

use super::CommandResult;

pub fn run(query: Option<String>) -> CommandResult {
    let query = match query {
        Some(query) => query,
        None => match prompt_for_query() {
            Ok(query) => query,
            Err(error) => {
                return CommandResult::failure(
                    "ask",
                    "stdin_read",
                    format!("failed to read the question: {error}"),
                    1,
                );
            }
        },
    };

    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure("ask", "config_validation", error.to_string(), 2);
        }
    };

    let policy = match PolicyDocument::load(&config.policy.path) {
        Ok(policy) => Arc::new(policy),
        Err(error) => {
            return CommandResult::failure("ask", "policy_document", error.to_string(), 2);
        }
    };

    let answer = run_pipeline(&config, policy, &query);

    match answer {
        Ok(answer) => CommandResult {
            exit_code: 0,
            output: format!(
                "\n\n########################\nFINAL ANSWER:\n{answer}\n########################"
            ),
        },
        Err(error) => {
            CommandResult::failure("ask", "pipeline_failure", format!("{error:#}"), 1)
        }
    }
}

fn run_pipeline(
    config: &AppConfig,
    policy: Arc<PolicyDocument>,
    query: &str,
) -> anyhow::Result<String> {
    let search: Arc<dyn SearchClient> = Arc::new(DuckDuckGoClient::new(
        config.search.base_url.clone(),
        config.search.timeout_secs,
    )?);
    let llm: Arc<dyn LlmClient> = Arc::new(ChatCompletionsClient::from_config(&config.llm)?);

    let crew = support_crew(policy, search, llm, true)?;

    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    runtime.block_on(crew.kickoff(query))
}

fn prompt_for_query() -> io::Result<String> {
    println!("### Welcome to AI Learning Center Support ###");
    print!("\nHow can we help you today? ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
