use std::sync::Arc;

use supportcrew_agent::crew::Crew;
use supportcrew_agent::llm::{ChatCompletionsClient, LlmClient};
use supportcrew_agent::support_crew;
use supportcrew_core::config::{AppConfig, ConfigError, LoadOptions};
use supportcrew_core::{PolicyDocument, PolicyError};
use supportcrew_search::{DuckDuckGoClient, SearchClient};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub policy: Arc<PolicyDocument>,
    /// Crew backing the primary UI. Per-stage output stays at debug level.
    pub crew: Arc<Crew>,
    /// Verbose crew backing the raw UI variant.
    pub raw_crew: Arc<Crew>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("client setup failed: {0}")]
    Client(#[from] anyhow::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    // The policy document is loaded eagerly: a missing or empty file must
    // fail startup, not the first request.
    let policy = Arc::new(PolicyDocument::load(&config.policy.path)?);
    info!(
        event_name = "system.bootstrap.policy_loaded",
        correlation_id = "bootstrap",
        policy_path = %config.policy.path.display(),
        policy_bytes = policy.text().len(),
        "policy document loaded"
    );

    let search: Arc<dyn SearchClient> = Arc::new(DuckDuckGoClient::new(
        config.search.base_url.clone(),
        config.search.timeout_secs,
    )?);
    let llm: Arc<dyn LlmClient> = Arc::new(ChatCompletionsClient::from_config(&config.llm)?);

    let crew = Arc::new(support_crew(policy.clone(), search.clone(), llm.clone(), false)?);
    let raw_crew = Arc::new(support_crew(policy.clone(), search, llm, true)?);

    info!(
        event_name = "system.bootstrap.crews_ready",
        correlation_id = "bootstrap",
        "support crews assembled"
    );

    Ok(Application { config, policy, crew, raw_crew })
}
