//! Web UI routes for asking the support crew a question.
//!
//! Two variants share one template:
//! - `GET /` + `POST /ask` — the primary form; the crew runs quietly and the
//!   response is postprocessed down to the final answer.
//! - `GET /raw` + `POST /raw/ask` — diagnostic form; the crew runs verbose
//!   and the full unextracted response is rendered.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use supportcrew_agent::crew::Crew;
use supportcrew_core::extract_final_answer;
use tera::{Context, Tera};
use tracing::{error, info, warn};
use uuid::Uuid;

#[derive(Clone)]
pub struct AskState {
    templates: Arc<Tera>,
    crew: Arc<Crew>,
    raw_crew: Arc<Crew>,
}

#[derive(Debug, Deserialize)]
pub struct AskForm {
    pub question: String,
}

/// Initialize the Tera engine with the ask templates.
fn init_templates() -> Arc<Tera> {
    let mut tera = match Tera::new("templates/ask/**/*") {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "failed to load ask templates from filesystem, using empty Tera instance");
            Tera::default()
        }
    };

    // Embedded fallback in case filesystem templates are not available
    tera.add_raw_template("index.html", include_str!("../../../templates/ask/index.html")).ok();

    Arc::new(tera)
}

pub fn router(crew: Arc<Crew>, raw_crew: Arc<Crew>) -> Router {
    let templates = init_templates();

    Router::new()
        .route("/", get(index_page))
        .route("/ask", post(submit))
        .route("/raw", get(raw_index_page))
        .route("/raw/ask", post(submit_raw))
        .with_state(AskState { templates, crew, raw_crew })
}

async fn index_page(State(state): State<AskState>) -> Result<Html<String>, (StatusCode, Html<String>)> {
    render_form(&state, Variant::Extracted, None, None, None)
}

async fn raw_index_page(
    State(state): State<AskState>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    render_form(&state, Variant::Raw, None, None, None)
}

pub async fn submit(
    State(state): State<AskState>,
    Form(form): Form<AskForm>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    handle_question(state, form, Variant::Extracted).await
}

pub async fn submit_raw(
    State(state): State<AskState>,
    Form(form): Form<AskForm>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    handle_question(state, form, Variant::Raw).await
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Variant {
    Extracted,
    Raw,
}

impl Variant {
    fn title(self) -> &'static str {
        match self {
            Variant::Extracted => "AI Learning Center Support",
            Variant::Raw => "AI Learning Center Support (raw)",
        }
    }

    fn action(self) -> &'static str {
        match self {
            Variant::Extracted => "/ask",
            Variant::Raw => "/raw/ask",
        }
    }
}

async fn handle_question(
    state: AskState,
    form: AskForm,
    variant: Variant,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let question = form.question.trim().to_string();
    if question.is_empty() {
        return render_form(
            &state,
            variant,
            Some("Please enter a question first."),
            None,
            None,
        );
    }

    let correlation_id = Uuid::new_v4().to_string();
    info!(
        event_name = "ask.question_received",
        correlation_id = %correlation_id,
        question = %question,
        variant = ?variant,
        "running support crew"
    );

    let crew = match variant {
        Variant::Extracted => &state.crew,
        Variant::Raw => &state.raw_crew,
    };

    let raw_answer = crew.kickoff(&question).await.map_err(|e| {
        error!(
            event_name = "ask.crew_failed",
            correlation_id = %correlation_id,
            error = %e,
            "support crew run failed"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<h1>Error</h1><p>The support crew failed to answer: {e}</p>")),
        )
    })?;

    let answer = match variant {
        Variant::Extracted => extract_final_answer(&raw_answer),
        Variant::Raw => raw_answer,
    };

    info!(
        event_name = "ask.answer_ready",
        correlation_id = %correlation_id,
        answer_bytes = answer.len(),
        "answer rendered"
    );

    render_form(&state, variant, None, Some(&question), Some(&answer))
}

fn render_form(
    state: &AskState,
    variant: Variant,
    warning: Option<&str>,
    question: Option<&str>,
    answer: Option<&str>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let mut context = Context::new();
    context.insert("title", variant.title());
    context.insert("action", variant.action());
    if let Some(warning) = warning {
        context.insert("warning", warning);
    }
    if let Some(question) = question {
        context.insert("question", question);
    }
    if let Some(answer) = answer {
        context.insert("answer", answer);
    }

    let html = state.templates.render("index.html", &context).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("<h1>Template Error</h1><pre>{e:?}</pre>")),
        )
    })?;

    Ok(Html(html))
}
