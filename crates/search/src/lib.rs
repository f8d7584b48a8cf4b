//! Web search provider client.
//!
//! Talks to a ddgs-compatible JSON endpoint. The provider's records are
//! loosely typed: every field is optional and consumers resolve display
//! values through the fallback accessors below.

use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::Deserialize;

/// One search result as the provider returned it.
///
/// Different provider versions emit `title` or `heading`, `href` or `url`,
/// `body` or `snippet`. All six are kept and resolved lazily.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchHit {
    pub title: Option<String>,
    pub heading: Option<String>,
    pub href: Option<String>,
    pub url: Option<String>,
    pub body: Option<String>,
    pub snippet: Option<String>,
}

impl SearchHit {
    /// Display title: `title`, then `heading`, then the literal `"Result"`.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().or(self.heading.as_deref()).unwrap_or("Result")
    }

    /// Link: `href`, then `url`, then empty.
    pub fn link(&self) -> &str {
        self.href.as_deref().or(self.url.as_deref()).unwrap_or("")
    }

    /// Summary text: `body`, then `snippet`, then empty.
    pub fn summary(&self) -> &str {
        self.body.as_deref().or(self.snippet.as_deref()).unwrap_or("")
    }
}

/// Seam over the search provider so the crew can be tested without a
/// network.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn text_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<SearchHit>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Client for a ddgs-compatible search endpoint.
///
/// Issues `GET {base_url}/search?q=..&max_results=..&format=json` and
/// deserializes the `results` array. A single call per query, no retry.
pub struct DuckDuckGoClient {
    http: reqwest::Client,
    base_url: String,
}

impl DuckDuckGoClient {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build search http client")?;

        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }
}

#[async_trait]
impl SearchClient for DuckDuckGoClient {
    async fn text_search(
        &self,
        query: &str,
        max_results: usize,
    ) -> anyhow::Result<Vec<SearchHit>> {
        let url = format!("{}/search", self.base_url);

        tracing::debug!(event_name = "search_request", query, max_results, "querying provider");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", query),
                ("max_results", &max_results.to_string()),
                ("format", "json"),
            ])
            .send()
            .await
            .context("search request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("search provider returned {status}: {body}"));
        }

        let parsed: SearchResponse =
            response.json().await.context("failed to decode search response")?;

        let mut hits = parsed.results;
        hits.truncate(max_results);

        tracing::debug!(event_name = "search_response", hit_count = hits.len(), "provider ok");
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::SearchHit;

    #[test]
    fn display_title_prefers_title_over_heading() {
        let hit = SearchHit {
            title: Some("Primary".to_string()),
            heading: Some("Secondary".to_string()),
            ..SearchHit::default()
        };
        assert_eq!(hit.display_title(), "Primary");
    }

    #[test]
    fn display_title_falls_back_to_heading_then_literal() {
        let hit = SearchHit { heading: Some("Heading".to_string()), ..SearchHit::default() };
        assert_eq!(hit.display_title(), "Heading");
        assert_eq!(SearchHit::default().display_title(), "Result");
    }

    #[test]
    fn link_prefers_href_and_defaults_to_empty() {
        let hit = SearchHit {
            href: Some("https://a".to_string()),
            url: Some("https://b".to_string()),
            ..SearchHit::default()
        };
        assert_eq!(hit.link(), "https://a");

        let hit = SearchHit { url: Some("https://b".to_string()), ..SearchHit::default() };
        assert_eq!(hit.link(), "https://b");
        assert_eq!(SearchHit::default().link(), "");
    }

    #[test]
    fn summary_prefers_body_and_defaults_to_empty() {
        let hit = SearchHit {
            body: Some("body text".to_string()),
            snippet: Some("snippet text".to_string()),
            ..SearchHit::default()
        };
        assert_eq!(hit.summary(), "body text");

        let hit = SearchHit { snippet: Some("snippet text".to_string()), ..SearchHit::default() };
        assert_eq!(hit.summary(), "snippet text");
        assert_eq!(SearchHit::default().summary(), "");
    }

    #[test]
    fn response_decoding_tolerates_missing_fields() {
        let raw = r#"{"results":[{"title":"T","href":"https://x"},{}]}"#;
        let parsed: super::SearchResponse = serde_json::from_str(raw).expect("decode");
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].display_title(), "T");
        assert_eq!(parsed.results[1].display_title(), "Result");
    }
}
