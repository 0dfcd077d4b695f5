//! Web search tool.
//!
//! Thin HTTP glue over the DuckDuckGo Instant Answer API: takes a
//! `{"query": "..."}` argument, returns the abstract plus related
//! results. No scraping beyond what the API already condenses.

use hearsay_core::tool::Tool;
use hearsay_types::error::ToolError;
use serde::Deserialize;
use serde_json::json;

use std::time::Duration;

/// Web search over the DuckDuckGo Instant Answer API.
pub struct WebSearchTool {
    client: reqwest::Client,
    base_url: String,
}

impl WebSearchTool {
    /// Create the tool with its default endpoint.
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            base_url: "https://api.duckduckgo.com".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(rename = "AbstractText", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Deserialize)]
struct RelatedTopic {
    #[serde(rename = "Text", default)]
    text: String,
    #[serde(rename = "FirstURL", default)]
    first_url: String,
}

/// Flatten the API payload into the JSON shape handed to the agent.
fn summarize(query: &str, response: SearchResponse) -> serde_json::Value {
    let results: Vec<_> = response
        .related_topics
        .iter()
        .filter(|t| !t.text.is_empty())
        .take(5)
        .map(|t| json!({"text": t.text, "url": t.first_url}))
        .collect();

    json!({
        "query": query,
        "abstract": response.abstract_text,
        "results": results,
    })
}

impl Tool for WebSearchTool {
    fn name(&self) -> &'static str {
        "web_search"
    }

    fn description(&self) -> &'static str {
        "search the web; args: {\"query\": string}"
    }

    async fn call(&self, args: serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let query = args
            .get("query")
            .and_then(|q| q.as_str())
            .ok_or_else(|| ToolError::BadArgs("expected {\"query\": string}".to_string()))?
            .to_string();

        let response = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[("q", query.as_str()), ("format", "json"), ("no_html", "1")])
            .send()
            .await
            .map_err(|e| ToolError::Http(e.to_string()))?
            .error_for_status()
            .map_err(|e| ToolError::Http(e.to_string()))?
            .json::<SearchResponse>()
            .await
            .map_err(|e| ToolError::UnexpectedPayload(e.to_string()))?;

        Ok(summarize(&query, response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "AbstractText": "Rust is a multi-paradigm systems programming language.",
        "RelatedTopics": [
            {"Text": "Rust (programming language)", "FirstURL": "https://duckduckgo.com/Rust"},
            {"Text": "", "FirstURL": "https://duckduckgo.com/empty"},
            {"Text": "Rust Foundation", "FirstURL": "https://duckduckgo.com/Rust_Foundation"}
        ]
    }"#;

    #[test]
    fn test_summarize_skips_empty_topics() {
        let response: SearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let summary = summarize("rust language", response);

        assert_eq!(summary["query"], "rust language");
        assert!(
            summary["abstract"]
                .as_str()
                .unwrap()
                .starts_with("Rust is a multi-paradigm")
        );
        let results = summary["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1]["text"], "Rust Foundation");
    }

    #[test]
    fn test_payload_with_missing_fields_still_parses() {
        let response: SearchResponse = serde_json::from_str("{}").unwrap();
        let summary = summarize("anything", response);
        assert_eq!(summary["abstract"], "");
        assert!(summary["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_query_is_bad_args() {
        let tool = WebSearchTool::new();
        let err = tool.call(json!({"q": "wrong key"})).await.unwrap_err();
        assert!(matches!(err, ToolError::BadArgs(_)));
    }
}
