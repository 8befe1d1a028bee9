//! Grounding capability: best-effort web lookup for factual sources.
//!
//! The materials and projects roles can ground their claims in real sources.
//! Grounding is strictly enrichment: a failed or empty lookup never fails
//! the generation call. The default implementation queries the DuckDuckGo
//! instant-answer API, which needs no API key.

use crate::error::GroundingError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// One grounding result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroundingHit {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// Trait for grounding/search capabilities.
#[async_trait]
pub trait GroundingProvider: Send + Sync {
    /// Search for sources matching the query, best first.
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<GroundingHit>, GroundingError>;
}

/// Render hits as a reference block appended to an instruction.
pub fn render_hits(hits: &[GroundingHit]) -> String {
    let mut out = String::from("Reference sources found for these topics:\n");
    for hit in hits {
        out.push_str(&format!("- {} ({})\n  {}\n", hit.title, hit.url, hit.snippet));
    }
    out.push_str("Prefer these verified sources where they fit.");
    out
}

/// Grounding provider backed by the DuckDuckGo instant-answer API.
#[derive(Debug)]
pub struct DuckDuckGoGrounding {
    client: reqwest::Client,
}

impl DuckDuckGoGrounding {
    pub fn new() -> Result<Self, GroundingError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("EduForge/0.3")
            .build()
            .map_err(|e| GroundingError::Request {
                message: format!("Failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

/// Extract ordered hits from an instant-answer response body.
fn parse_instant_answers(body: &Value, max_results: usize) -> Vec<GroundingHit> {
    let mut hits = Vec::new();

    // Main abstract, when present, is the strongest hit.
    if let Some(abstract_text) = body.get("AbstractText").and_then(|v| v.as_str())
        && !abstract_text.is_empty()
    {
        hits.push(GroundingHit {
            title: body
                .get("AbstractSource")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown")
                .to_string(),
            url: body
                .get("AbstractURL")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            snippet: abstract_text.to_string(),
        });
    }

    for key in ["RelatedTopics", "Results"] {
        if let Some(entries) = body.get(key).and_then(|v| v.as_array()) {
            for entry in entries {
                if hits.len() >= max_results {
                    return hits;
                }
                let Some(text) = entry.get("Text").and_then(|v| v.as_str()) else {
                    continue;
                };
                let url = entry
                    .get("FirstURL")
                    .and_then(|v| v.as_str())
                    .unwrap_or("")
                    .to_string();
                // DuckDuckGo packs "Title - description" into one field
                let (title, snippet) = match text.split_once(" - ") {
                    Some((t, s)) => (t.to_string(), s.to_string()),
                    None => (text.to_string(), text.to_string()),
                };
                hits.push(GroundingHit {
                    title,
                    url,
                    snippet,
                });
            }
        }
    }

    hits.truncate(max_results);
    hits
}

#[async_trait]
impl GroundingProvider for DuckDuckGoGrounding {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<GroundingHit>, GroundingError> {
        let url = format!(
            "https://api.duckduckgo.com/?q={}&format=json&no_html=1&skip_disambig=1",
            urlencoding::encode(query)
        );

        debug!(query = %query, "Sending grounding search");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| GroundingError::Request {
                message: format!("Search request failed: {}", e),
            })?;

        let body: Value = response.json().await.map_err(|e| GroundingError::Parse {
            message: format!("Failed to parse search response: {}", e),
        })?;

        Ok(parse_instant_answers(&body, max_results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_abstract_becomes_first_hit() {
        let body = json!({
            "AbstractText": "A binary search tree is a rooted binary tree.",
            "AbstractSource": "Wikipedia",
            "AbstractURL": "https://en.wikipedia.org/wiki/Binary_search_tree",
            "RelatedTopics": [],
        });
        let hits = parse_instant_answers(&body, 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Wikipedia");
        assert!(hits[0].snippet.contains("rooted binary tree"));
    }

    #[test]
    fn test_parse_related_topics_split_title() {
        let body = json!({
            "AbstractText": "",
            "RelatedTopics": [
                { "Text": "AVL tree - a self-balancing binary search tree", "FirstURL": "https://example.org/avl" },
                { "Text": "nodash", "FirstURL": "https://example.org/plain" },
            ],
        });
        let hits = parse_instant_answers(&body, 5);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "AVL tree");
        assert_eq!(hits[0].snippet, "a self-balancing binary search tree");
        assert_eq!(hits[1].title, "nodash");
    }

    #[test]
    fn test_parse_respects_max_results() {
        let topics: Vec<Value> = (0..10)
            .map(|i| json!({ "Text": format!("topic {i}"), "FirstURL": "https://example.org" }))
            .collect();
        let body = json!({ "RelatedTopics": topics });
        let hits = parse_instant_answers(&body, 3);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_parse_empty_body_yields_no_hits() {
        let hits = parse_instant_answers(&json!({}), 5);
        assert!(hits.is_empty());
    }

    #[test]
    fn test_render_hits_lists_urls() {
        let hits = vec![GroundingHit {
            title: "Rust Book".into(),
            url: "https://doc.rust-lang.org/book/".into(),
            snippet: "The official Rust programming language book.".into(),
        }];
        let block = render_hits(&hits);
        assert!(block.contains("https://doc.rust-lang.org/book/"));
        assert!(block.contains("Reference sources"));
    }
}
