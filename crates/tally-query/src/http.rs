//! Status handling for media server responses.
//!
//! GraphQL servers often reject a query with a 4xx status and still describe
//! the problem in an `errors` array. Those bodies become
//! [`QueryError::GraphQl`] so the rendered error shows the server's own
//! messages; any other non-success body is kept as text in [`QueryError::Api`].

use reqwest::StatusCode;

use crate::error::QueryError;
use crate::graphql::GraphQlResponse;

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;
const MAX_BODY_CHARS: usize = 512;

/// Pass a successful response through, or turn its status into a [`QueryError`].
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, QueryError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(QueryError::RateLimited {
            retry_after_secs: retry_after_secs(resp.headers()),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    if let Some(messages) = graphql_messages(&body) {
        tracing::error!(status = status.as_u16(), ?messages, "GraphQL request rejected");
        return Err(QueryError::GraphQl { messages });
    }
    Err(QueryError::Api {
        status: status.as_u16(),
        message: excerpt(&body),
    })
}

fn retry_after_secs(headers: &reqwest::header::HeaderMap) -> u64 {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

/// Messages from a GraphQL error envelope, if `body` is one.
fn graphql_messages(body: &str) -> Option<Vec<String>> {
    let envelope: GraphQlResponse = serde_json::from_str(body).ok()?;
    let messages: Vec<String> = envelope
        .errors?
        .into_iter()
        .map(|entry| entry.message)
        .collect();
    (!messages.is_empty()).then_some(messages)
}

fn excerpt(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}
