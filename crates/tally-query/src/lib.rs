//! # tally-query
//!
//! Media server GraphQL client and record acquisition for tally.
//!
//! [`MediaSource`] is the seam between the statistics pipeline and the
//! network: [`StashClient`] implements it over HTTP, tests implement it with
//! canned pages. [`fetch_all`] is the acquisition façade the mount coordinator
//! calls once per render cycle.

mod acquire;
mod error;
pub mod graphql;
mod http;

pub use acquire::{Acquisition, fetch_all};
pub use error::{FailureCategory, QueryError};
pub use graphql::{CriterionModifier, ItemPage, MarkCountFilter};

use std::future::Future;
use std::time::Duration;

use tally_config::ServerConfig;
use tally_core::ItemKind;

use crate::graphql::{GraphQlRequest, GraphQlResponse, document_for, extract_page};
use crate::http::check_response;

/// Anything that can answer "items of this kind matching this filter".
pub trait MediaSource {
    /// Fetch one kind's result page.
    fn find_items(
        &self,
        kind: ItemKind,
        filter: &MarkCountFilter,
    ) -> impl Future<Output = Result<ItemPage, QueryError>> + Send;
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for the media server's GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct StashClient {
    http: reqwest::Client,
    endpoint: String,
}

impl StashClient {
    /// Build a client from server settings.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Http`] if the underlying `reqwest::Client` fails
    /// to build (e.g. TLS backend initialization).
    pub fn new(config: &ServerConfig) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one GraphQL document and return its `data` object.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] if the request fails, the endpoint returns a
    /// non-success status, the body is not JSON, or the body carries
    /// GraphQL `errors`.
    pub async fn execute(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value, QueryError> {
        let request = GraphQlRequest { query, variables };
        let resp = check_response(self.http.post(&self.endpoint).json(&request).send().await?)
            .await?;
        let body: GraphQlResponse = resp
            .json()
            .await
            .map_err(|e| QueryError::Parse(e.to_string()))?;
        body.into_data()
    }
}

impl MediaSource for StashClient {
    async fn find_items(
        &self,
        kind: ItemKind,
        filter: &MarkCountFilter,
    ) -> Result<ItemPage, QueryError> {
        tracing::debug!(%kind, endpoint = %self.endpoint, "querying items with mark count filter");
        let data = self
            .execute(document_for(kind), filter.variables(kind))
            .await?;
        extract_page(kind, data)
    }
}
