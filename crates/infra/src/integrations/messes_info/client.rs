/// messes.info fetchers for the JSON-RPC endpoint and the schedule page
use async_trait::async_trait;
use messesinfo_core::{FetchGranularity, FetchRequest, MassFetcher, RawPayload};
use messesinfo_domain::constants::{RPC_CONTENT_TYPE, RPC_PATH};
use messesinfo_domain::{MessesError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use tracing::{debug, instrument};

use super::query::ChurchQuery;
use super::rpc::RpcEnvelope;
use crate::errors::InfraError;
use crate::http::HttpClient;

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Posts one search per day to `/gwtRequest`.
pub struct RpcFetcher {
    http_client: HttpClient,
    query: ChurchQuery,
    api_key: String,
    page_size: u32,
    endpoint: String,
}

impl RpcFetcher {
    pub fn new(http_client: HttpClient, base_url: &str, query: ChurchQuery, api_key: String, page_size: u32) -> Self {
        Self { http_client, query, api_key, page_size, endpoint: join_url(base_url, RPC_PATH) }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MassFetcher for RpcFetcher {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self, request: &FetchRequest) -> Result<RawPayload> {
        let FetchRequest::Day(day) = request else {
            return Err(MessesError::InvalidInput(format!(
                "the rpc endpoint is queried one day at a time, got {request}"
            )));
        };

        let envelope = RpcEnvelope::new(&self.api_key, self.query.rpc_query(*day), self.page_size);
        let builder = self
            .http_client
            .request(Method::POST, &self.endpoint)
            .header(CONTENT_TYPE, RPC_CONTENT_TYPE)
            .json(&envelope);

        let response = self.http_client.send(builder).await?;
        let body: serde_json::Value =
            response.json().await.map_err(|err| MessesError::from(InfraError::from(err)))?;
        debug!(day = %day, "rpc response received");
        Ok(RawPayload::Json(body))
    }

    fn granularity(&self) -> FetchGranularity {
        FetchGranularity::PerDay
    }
}

/// Downloads the multi-day `/horaires/<church> <postal code>` page.
pub struct HtmlFetcher {
    http_client: HttpClient,
    url: String,
}

impl HtmlFetcher {
    pub fn new(http_client: HttpClient, base_url: &str, query: &ChurchQuery) -> Self {
        Self { http_client, url: join_url(base_url, &query.horaires_path()) }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl MassFetcher for HtmlFetcher {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self, request: &FetchRequest) -> Result<RawPayload> {
        let response = self.http_client.send(self.http_client.request(Method::GET, &self.url)).await?;
        let body = response.text().await.map_err(|err| MessesError::from(InfraError::from(err)))?;
        debug!(request = %request, bytes = body.len(), "schedule page received");
        Ok(RawPayload::Html(body))
    }

    fn granularity(&self) -> FetchGranularity {
        FetchGranularity::Listing
    }
}
