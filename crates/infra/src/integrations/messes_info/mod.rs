//! messes.info integration
//!
//! Two interchangeable sources:
//! - `rpc`: the JSON-RPC endpoint, one request per day
//! - `html`: the public schedule page, one multi-day listing

pub mod client;
pub mod html;
pub mod query;
pub mod rpc;

use std::sync::Arc;

use messesinfo_core::{MassFetcher, MassParser};
use messesinfo_domain::{Config, MessesError, Result, SourceKind};

pub use client::{HtmlFetcher, RpcFetcher};
pub use html::HtmlMassParser;
pub use query::ChurchQuery;
pub use rpc::{RpcEnvelope, RpcMassParser};

use crate::http::HttpClient;

/// Fetcher/parser pair for the configured source.
pub fn create_source(
    config: &Config,
    http_client: HttpClient,
) -> Result<(Arc<dyn MassFetcher>, Arc<dyn MassParser>)> {
    let query = ChurchQuery::from(&config.church);
    let scraper = &config.scraper;

    match scraper.source {
        SourceKind::Rpc => {
            let api_key = scraper
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| MessesError::Config("api key is required for the rpc source".into()))?;
            let fetcher = RpcFetcher::new(http_client, &scraper.base_url, query, api_key, scraper.page_size);
            Ok((Arc::new(fetcher), Arc::new(RpcMassParser)))
        }
        SourceKind::Html => {
            let fetcher = HtmlFetcher::new(http_client, &scraper.base_url, &query);
            Ok((Arc::new(fetcher), Arc::new(HtmlMassParser)))
        }
    }
}
