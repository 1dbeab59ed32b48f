//! # Feed Refresh
//!
//! Fetch, parse and persist provider feeds. Every provider's pipeline touches only its
//! own store key, so providers are refreshed concurrently. A failure at any step leaves
//! the previously stored ranges for that provider untouched.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use ip2provider_common::ranges::RangeSet;
use ip2provider_common::{Error, Result, info};

use crate::microsoft;
use crate::provider::{Provider, ProviderDescriptor, ProviderTable};
use crate::store::{RangeStore, Storage};

/// Supplies the raw bytes published at a source locator.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ip2provider/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::Transport(format!("{url}: {e}")))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("{url}: {e}")))?;
        Ok(body.to_vec())
    }
}

#[derive(Debug)]
pub struct RefreshOutcome {
    pub provider: String,
    /// Number of entries stored on success.
    pub result: Result<usize>,
}

/// Runs one provider's pipeline and stores the result.
pub async fn refresh_provider<F, S>(
    descriptor: &ProviderDescriptor,
    fetcher: &F,
    store: &RangeStore<S>,
) -> Result<usize>
where
    F: Fetcher + ?Sized,
    S: Storage,
{
    let ranges = acquire(descriptor, fetcher).await?;
    store.save(&descriptor.name, &ranges)?;
    info!(
        "{}: stored {} IPv4 and {} IPv6 ranges",
        descriptor.name,
        ranges.ipv4.len(),
        ranges.ipv6.len()
    );
    Ok(ranges.len())
}

/// Refreshes every provider in `providers` concurrently. Outcomes come back in table order.
pub async fn refresh_all<F, S>(
    providers: &ProviderTable,
    fetcher: Arc<F>,
    store: Arc<RangeStore<S>>,
) -> Vec<RefreshOutcome>
where
    F: Fetcher + 'static,
    S: Storage + 'static,
{
    let handles: Vec<_> = providers
        .iter()
        .cloned()
        .map(|descriptor| {
            let fetcher = Arc::clone(&fetcher);
            let store = Arc::clone(&store);
            let name = descriptor.name.clone();
            let handle = tokio::spawn(async move {
                refresh_provider(&descriptor, fetcher.as_ref(), store.as_ref()).await
            });
            (name, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (provider, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) => Err(Error::Transport(format!("refresh task aborted: {e}"))),
        };
        outcomes.push(RefreshOutcome { provider, result });
    }
    outcomes
}

async fn acquire<F>(descriptor: &ProviderDescriptor, fetcher: &F) -> Result<RangeSet>
where
    F: Fetcher + ?Sized,
{
    match descriptor.parser {
        Some(parser) => {
            debug!("fetching {} from {}", descriptor.name, descriptor.url);
            let bytes = fetcher.fetch(&descriptor.url).await?;
            parser(&bytes)
        }
        None if descriptor.name == Provider::Microsoft.name() => {
            microsoft::acquire(fetcher, &descriptor.url).await
        }
        None => Err(Error::Configuration(format!(
            "provider '{}' has no feed parser",
            descriptor.name
        ))),
    }
}
