#![cfg(test)]
use async_trait::async_trait;
use ip2provider_common::{Error, Result};
use ip2provider_core::classify::Classifier;
use ip2provider_core::microsoft;
use ip2provider_core::provider::{Provider, ProviderTable};
use ip2provider_core::refresh::{self, Fetcher};
use ip2provider_core::store::{FileStorage, RangeStore};
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;

/// Serves canned bodies for known URLs; everything else is unreachable.
struct CannedFetcher {
    bodies: HashMap<String, Vec<u8>>,
}

impl CannedFetcher {
    fn new() -> Self {
        Self {
            bodies: HashMap::new(),
        }
    }

    fn with(mut self, url: impl Into<String>, body: &str) -> Self {
        self.bodies.insert(url.into(), body.as_bytes().to_vec());
        self
    }
}

#[async_trait]
impl Fetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Transport(format!("{url}: unreachable")))
    }
}

fn microsoft_pages(fetcher: CannedFetcher) -> CannedFetcher {
    microsoft::DOWNLOAD_IDS
        .iter()
        .fold(fetcher, |fetcher, (id, _)| {
            let link = format!("https://download.example/ServiceTags_{id}.json");
            fetcher
                .with(
                    format!("{}?id={id}", microsoft::CONFIRMATION_URL),
                    &format!("<a href=\"{link}\">download</a>"),
                )
                .with(link, "\"addressPrefixes\": [\n\"13.64.0.0/16\",\n\"2603:1000::/40\"\n]")
        })
}

#[tokio::test]
async fn refresh_then_classify_from_disk() {
    let dir = TempDir::new().unwrap();
    let providers = ProviderTable::builtin();

    let fetcher = CannedFetcher::new()
        .with(
            Provider::Amazon.url(),
            r#"{"prefixes":[{"ip_prefix":"3.5.140.0/22"}],"ipv6_prefixes":[{"ipv6_prefix":"2600:1f00::/24"}]}"#,
        )
        .with(
            Provider::Cloudflare.url(),
            r#"{"result":{"ipv4_cidrs":["104.16.0.0/13"],"ipv6_cidrs":["2606:4700::/32"]}}"#,
        )
        .with(Provider::GitHub.url(), r#"{"web":["192.30.252.0/22"]}"#)
        .with(Provider::Google.url(), "8.8.4.0/24\ninclude:_netblocks.google.com\n")
        .with(Provider::OpenAi.url(), "20.15.240.64/28\n");
    let fetcher = Arc::new(microsoft_pages(fetcher));
    let store = Arc::new(RangeStore::new(FileStorage::new(dir.path())));

    let outcomes = refresh::refresh_all(&providers, fetcher, Arc::clone(&store)).await;
    for outcome in &outcomes {
        assert!(outcome.result.is_ok(), "{} failed: {:?}", outcome.provider, outcome.result);
    }
    assert!(dir.path().join("microsoft").join("ipranges.json").exists());

    let classifier = Classifier::new(&providers, store.as_ref());
    assert_eq!(classifier.classify_str("3.5.141.1"), Some("amazon"));
    assert_eq!(classifier.classify_str("2606:4700::6810:85e5"), Some("cloudflare"));
    assert_eq!(classifier.classify_str("192.30.252.9"), Some("github"));
    assert_eq!(classifier.classify_str("8.8.4.4"), Some("google"));
    assert_eq!(classifier.classify_str("20.15.240.65"), Some("openai"));
    assert_eq!(classifier.classify_str("13.64.1.1"), Some("microsoft"));
    assert_eq!(classifier.classify_str("2603:1000::1"), Some("microsoft"));
    assert_eq!(classifier.classify_str("1.1.1.1"), None);
}

#[tokio::test]
async fn failed_provider_keeps_previous_ranges_and_others_proceed() {
    let dir = TempDir::new().unwrap();
    let providers = ProviderTable::builtin();
    let store = Arc::new(RangeStore::new(FileStorage::new(dir.path())));

    let first = Arc::new(
        CannedFetcher::new()
            .with(Provider::GitHub.url(), r#"{"web":["192.30.252.0/22"]}"#)
            .with(Provider::OpenAi.url(), "20.15.240.64/28\n"),
    );
    refresh::refresh_all(&providers, first, Arc::clone(&store)).await;

    let second = Arc::new(
        CannedFetcher::new()
            .with(Provider::GitHub.url(), "{\"web\": [")
            .with(Provider::OpenAi.url(), "52.230.152.0/24\n"),
    );
    let outcomes = refresh::refresh_all(&providers, second, Arc::clone(&store)).await;

    let github = outcomes.iter().find(|o| o.provider == "github").unwrap();
    assert!(matches!(github.result, Err(Error::Parse(_))));

    let classifier = Classifier::new(&providers, store.as_ref());
    assert_eq!(classifier.classify_str("192.30.252.1"), Some("github"));
    assert_eq!(classifier.classify_str("52.230.152.9"), Some("openai"));
    assert_eq!(classifier.classify_str("20.15.240.65"), None);
}
