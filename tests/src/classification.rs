#![cfg(test)]
use ip2provider_common::ranges::RangeSet;
use ip2provider_core::classify::Classifier;
use ip2provider_core::matcher;
use ip2provider_core::parsers;
use ip2provider_core::provider::{Provider, ProviderDescriptor, ProviderTable};
use ip2provider_core::store::{MemoryStorage, RangeStore};
use std::net::IpAddr;

fn ip(s: &str) -> IpAddr {
    s.parse().unwrap()
}

fn table(providers: &[Provider]) -> ProviderTable {
    ProviderTable::new(providers.iter().map(Provider::descriptor).collect()).unwrap()
}

/// A prefix-list feed parses into the canonical model and matches right away.
#[test]
fn prefix_list_feed_matches_its_own_prefix() {
    let payload = br#"{"prefixes":[{"ip_prefix":"203.0.113.0/24"}],"ipv6_prefixes":[]}"#;
    let ranges = parsers::parse("amazon", payload).unwrap();

    assert_eq!(ranges.ipv4, vec!["203.0.113.0/24"]);
    assert!(ranges.ipv6.is_empty());
    assert!(matcher::contains(ip("203.0.113.5"), &ranges));
}

#[test]
fn directive_text_feed_splits_families() {
    let payload = b"8.8.8.8\ninclude:_spf.foo.com\n2001:4860:4860::8888";
    let ranges = parsers::parse("google", payload).unwrap();

    assert_eq!(ranges.ipv4, vec!["8.8.8.8"]);
    assert_eq!(ranges.ipv6, vec!["2001:4860:4860::8888"]);
    assert!(matcher::contains(ip("2001:4860:4860::8888"), &ranges));
}

#[test]
fn distinct_ranges_classify_to_their_owner() {
    let providers = table(&[Provider::Cloudflare, Provider::GitHub, Provider::Amazon]);
    let store = RangeStore::new(MemoryStorage::new());
    store
        .save("cloudflare", &RangeSet::new(vec!["173.245.48.0/20".into()], Vec::new()))
        .unwrap();
    store
        .save("github", &RangeSet::new(vec!["192.30.252.0/22".into()], Vec::new()))
        .unwrap();
    store
        .save("amazon", &RangeSet::new(vec!["3.5.140.0/22".into()], Vec::new()))
        .unwrap();

    let classifier = Classifier::new(&providers, &store);
    assert_eq!(classifier.classify(ip("192.30.253.1")), Some("github"));
    assert_eq!(classifier.classify(ip("3.5.141.9")), Some("amazon"));
    assert_eq!(classifier.classify(ip("::ffff:192.30.253.1")), Some("github"));
    assert_eq!(classifier.classify(ip("198.51.100.1")), None);
}

#[test]
fn overlapping_ranges_resolve_by_declaration_order() {
    let providers = ProviderTable::new(vec![
        ProviderDescriptor::new("A", "http://a", None),
        ProviderDescriptor::new("B", "http://b", None),
    ])
    .unwrap();
    let store = RangeStore::new(MemoryStorage::new());
    store
        .save("B", &RangeSet::new(vec!["10.0.0.0/8".into()], Vec::new()))
        .unwrap();
    store
        .save("A", &RangeSet::new(vec!["10.20.0.0/16".into()], Vec::new()))
        .unwrap();

    let classifier = Classifier::new(&providers, &store);
    for _ in 0..3 {
        assert_eq!(classifier.classify(ip("10.20.30.40")), Some("A"));
    }
    assert_eq!(classifier.classify(ip("10.99.0.1")), Some("B"));
}

#[test]
fn malformed_entry_does_not_hide_later_entries() {
    let payload = br#"{"web":["n/a","192.30.252.0/22"]}"#;
    let ranges = parsers::parse("github", payload).unwrap();
    assert!(matcher::contains(ip("192.30.252.200"), &ranges));
}

#[test]
fn nested_feed_without_ipv6_yields_empty_family() {
    let ranges = parsers::parse("cloudflare", br#"{"result":{"ipv4_cidrs":["104.16.0.0/13"]}}"#).unwrap();
    assert_eq!(ranges.ipv4, vec!["104.16.0.0/13"]);
    assert!(ranges.ipv6.is_empty());
    assert!(!matcher::contains(ip("2606:4700::1"), &ranges));
}

#[test]
fn batch_over_builtin_table() {
    let providers = ProviderTable::builtin();
    let store = RangeStore::new(MemoryStorage::new());
    store
        .save("openai", &parsers::openai(b"20.15.240.64/28\n").unwrap())
        .unwrap();
    store
        .save("google", &parsers::google(b"8.8.4.0/24\n2001:4860::/32\n").unwrap())
        .unwrap();

    let classifier = Classifier::new(&providers, &store);
    let verdicts = classifier.classify_batch("8.8.4.4\n20.15.240.70\nbogus\n2001:4860::1\n".lines());

    let providers: Vec<Option<&str>> = verdicts.iter().map(|v| v.provider.as_deref()).collect();
    assert_eq!(providers, vec![Some("google"), Some("openai"), None, Some("google")]);
    assert_eq!(verdicts[2].query, "bogus");
}
