//! # Provider Parsers
//!
//! One pure function per provider, turning the raw bytes of its published feed into a
//! [`RangeSet`]. Each provider uses its own ad-hoc format:
//!
//! * **amazon**: JSON, objects with typed keys (`prefixes[].ip_prefix`, `ipv6_prefixes[].ipv6_prefix`).
//! * **github**: JSON, a single array of strings (`web`), all treated as IPv4.
//! * **google**: text, one entry per line, `include:` directive lines skipped.
//! * **openai**: text, one entry per line, IPv6 lines dropped entirely.
//! * **cloudflare**: JSON, prefixes nested in an envelope (`result.ipv4_cidrs`).
//!
//! Structural failures (broken JSON, non UTF-8 text) are [`Error::Parse`]. Missing
//! optional fields never fail a parse, they just yield an empty family.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

use ip2provider_common::ranges::{RangeSet, null_as_empty};
use ip2provider_common::{Error, Result};

use crate::provider::Provider;

pub type Parser = fn(&[u8]) -> Result<RangeSet>;

/// Looks up the parser registered for `provider` and runs it.
pub fn parse(provider: &str, data: &[u8]) -> Result<RangeSet> {
    let parser = parser_for(provider)?;
    parser(data)
}

pub fn parser_for(provider: &str) -> Result<Parser> {
    let known = Provider::from_str(provider)?;
    known.parser().ok_or_else(|| {
        Error::Configuration(format!("provider '{known}' has no feed parser"))
    })
}

#[derive(Deserialize)]
struct AmazonFeed {
    #[serde(default, deserialize_with = "null_as_empty")]
    prefixes: Vec<AmazonPrefix>,
    #[serde(default, deserialize_with = "null_as_empty")]
    ipv6_prefixes: Vec<AmazonIpv6Prefix>,
}

#[derive(Deserialize)]
struct AmazonPrefix {
    ip_prefix: Option<String>,
}

#[derive(Deserialize)]
struct AmazonIpv6Prefix {
    ipv6_prefix: Option<String>,
}

pub fn amazon(data: &[u8]) -> Result<RangeSet> {
    let feed: AmazonFeed = serde_json::from_slice(data)
        .map_err(|e| Error::Parse(format!("amazon feed: {e}")))?;

    let ipv4 = feed.prefixes.into_iter().filter_map(|p| p.ip_prefix).collect();
    let ipv6 = feed
        .ipv6_prefixes
        .into_iter()
        .filter_map(|p| p.ipv6_prefix)
        .collect();

    Ok(RangeSet::new(ipv4, ipv6))
}

#[derive(Deserialize)]
struct GitHubMeta {
    #[serde(default, deserialize_with = "null_as_empty")]
    web: Vec<Value>,
}

pub fn github(data: &[u8]) -> Result<RangeSet> {
    let meta: GitHubMeta = serde_json::from_slice(data)
        .map_err(|e| Error::Parse(format!("github feed: {e}")))?;

    Ok(RangeSet::new(strings_only(&meta.web), Vec::new()))
}

pub fn google(data: &[u8]) -> Result<RangeSet> {
    let mut ranges = RangeSet::default();

    for line in lines(data, "google")? {
        if line.contains("include:") {
            continue;
        }
        let Some(entry) = line.split_whitespace().next() else {
            continue;
        };
        if entry.contains(':') {
            ranges.ipv6.push(entry.to_string());
        } else {
            ranges.ipv4.push(entry.to_string());
        }
    }

    Ok(ranges)
}

pub fn openai(data: &[u8]) -> Result<RangeSet> {
    let ipv4 = lines(data, "openai")?
        .filter(|line| !line.contains(':') && !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    Ok(RangeSet::new(ipv4, Vec::new()))
}

pub fn cloudflare(data: &[u8]) -> Result<RangeSet> {
    let document: Value = serde_json::from_slice(data)
        .map_err(|e| Error::Parse(format!("cloudflare feed: {e}")))?;
    if !document.is_object() {
        return Err(Error::Parse(format!(
            "cloudflare feed: expected a JSON object, found {document}"
        )));
    }

    let result = document.get("result");
    Ok(RangeSet::new(
        nested_strings(result, "ipv4_cidrs"),
        nested_strings(result, "ipv6_cidrs"),
    ))
}

/// Unwraps `envelope[field]` as an array of strings. Anything absent or of the wrong
/// type along the way yields an empty list.
fn nested_strings(envelope: Option<&Value>, field: &str) -> Vec<String> {
    envelope
        .and_then(|value| value.get(field))
        .and_then(Value::as_array)
        .map(|items| strings_only(items))
        .unwrap_or_default()
}

fn strings_only(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

fn lines<'a>(data: &'a [u8], feed: &str) -> Result<impl Iterator<Item = &'a str>> {
    let text = std::str::from_utf8(data)
        .map_err(|e| Error::Parse(format!("{feed} feed is not valid UTF-8: {e}")))?;
    Ok(text.lines().map(|line| line.trim_end_matches('\r')))
}
