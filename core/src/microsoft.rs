//! # Microsoft Service Tags
//!
//! Microsoft does not publish a stable feed URL. Each cloud region has a download
//! confirmation page that links to a dated `ServiceTags_*.json` file, so acquisition is
//! a small job of its own:
//!
//! 1. fetch the confirmation page of every region,
//! 2. scrape the service tag download link from it,
//! 3. fetch every linked document,
//! 4. reduce the combined (noisy) lines to a sorted, de-duplicated [`RangeSet`].

use std::collections::BTreeSet;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

use ipnetwork::Ipv6Network;
use regex::Regex;
use tracing::debug;

use ip2provider_common::ranges::RangeSet;
use ip2provider_common::{Error, Result};

use crate::refresh::Fetcher;

pub const CONFIRMATION_URL: &str = "https://www.microsoft.com/en-us/download/confirmation.aspx";

/// Download ids of the published service tag files, one per cloud.
pub const DOWNLOAD_IDS: [(&str, &str); 4] = [
    ("56519", "public cloud"),
    ("57063", "US government"),
    ("57064", "Germany"),
    ("57062", "China"),
];

static LINK_RE: OnceLock<Regex> = OnceLock::new();
static IPV4_PREFIX_RE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    LINK_RE.get_or_init(|| {
        Regex::new(r#"href\s*=\s*["']([^"']*ServiceTags_[^"']*)["']"#)
            .expect("invalid service tag link pattern")
    })
}

fn ipv4_prefix_re() -> &'static Regex {
    IPV4_PREFIX_RE.get_or_init(|| {
        Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}/\d{1,2}\b").expect("invalid IPv4 prefix pattern")
    })
}

pub async fn acquire<F>(fetcher: &F, confirmation_url: &str) -> Result<RangeSet>
where
    F: Fetcher + ?Sized,
{
    let mut combined = String::new();

    for (id, cloud) in DOWNLOAD_IDS {
        let page = fetcher.fetch(&format!("{confirmation_url}?id={id}")).await?;
        let link = find_download_link(&String::from_utf8_lossy(&page)).ok_or_else(|| {
            Error::Parse(format!("no service tag download link for the {cloud} (id {id})"))
        })?;

        debug!("downloading {cloud} service tags from {link}");
        let document = fetcher.fetch(&link).await?;
        combined.push_str(&String::from_utf8_lossy(&document));
        combined.push('\n');
    }

    Ok(normalize(&combined))
}

/// First `href` on the page pointing at a `ServiceTags_` file.
pub fn find_download_link(html: &str) -> Option<String> {
    link_re()
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|link| link.as_str().replace("&amp;", "&"))
}

/// Reduces service tag text to the prefixes it mentions.
///
/// Lines are trimmed and stripped of JSON quoting. A line that is a bare IPv4 address
/// is kept as is, otherwise every IPv4 prefix embedded in it is extracted. IPv6
/// prefixes are kept when they parse. Both families come out sorted and de-duplicated.
pub fn normalize(raw: &str) -> RangeSet {
    let mut ipv4: BTreeSet<String> = BTreeSet::new();
    let mut ipv6: BTreeSet<String> = BTreeSet::new();

    for line in raw.lines() {
        let token = strip_quotes(line);
        if token.is_empty() {
            continue;
        }

        if token.parse::<Ipv4Addr>().is_ok() {
            ipv4.insert(token.to_string());
        } else if token.contains(':') && token.contains('/') {
            if token.parse::<Ipv6Network>().is_ok() {
                ipv6.insert(token.to_string());
            }
        } else {
            ipv4.extend(
                ipv4_prefix_re()
                    .find_iter(token)
                    .map(|found| found.as_str().to_string()),
            );
        }
    }

    RangeSet::new(ipv4.into_iter().collect(), ipv6.into_iter().collect())
}

fn strip_quotes(line: &str) -> &str {
    let line = line.trim();
    let line = line.trim_matches('"');
    let line = line.strip_suffix("\",").unwrap_or(line);
    line.trim()
}
