//! # Membership Matcher
//!
//! Decides whether an address falls inside any block of a [`RangeSet`].
//!
//! Only the list of the query's own address family is scanned, in insertion order,
//! stopping at the first containing block. Entries that cannot be read as a CIDR
//! block (or a bare address, taken as a single-host block) are skipped: provider
//! feeds occasionally carry placeholders, and one bad line must not hide the rest.

use std::net::IpAddr;
use std::str::FromStr;

use ipnetwork::IpNetwork;
use tracing::debug;

use ip2provider_common::ranges::RangeSet;
use ip2provider_common::{Error, Result};

/// IPv4-mapped IPv6 queries (`::ffff:a.b.c.d`) are matched as the IPv4 address they carry.
pub fn contains(query: IpAddr, ranges: &RangeSet) -> bool {
    let query = query.to_canonical();
    let entries: &[String] = match query {
        IpAddr::V4(_) => &ranges.ipv4,
        IpAddr::V6(_) => &ranges.ipv6,
    };

    entries.iter().any(|entry| match parse_block(entry) {
        Ok(block) => block.contains(query),
        Err(e) => {
            debug!("skipping entry: {e}");
            false
        }
    })
}

/// Reads one range entry as a network block.
///
/// A bare address is accepted as a single-host block (`/32` or `/128`). Feeds such as
/// Google's list plain addresses next to prefixes, and those are matched rather than
/// skipped as a strict CIDR reader would do.
pub fn parse_block(entry: &str) -> Result<IpNetwork> {
    IpNetwork::from_str(entry.trim()).map_err(|_| Error::MalformedEntry(entry.to_string()))
}
