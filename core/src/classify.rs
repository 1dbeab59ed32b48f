//! # Query Orchestrator
//!
//! Classifies an address as belonging to the first provider, in table order, whose
//! stored ranges contain it. Missing or corrupt data for a provider only means that
//! provider cannot match; it never fails the query.

use std::net::IpAddr;

use tracing::debug;

use ip2provider_common::ranges::RangeSet;
use ip2provider_common::warn;

use crate::matcher;
use crate::provider::ProviderTable;
use crate::store::{RangeStore, Storage};

/// Result of classifying one line of batch input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub query: String,
    /// `None` when no provider claims the address, or the query is not an address.
    pub provider: Option<String>,
}

pub struct Classifier<'a, S> {
    providers: &'a ProviderTable,
    store: &'a RangeStore<S>,
}

impl<'a, S: Storage> Classifier<'a, S> {
    pub fn new(providers: &'a ProviderTable, store: &'a RangeStore<S>) -> Self {
        Self { providers, store }
    }

    pub fn classify(&self, query: IpAddr) -> Option<&'a str> {
        for descriptor in self.providers.iter() {
            let Some(ranges) = self.load(&descriptor.name) else {
                continue;
            };
            if matcher::contains(query, &ranges) {
                return Some(descriptor.name.as_str());
            }
        }
        None
    }

    /// Like [`classify`](Self::classify) for user supplied text. Text that is not an
    /// address is reported and treated as matching nothing.
    pub fn classify_str(&self, query: &str) -> Option<&'a str> {
        parse_query(query).and_then(|ip| self.classify(ip))
    }

    /// Classifies every non-blank line independently, preserving input order.
    ///
    /// Stored ranges are loaded once for the whole batch.
    pub fn classify_batch<I, T>(&self, queries: I) -> Vec<Verdict>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let snapshot = self.snapshot();
        queries
            .into_iter()
            .filter_map(|line| {
                let query = line.as_ref().trim();
                if query.is_empty() {
                    return None;
                }
                let provider = parse_query(query)
                    .and_then(|ip| snapshot.classify(ip))
                    .map(str::to_string);
                Some(Verdict {
                    query: query.to_string(),
                    provider,
                })
            })
            .collect()
    }

    /// Loads every provider's ranges, in table order.
    pub fn snapshot(&self) -> Snapshot<'a> {
        let entries = self
            .providers
            .iter()
            .filter_map(|descriptor| {
                self.load(&descriptor.name)
                    .map(|ranges| (descriptor.name.as_str(), ranges))
            })
            .collect();
        Snapshot { entries }
    }

    fn load(&self, provider: &str) -> Option<RangeSet> {
        match self.store.load(provider) {
            Ok(ranges) => Some(ranges),
            Err(e) if e.is_missing_data() => {
                debug!("{provider} contributes no matches: {e}");
                None
            }
            Err(e) => {
                warn!("could not load ranges for {provider}: {e}");
                None
            }
        }
    }
}

/// Provider ranges loaded at one point in time, still in precedence order.
pub struct Snapshot<'a> {
    entries: Vec<(&'a str, RangeSet)>,
}

impl<'a> Snapshot<'a> {
    pub fn classify(&self, query: IpAddr) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(_, ranges)| matcher::contains(query, ranges))
            .map(|(name, _)| *name)
    }

    pub fn providers(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }
}

fn parse_query(query: &str) -> Option<IpAddr> {
    match query.trim().parse::<IpAddr>() {
        Ok(ip) => Some(ip),
        Err(_) => {
            warn!("'{}' is not a valid IP address", query.trim());
            None
        }
    }
}
