//! # ip2provider core
//!
//! Normalization and membership-query engine.
//!
//! Raw feed bytes flow through a [`parsers`] function into a
//! [`RangeSet`](ip2provider_common::ranges::RangeSet), are persisted by the [`store`],
//! and are later consulted by the [`classify`] orchestrator, which applies the
//! [`matcher`] to each provider in [`provider`] table order.
//!
//! Feed acquisition lives in [`refresh`] (and [`microsoft`] for the one provider
//! that has to be scraped instead of downloaded).

pub mod classify;
pub mod matcher;
pub mod microsoft;
pub mod parsers;
pub mod provider;
pub mod refresh;
pub mod store;
