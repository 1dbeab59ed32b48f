//! Shared building blocks for `ip2provider`.
//!
//! * [`ranges`]: the canonical `{ipv4, ipv6}` range model every provider feed is normalized into.
//! * [`error`]: the error taxonomy shared by the core and the CLI.
//! * [`config`]: runtime settings assembled from the command line.

pub mod config;
pub mod error;
pub mod ranges;

pub use error::{Error, Result};

#[doc(hidden)]
pub use tracing;

/// Target used by [`success!`] so formatters can tell a success apart from plain info.
pub const SUCCESS_TARGET: &str = "ip2provider::success";

#[macro_export]
macro_rules! success {
    ($($arg:tt)*) => {
        $crate::tracing::info!(target: "ip2provider::success", $($arg)*)
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::tracing::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::tracing::warn!($($arg)*)
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::tracing::error!($($arg)*)
    };
}
