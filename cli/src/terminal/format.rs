use std::str::FromStr;

use colored::*;
use ip2provider_core::provider::Provider;
use ip2provider_core::store::StoredStatus;

use crate::terminal::colors;

pub fn display_name(name: &str) -> String {
    match Provider::from_str(name) {
        Ok(Provider::Amazon) => "Amazon".to_string(),
        Ok(Provider::Cloudflare) => "Cloudflare".to_string(),
        Ok(Provider::GitHub) => "GitHub".to_string(),
        Ok(Provider::Google) => "Google".to_string(),
        Ok(Provider::OpenAi) => "OpenAI".to_string(),
        Ok(Provider::Microsoft) => "Microsoft".to_string(),
        Err(_) => capitalize_first(name),
    }
}

/// Provider name in its brand color, padded to `width` columns.
pub fn provider_label(name: &str, width: usize) -> ColoredString {
    let label = format!("{:<width$}", display_name(name));
    match Provider::from_str(name) {
        Ok(Provider::Microsoft) => label.blue().bold(),
        Ok(Provider::GitHub) => label.black().on_white().bold(),
        Ok(Provider::Amazon) => label.yellow().bold(),
        Ok(Provider::Cloudflare) => label.bright_red().on_yellow().bold(),
        Ok(Provider::Google) => label.red().bold(),
        Ok(Provider::OpenAi) => label.cyan().bold(),
        Err(_) => label.white(),
    }
}

pub fn address(query: &str, width: usize) -> ColoredString {
    let padded = format!("{query:<width$}");
    if query.contains(':') {
        padded.color(colors::IPV6_ADDR)
    } else {
        padded.color(colors::IPV4_ADDR)
    }
}

pub fn stored_status(status: &StoredStatus) -> ColoredString {
    match status {
        StoredStatus::Present { ipv4, ipv6 } => {
            format!("{ipv4} IPv4, {ipv6} IPv6").color(colors::TEXT_DEFAULT)
        }
        StoredStatus::Missing => "missing (run update)".yellow(),
        StoredStatus::Corrupt(reason) => format!("corrupt ({reason})").red(),
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
