//! # Provider Table
//!
//! The providers are a fixed, ordered, immutable table built once at startup.
//! Table order is classification precedence: when published ranges overlap,
//! the provider declared first wins.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use ip2provider_common::{Error, Result};

use crate::parsers::{self, Parser};

/// The providers known out of the box, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Amazon,
    Cloudflare,
    GitHub,
    Google,
    OpenAi,
    Microsoft,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Amazon,
        Provider::Cloudflare,
        Provider::GitHub,
        Provider::Google,
        Provider::OpenAi,
        Provider::Microsoft,
    ];

    /// Storage key and lookup name.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Amazon => "amazon",
            Provider::Cloudflare => "cloudflare",
            Provider::GitHub => "github",
            Provider::Google => "google",
            Provider::OpenAi => "openai",
            Provider::Microsoft => "microsoft",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Provider::Amazon => "https://ip-ranges.amazonaws.com/ip-ranges.json",
            Provider::Cloudflare => "https://api.cloudflare.com/client/v4/ips",
            Provider::GitHub => "https://api.github.com/meta",
            Provider::Google => "https://www.gstatic.com/ipranges/goog.txt",
            Provider::OpenAi => "https://openai.com/gptbot-ranges.txt",
            Provider::Microsoft => crate::microsoft::CONFIRMATION_URL,
        }
    }

    /// Microsoft is acquired by a separate scraping job and has no feed parser.
    pub fn parser(&self) -> Option<Parser> {
        match self {
            Provider::Amazon => Some(parsers::amazon),
            Provider::Cloudflare => Some(parsers::cloudflare),
            Provider::GitHub => Some(parsers::github),
            Provider::Google => Some(parsers::google),
            Provider::OpenAi => Some(parsers::openai),
            Provider::Microsoft => None,
        }
    }

    pub fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: self.name().to_string(),
            url: self.url().to_string(),
            parser: self.parser(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Provider::ALL
            .into_iter()
            .find(|provider| provider.name() == lower)
            .ok_or_else(|| Error::Configuration(format!("unknown provider '{s}'")))
    }
}

/// Static configuration of one provider.
#[derive(Clone)]
pub struct ProviderDescriptor {
    pub name: String,
    pub url: String,
    pub parser: Option<Parser>,
}

impl ProviderDescriptor {
    pub fn new(name: impl Into<String>, url: impl Into<String>, parser: Option<Parser>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            parser,
        }
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("has_parser", &self.parser.is_some())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ProviderTable {
    providers: Vec<ProviderDescriptor>,
}

impl ProviderTable {
    /// Builds a table, keeping the given order. Names must be unique.
    pub fn new(providers: Vec<ProviderDescriptor>) -> Result<Self> {
        let mut seen: HashSet<&str> = HashSet::new();
        for descriptor in &providers {
            if !seen.insert(descriptor.name.as_str()) {
                return Err(Error::Configuration(format!(
                    "provider '{}' is declared twice",
                    descriptor.name
                )));
            }
        }
        Ok(Self { providers })
    }

    pub fn builtin() -> Self {
        Self {
            providers: Provider::ALL.iter().map(Provider::descriptor).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&ProviderDescriptor> {
        self.providers
            .iter()
            .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| Error::Configuration(format!("unknown provider '{name}'")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|descriptor| descriptor.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
