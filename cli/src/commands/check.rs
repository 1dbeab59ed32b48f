use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use colored::*;

use crate::mprint;
use crate::terminal::{colors, format, print};
use ip2provider_common::config::Config;
use ip2provider_core::classify::{Classifier, Verdict};
use ip2provider_core::provider::ProviderTable;
use ip2provider_core::store::{FileStorage, RangeStore};

pub fn check_ip(query: &str, providers: &ProviderTable, cfg: &Config) -> anyhow::Result<()> {
    let store = RangeStore::new(FileStorage::new(&cfg.data_dir));
    let classifier = Classifier::new(providers, &store);

    let query = query.trim();
    print_verdict(query, classifier.classify_str(query));
    Ok(())
}

pub fn check_file(path: &Path, providers: &ProviderTable, cfg: &Config) -> anyhow::Result<()> {
    let lines: Vec<String> = read_lines(path)?;

    let store = RangeStore::new(FileStorage::new(&cfg.data_dir));
    let classifier = Classifier::new(providers, &store);
    let verdicts: Vec<Verdict> = classifier.classify_batch(&lines);

    for verdict in &verdicts {
        print_verdict(&verdict.query, verdict.provider.as_deref());
    }

    if cfg.quiet == 0 {
        let matched: usize = verdicts.iter().filter(|v| v.provider.is_some()).count();
        mprint!();
        print::set_key_width(9);
        print::aligned_line("Checked", verdicts.len().to_string());
        print::aligned_line("Matched", matched.to_string().green().bold());
        print::aligned_line("Unmatched", (verdicts.len() - matched).to_string());
    }
    Ok(())
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    if path == Path::new("-") {
        return io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<String>>>()
            .context("reading addresses from stdin");
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    BufReader::new(file)
        .lines()
        .collect::<io::Result<Vec<String>>>()
        .with_context(|| format!("reading {}", path.display()))
}

fn print_verdict(query: &str, provider: Option<&str>) {
    match provider {
        Some(name) => print::print(&format!(
            "{} {} {}",
            format::address(query, 20),
            "is in the range of".color(colors::TEXT_DEFAULT),
            format::provider_label(name, 0)
        )),
        None => print::print(&format!(
            "{} {}",
            format::address(query, 20),
            "is not in the range of any provider".color(colors::SEPARATOR)
        )),
    }
}
