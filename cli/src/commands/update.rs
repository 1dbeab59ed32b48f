use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use tracing::{Instrument, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::{colors, format, print};
use ip2provider_common::config::Config;
use ip2provider_common::{error, success, warn};
use ip2provider_core::provider::ProviderTable;
use ip2provider_core::refresh::{self, HttpFetcher, RefreshOutcome};
use ip2provider_core::store::{FileStorage, RangeStore};

pub async fn update(
    names: &[String],
    all: bool,
    providers: &ProviderTable,
    cfg: &Config,
) -> anyhow::Result<()> {
    let selected: ProviderTable = if all {
        providers.clone()
    } else if names.is_empty() {
        anyhow::bail!("name at least one provider to update, or pass --all");
    } else {
        select(providers, names)?
    };

    let fetcher = Arc::new(HttpFetcher::new(cfg.timeout)?);
    let store = Arc::new(RangeStore::new(FileStorage::new(&cfg.data_dir)));

    let span = info_span!("update", indicatif.pb_show = true);
    span.pb_set_message(&format!("refreshing {} providers...", selected.len()));

    let start_time: Instant = Instant::now();
    let outcomes: Vec<RefreshOutcome> = refresh::refresh_all(&selected, fetcher, store)
        .instrument(span)
        .await;

    report(&outcomes, start_time.elapsed(), cfg);
    ensure_any_updated(&outcomes)
}

/// Fails the command when not a single provider could be refreshed.
fn ensure_any_updated(outcomes: &[RefreshOutcome]) -> anyhow::Result<()> {
    if !outcomes.is_empty() && outcomes.iter().all(|outcome| outcome.result.is_err()) {
        anyhow::bail!("no provider could be updated");
    }
    Ok(())
}

/// Narrows the table to the requested providers, keeping table order.
fn select(providers: &ProviderTable, names: &[String]) -> ip2provider_common::Result<ProviderTable> {
    for name in names {
        providers.get(name)?;
    }

    ProviderTable::new(
        providers
            .iter()
            .filter(|descriptor| {
                names
                    .iter()
                    .any(|name| descriptor.name.eq_ignore_ascii_case(name.trim()))
            })
            .cloned()
            .collect(),
    )
}

fn report(outcomes: &[RefreshOutcome], total_time: Duration, cfg: &Config) {
    let mut failed: usize = 0;

    for outcome in outcomes {
        match &outcome.result {
            Ok(count) => {
                let label = format::provider_label(&outcome.provider, 12);
                success!("{label} IP ranges updated successfully ({count} ranges)");
            }
            Err(e) => {
                failed += 1;
                error!("update failed for {}: {e}", format::display_name(&outcome.provider));
            }
        }
    }

    if failed > 0 {
        warn!("{failed} of {} providers kept their previous ranges", outcomes.len());
    }

    if cfg.quiet == 0 {
        let updated: ColoredString = format!("{} providers", outcomes.len() - failed).bold().green();
        let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
        let output = format!("Update Complete: {updated} refreshed in {total_time}")
            .color(colors::TEXT_DEFAULT);
        print::fat_separator();
        print::centerln(&output.to_string());
    }
}
