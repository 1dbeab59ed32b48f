use colored::*;
use indicatif::ProgressStyle;
use ip2provider_common::SUCCESS_TARGET;
use ip2provider_common::config::Config;
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_indicatif::filter::IndicatifFilter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

pub const PRINT_TARGET: &str = "ip2provider::print";

pub struct Ip2ProviderFormatter;

impl<S, N> FormatEvent<S, N> for Ip2ProviderFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() != PRINT_TARGET {
            let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) =
                if meta.target() == SUCCESS_TARGET {
                    ("[+]", |s| s.green().bold())
                } else {
                    match *meta.level() {
                        Level::TRACE => ("[ ]", |s| s.dimmed()),
                        Level::DEBUG => ("[?]", |s| s.blue()),
                        Level::INFO => ("[*]", |s| s.cyan().bold()),
                        Level::WARN => ("[!]", |s| s.yellow().bold()),
                        Level::ERROR => ("[-]", |s| s.red().bold()),
                    }
                };
            write!(writer, "{} ", color_func(symbol.into()))?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {span_name} {wide_msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Installs the global subscriber. Spans opened with `indicatif.pb_show` get a spinner.
pub fn init_logging(cfg: &Config) {
    let level = if cfg.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,ip2provider={level}")));

    let indicatif_layer = IndicatifLayer::new().with_progress_style(spinner_style());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .event_format(Ip2ProviderFormatter)
        .with_writer(indicatif_layer.get_stdout_writer());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(indicatif_layer.with_filter(IndicatifFilter::new(false)))
        .init();
}
