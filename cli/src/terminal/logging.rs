use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use colored::*;
use indicatif::ProgressStyle;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;

use crate::terminal::print::{PRINT_TARGET, RAW_FIELD};

pub struct PcislotFormatter;

impl<S, N> FormatEvent<S, N> for PcislotFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut raw = RawMessage::default();
            event.record(&mut raw);
            return writeln!(writer, "{}", raw.0.unwrap_or_default());
        }

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match *meta.level() {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

#[derive(Default)]
struct RawMessage(Option<String>);

impl Visit for RawMessage {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == RAW_FIELD {
            self.0 = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == RAW_FIELD && self.0.is_none() {
            self.0 = Some(format!("{value:?}"));
        }
    }
}

fn env_filter() -> anyhow::Result<EnvFilter> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Report output must survive any RUST_LOG setting.
    Ok(filter.add_directive(format!("{PRINT_TARGET}=info").parse()?))
}

/// Installs the global subscriber. With `output` set everything is written
/// uncoloured to that file, otherwise to the terminal with spinner support.
pub fn init_logging(output: Option<&Path>) -> anyhow::Result<()> {
    let filter = env_filter()?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open output file {}", path.display()))?;
            colored::control::set_override(false);

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .event_format(PcislotFormatter)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e))?;
        }
        None => {
            let style = ProgressStyle::with_template("{spinner:.blue} {span_name} {wide_msg}")
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
                ]);
            let indicatif_layer = IndicatifLayer::new().with_progress_style(style);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(indicatif_layer.get_stdout_writer())
                        .event_format(PcislotFormatter),
                )
                .with(indicatif_layer)
                .try_init()?;
        }
    }

    Ok(())
}
