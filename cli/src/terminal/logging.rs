use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// Right-aligned level label, with the emitting module shown for
/// warnings and errors so a downgraded failure can be traced to its
/// component straight from the console.
pub struct SweepFormatter;

impl<S, N> FormatEvent<S, N> for SweepFormatter
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
        let level = *meta.level();

        let label: ColoredString = match level {
            Level::TRACE => "trace".dimmed(),
            Level::DEBUG => "debug".cyan(),
            Level::INFO => " info".green(),
            Level::WARN => " warn".yellow().bold(),
            Level::ERROR => "error".red().bold(),
        };

        write!(writer, "{label} ")?;

        if level <= Level::WARN {
            write!(writer, "{} ", format!("({})", meta.target()).dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Installs the subscriber. `RUST_LOG` overrides the default `info`
/// level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(SweepFormatter)
        .init();
}
