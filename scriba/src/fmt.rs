//! Compact event formatter for operator-facing log output

use owo_colors::OwoColorize as _;
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Renders events as `Info: message` with a colored level prefix, matching
/// the rest of the CLI output.
pub struct LevelFormatter;

impl<S, N> FormatEvent<S, N> for LevelFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let prefix = match *event.metadata().level() {
            Level::ERROR => "Error:".red().bold().to_string(),
            Level::WARN => "Warning:".yellow().bold().to_string(),
            Level::INFO => "Info:".blue().bold().to_string(),
            Level::DEBUG => "Debug:".dimmed().to_string(),
            Level::TRACE => "Trace:".dimmed().to_string(),
        };
        write!(writer, "{} ", prefix)?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
