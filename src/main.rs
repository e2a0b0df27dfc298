mod app;
mod demo;
mod help;
mod jumpto;
mod theme;
mod widget;
use crate::app::App;
use anyhow::Context;
use apptgrid::{local_offset, weekday_from_index, Calendar, DateInput, TimeBounds, ViewMode};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::{Path, PathBuf};
use time::{Date, OffsetDateTime, UtcOffset, Weekday};

/// Size at which a log file is rotated
const LOG_ROTATE_BYTES: u64 = 1 << 20;

/// Number of rotated log files to keep
const LOG_KEEP_FILES: usize = 5;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    view: ViewMode,
    week_start: Weekday,
    bounds: TimeBounds,
    log_dir: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            date: None,
            view: ViewMode::Week,
            week_start: Weekday::Sunday,
            bounds: TimeBounds::default(),
            log_dir: None,
        }
    }
}

impl Command {
    /// Parse the command line.  A date argument given as a date-time or a
    /// timestamp is converted to `offset` before its date is taken.
    fn from_parser(mut parser: Parser, offset: UtcOffset) -> Result<Command, lexopt::Error> {
        let mut opts = Options::default();
        let mut time_start = None;
        let mut time_end = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('v') | Arg::Long("view") => {
                    opts.view = parser.value()?.parse()?;
                }
                Arg::Short('s') | Arg::Long("week-start") => {
                    let index = parser.value()?.parse::<u8>()?;
                    opts.week_start =
                        weekday_from_index(index).map_err(|e| lexopt::Error::Custom(Box::new(e)))?;
                }
                Arg::Long("time-start") => time_start = Some(parser.value()?.string()?),
                Arg::Long("time-end") => time_end = Some(parser.value()?.string()?),
                Arg::Long("log-dir") => opts.log_dir = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match DateInput::from(value.as_str()).resolve(offset) {
                        Ok(dt) => opts.date = Some(dt.date()),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        if time_start.is_some() || time_end.is_some() {
            opts.bounds = TimeBounds::parse(
                time_start.as_deref().unwrap_or("0:00"),
                time_end.as_deref().unwrap_or("24:00"),
            )
            .map_err(|e| lexopt::Error::Custom(Box::new(e)))?;
        }
        Ok(Command::Run(opts))
    }

    fn run(self, offset: UtcOffset) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => {
                let today = OffsetDateTime::now_utc().to_offset(offset).date();
                let _logger = opts.log_dir.as_deref().map(init_logging).transpose()?;
                let calendar = Calendar::new(opts.date.unwrap_or(today))
                    .with_view(opts.view)
                    .with_week_start(opts.week_start)
                    .with_time_bounds(opts.bounds);
                log::info!(
                    "starting {} view of {} at UTC offset {offset} with time bounds {:?}",
                    opts.view,
                    calendar.date(),
                    opts.bounds
                );
                let app = App::new(calendar, today, offset, demo::agenda(today));
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    app.run(&mut terminal).context("terminal I/O failed")?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: apptgrid [OPTIONS] [DATE]");
                println!();
                println!("Day, week & month calendar of appointments in the terminal");
                println!();
                println!("Arguments:");
                println!("  [DATE]            Date to start at: YYYY-MM-DD, an ISO 8601 / RFC 3339");
                println!("                    date-time, or milliseconds since the Unix epoch");
                println!("                    [default: today]");
                println!();
                println!("Options:");
                println!("  -v, --view <day|week|month>");
                println!("                    Initial view [default: week]");
                println!("  -s, --week-start <0-6>");
                println!("                    First day of the week, 0 = Sunday [default: 0]");
                println!("  --time-start <H:MM>");
                println!("                    Earliest time shown in day & week views [default: 0:00]");
                println!("  --time-end <H:MM>");
                println!("                    Latest time shown in day & week views [default: 24:00]");
                println!("  --log-dir <DIR>   Write diagnostic logs to files in DIR");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Must happen before the logger starts any threads
    let offset = local_offset();
    Command::from_parser(Parser::from_env(), offset)?.run(offset)
}

/// Log to rotating files in `dir`.  The level can be overridden with
/// `RUST_LOG`.
fn init_logging(dir: &Path) -> anyhow::Result<LoggerHandle> {
    Logger::try_with_env_or_str("debug")
        .context("invalid log specification")?
        .log_to_file(
            FileSpec::default()
                .directory(dir)
                .basename(env!("CARGO_PKG_NAME")),
        )
        .rotate(
            Criterion::Size(LOG_ROTATE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(LOG_KEEP_FILES),
        )
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
