//! Command-line surface and process options.

use crate::error::{Result, TintlogError};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

/// Rules file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.txt";

/// Config polling period used when `--interval` is not given
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Everything the application needs to know from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Rules configuration file, re-read every poll interval
    pub config_path: PathBuf,
    /// Log input file; standard input when `None`
    pub input_path: Option<PathBuf>,
    /// Config polling period
    pub poll_interval: Duration,
    /// Shut down once input ends instead of continuing to watch the config
    pub exit_on_eof: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            input_path: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
            exit_on_eof: false,
        }
    }
}

impl ViewerOptions {
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let defaults = Self::default();
        Self {
            config_path: matches
                .get_one::<PathBuf>("config")
                .cloned()
                .unwrap_or(defaults.config_path),
            input_path: matches.get_one::<PathBuf>("input").cloned(),
            poll_interval: matches
                .get_one::<Duration>("interval")
                .copied()
                .unwrap_or(defaults.poll_interval),
            exit_on_eof: matches.get_flag("exit-on-eof"),
        }
    }

    /// Parse options from an argument list (first item is the program name)
    pub fn try_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = command()
            .try_get_matches_from(args)
            .map_err(|err| TintlogError::invalid_argument(err.to_string()))?;
        Ok(Self::from_matches(&matches))
    }
}

/// Build the clap command definition
pub fn command() -> Command {
    Command::new("tintlog")
        .version(crate::VERSION)
        .about("Filter and colorize a log stream with hot-reloaded rules")
        .long_about(
            "tintlog reads log lines from standard input or a file, keeps the full history \
             in memory, and redraws it on every new line: only lines containing the \
             configured filter are shown, with configured keywords colorized. The rules \
             file is polled and changes are applied to the whole history immediately.\n\n\
             Diagnostics are written to stderr. Only warnings are shown by default; set \
             RUST_LOG=info to also see a notice each time the rules file is reloaded.",
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to the rules file (filter=<text>, <keyword>=<color>)")
                .default_value(DEFAULT_CONFIG_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("input")
                .long("input")
                .value_name("PATH")
                .help("Path to the input log file (default: standard input)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("DURATION")
                .help("Polling interval for rules file changes, e.g. 2s, 500ms, 1m30s")
                .default_value("2s")
                .value_parser(parse_interval),
        )
        .arg(
            Arg::new("exit-on-eof")
                .long("exit-on-eof")
                .help("Exit when input ends instead of continuing to watch the rules file")
                .action(ArgAction::SetTrue),
        )
}

/// Parse a polling interval.
///
/// Accepts a sequence of `<number><unit>` segments with units `ns`, `us`, `µs`,
/// `ms`, `s`, `m`, `h` (for example `1m30s` or `1.5s`). A bare number is taken
/// as seconds. The result must be greater than zero.
pub fn parse_interval(text: &str) -> std::result::Result<Duration, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("duration must not be empty".to_string());
    }

    let total = match text.parse::<f64>() {
        Ok(seconds) => seconds_to_duration(seconds, text)?,
        Err(_) => parse_segments(text)?,
    };

    if total.is_zero() {
        return Err("interval must be greater than zero".to_string());
    }
    Ok(total)
}

fn parse_segments(text: &str) -> std::result::Result<Duration, String> {
    let is_number_char = |c: char| c.is_ascii_digit() || c == '.';
    let mut total = Duration::ZERO;
    let mut rest = text;

    while !rest.is_empty() {
        let number_len = rest.find(|c: char| !is_number_char(c)).unwrap_or(rest.len());
        let (number, tail) = rest.split_at(number_len);
        let unit_len = tail.find(is_number_char).unwrap_or(tail.len());
        let (unit, tail) = tail.split_at(unit_len);

        let value: f64 = number
            .parse()
            .map_err(|_| format!("invalid duration {text:?}: expected a number before {unit:?}"))?;
        let scale = match unit {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            "" => return Err(format!("invalid duration {text:?}: missing unit after {number}")),
            other => return Err(format!("invalid duration {text:?}: unknown unit {other:?}")),
        };

        total = total
            .checked_add(seconds_to_duration(value * scale, text)?)
            .ok_or_else(|| format!("duration {text:?} is too large"))?;
        rest = tail;
    }

    Ok(total)
}

fn seconds_to_duration(seconds: f64, text: &str) -> std::result::Result<Duration, String> {
    Duration::try_from_secs_f64(seconds).map_err(|_| format!("invalid duration {text:?}"))
}
