use std::io::Write;

use chrono::Local;
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Timestamp layout of every diagnostic line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Install the process-wide diagnostic sink.
///
/// Lines go to stderr as `timestamp - LEVEL - message`. `RUST_LOG` wins
/// when set; otherwise the level is `info`, or `debug` when `verbose`.
pub fn init(verbose: bool) -> Result<(), log::SetLoggerError> {
    builder(default_level(verbose)).try_init()
}

fn builder(level: LevelFilter) -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or(level.as_str()));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} - {} - {}",
            Local::now().format(TIMESTAMP_FORMAT),
            record.level(),
            record.args()
        )
    });
    builder
}

/// Level used when `RUST_LOG` is unset.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}
