//! Diagnostics go through the `log` facade to an `env_logger` backend on
//! standard error.
//!
//! The level comes from `RUST_LOG` if it's set, and otherwise from the number
//! of `-v` flags: none is `info` (warnings and the backup notice), one is
//! `debug`, two or more is `trace`.

use env_logger::Builder;
use log::LevelFilter;
use std::io::Write;

/// Initializes logging. Call once, before anything is logged.
pub fn init(verbose: u8) {
    let mut builder = Builder::new();
    if std::env::var_os("RUST_LOG").is_some() {
        builder.parse_default_env();
    } else {
        builder.filter_level(level_for(verbose));
    }
    builder.format(|buf, record| {
        let level = record.level();
        let style = buf.default_level_style(level);
        writeln!(buf, "{style}{}{style:#}: {}", level.as_str().to_lowercase(), record.args())
    });
    builder.init();
    log::trace!("logging at {}", log::max_level());
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}
