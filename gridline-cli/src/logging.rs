//! Logger setup.

use std::fs;
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use simplelog::{
    ColorChoice, Config, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};

/// Map the number of `-v` flags to a level filter.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn config() -> Config {
    ConfigBuilder::new()
        .add_filter_allow_str("gridline")
        .set_time_level(LevelFilter::Off)
        .build()
}

/// Install the global logger.
///
/// Logs go to stderr unless `log_file` is given, in which case the file is
/// truncated and written instead.
pub fn init(verbosity: u8, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = level_for(verbosity);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            WriteLogger::init(level, config(), file).context("Failed to initialize logger")?;
        }
        None => {
            TermLogger::init(level, config(), TerminalMode::Stderr, ColorChoice::Auto)
                .context("Failed to initialize logger")?;
        }
    }

    log::debug!("Logging at {}", level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(1), LevelFilter::Info);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(3), LevelFilter::Trace);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }
}
