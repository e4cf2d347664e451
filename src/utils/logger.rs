use crate::config::LOG_LEVEL;
use spin::Mutex;
use log::{self, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Install the console logger with the crate default level.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(LOG_LEVEL)
}

pub fn init_with_level(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}

struct SimplerLogger(Mutex::<()>);
static LOGGER: SimplerLogger = SimplerLogger(Mutex::new(()));

impl Log for SimplerLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let hold_lock = LOGGER.0.lock();
            print!("\x1b[{}m", level_to_color_code(record.level()));
            println!("[{}] [{}]: {}", record.level(), record.target(), record.args());
            print!("\x1b[0m");
            drop(hold_lock);
        }
    }

    fn flush(&self) {}
}


fn level_to_color_code(level: Level) -> u8 {
    match level {
        Level::Error => 31, // Red
        Level::Warn => 93,  // BrightYellow
        Level::Info => 34,  // Blue
        Level::Debug => 32, // Green
        Level::Trace => 90, // BrightBlack
    }
}
