use log::{Level, LevelFilter, Metadata, Record};

/// Plain stderr logger with quiet/verbose gating.
#[derive(Clone)]
pub struct StderrLogger {
    max_level: LevelFilter,
}

impl StderrLogger {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let max_level = if quiet {
            LevelFilter::Off
        } else if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        Self { max_level }
    }

    pub fn init(self) {
        let max_level = self.max_level;
        log::set_boxed_logger(Box::new(self)).expect("logger already initialized");
        log::set_max_level(max_level);
    }
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            match record.level() {
                Level::Error => eprintln!("[ERROR] {}", record.args()),
                Level::Warn => eprintln!("[WARN] {}", record.args()),
                level => eprintln!("[{}] {}", level, record.args()),
            }
        }
    }

    fn flush(&self) {}
}
