use env_logger::Env;
use log::LevelFilter;

const LOG_ENV: &str = "RESUME_ANALYZER_LOG";

pub struct Logger;

impl Logger {
    /// Installs the global colored logger. `RESUME_ANALYZER_LOG` may refine
    /// per-module filters on top of `level`.
    pub fn init(level: LevelFilter) {
        let mut builder = colog::default_builder();
        builder
            .filter_level(level)
            .filter_module("pdf_extract", LevelFilter::Warn)
            .parse_env(Env::new().filter(LOG_ENV));

        if builder.try_init().is_err() {
            log::debug!("logger already initialized");
        }
    }
}
