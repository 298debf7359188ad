//! Browser console logger for the `log` facade
//!
//! Native builds install nothing here; tests and tools pick their own logger
//! (`env_logger` in this crate's tests).

use log::LevelFilter;

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};
    use wasm_bindgen::JsValue;

    pub(super) struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
            match record.level() {
                Level::Error => web_sys::console::error_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Info => web_sys::console::info_1(&msg),
                Level::Debug => web_sys::console::log_1(&msg),
                Level::Trace => web_sys::console::debug_1(&msg),
            }
        }

        fn flush(&self) {}
    }

    pub(super) static LOGGER: ConsoleLogger = ConsoleLogger;
}

/// Install the console logger (wasm32 only). Safe to call more than once;
/// later calls only adjust the level.
pub fn init(level: LevelFilter) {
    #[cfg(target_arch = "wasm32")]
    {
        let _ = log::set_logger(&console::LOGGER);
    }
    log::set_max_level(level);
}
