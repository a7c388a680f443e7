//! `tracing` output for the browser console.
//!
//! The fmt layer formats each event into a buffer; the writer hands the finished
//! line to `console.error` / `console.warn` / `console.log` depending on level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;

use crate::config::ClientConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConsoleTarget {
    Log,
    Warn,
    Error,
}

impl ConsoleTarget {
    fn for_level(level: &Level) -> Self {
        if *level == Level::ERROR {
            ConsoleTarget::Error
        } else if *level == Level::WARN {
            ConsoleTarget::Warn
        } else {
            ConsoleTarget::Log
        }
    }
}

/// One formatted event, flushed to the console on drop.
pub struct ConsoleWriter {
    target: ConsoleTarget,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        let msg = wasm_bindgen::JsValue::from_str(line.trim_end());
        match self.target {
            ConsoleTarget::Log => web_sys::console::log_1(&msg),
            ConsoleTarget::Warn => web_sys::console::warn_1(&msg),
            ConsoleTarget::Error => web_sys::console::error_1(&msg),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            target: ConsoleTarget::Log,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            target: ConsoleTarget::for_level(meta.level()),
            buf: Vec::new(),
        }
    }
}

/// Install the console subscriber. Later calls are ignored.
pub fn init(config: &ClientConfig) {
    let _ = tracing_subscriber::fmt()
        .with_writer(MakeConsoleWriter)
        .with_max_level(config.level_filter())
        .with_ansi(false)
        .without_time()
        .with_target(true)
        .try_init();
}
