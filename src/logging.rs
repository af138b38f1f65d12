//! Log output setup
//!
//! Installs a `tracing-subscriber` formatter. In the browser every formatted
//! event is forwarded to the console method matching its level; elsewhere
//! output goes to stderr filtered by `RUST_LOG`.

use tracing::Level;

/// Browser console method an event is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleMethod {
    /// `console.error`
    Error,
    /// `console.warn`
    Warn,
    /// `console.log`
    Log,
    /// `console.debug`
    Debug,
}

impl ConsoleMethod {
    /// Console method for a tracing level
    pub fn for_level(level: Level) -> Self {
        match level {
            Level::ERROR => Self::Error,
            Level::WARN => Self::Warn,
            Level::INFO => Self::Log,
            _ => Self::Debug,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    use super::ConsoleMethod;

    /// Buffers one formatted event and emits it on drop
    pub(super) struct ConsoleWriter {
        method: ConsoleMethod,
        buffer: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.buffer.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            let text = String::from_utf8_lossy(&self.buffer);
            let line = JsValue::from_str(text.trim_end());
            match self.method {
                ConsoleMethod::Error => web_sys::console::error_1(&line),
                ConsoleMethod::Warn => web_sys::console::warn_1(&line),
                ConsoleMethod::Log => web_sys::console::log_1(&line),
                ConsoleMethod::Debug => web_sys::console::debug_1(&line),
            }
        }
    }

    /// `MakeWriter` that picks the console method per event
    pub(super) struct MakeConsoleWriter;

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                method: ConsoleMethod::Log,
                buffer: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                method: ConsoleMethod::for_level(*meta.level()),
                buffer: Vec::new(),
            }
        }
    }
}

/// Installs the global subscriber
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(target_arch = "wasm32")]
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(console::MakeConsoleWriter)
        .without_time()
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

/// Installs the global subscriber
///
/// Safe to call more than once; later calls are no-ops.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}
