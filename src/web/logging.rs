//! tracing output to the browser console

use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use wasm_bindgen::JsValue;
use web_sys::console;

use crate::signup::config::LoggingSection;

/// Install the global subscriber. Later calls are ignored.
pub fn init(config: &LoggingSection) {
  let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|e| {
    console::warn_1(&JsValue::from_str(&format!(
      "Invalid log level {:?}: {}; falling back to info",
      config.level, e
    )));
    EnvFilter::new("info")
  });

  let result = tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_writer(ConsoleMakeWriter),
    )
    .try_init();

  if result.is_err() {
    console::debug_1(&JsValue::from_str("tracing subscriber already installed"));
  }
}

/// Routes each event to the console method matching its level
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
  type Writer = ConsoleWriter;

  fn make_writer(&'a self) -> Self::Writer {
    ConsoleWriter::new(Level::INFO)
  }

  fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
    ConsoleWriter::new(*meta.level())
  }
}

/// Buffers one formatted event and emits it on drop
pub struct ConsoleWriter {
  level: Level,
  buffer: Vec<u8>,
}

impl ConsoleWriter {
  fn new(level: Level) -> Self {
    Self {
      level,
      buffer: Vec::new(),
    }
  }
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
    if self.buffer.is_empty() {
      return;
    }
    let line = String::from_utf8_lossy(&self.buffer);
    let message = JsValue::from_str(line.trim_end());
    match self.level {
      Level::ERROR => console::error_1(&message),
      Level::WARN => console::warn_1(&message),
      Level::INFO => console::info_1(&message),
      Level::DEBUG => console::log_1(&message),
      _ => console::debug_1(&message),
    }
  }
}
