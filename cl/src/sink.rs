//! LogSink - renders one colorized, column-aligned line per entry
//!
//! Line layout: `<name>/<level><padding><message>`. The name and level are
//! styled; padding is computed from the unstyled level label so escape codes
//! never shift the message column.

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use colored::Color;
use log::debug;

use crate::LEVEL_WIDTH;
use crate::error::TransportError;
use crate::logger::Transport;
use crate::options::LoggerConfig;
use crate::severity::Severity;
use crate::style::Styler;

/// Output function receiving each rendered line (without line break)
pub type Out = Arc<dyn Fn(&str) -> io::Result<()> + Send + Sync>;

/// Default output: one line to stdout with a trailing line break
pub fn stdout_out() -> Out {
    Arc::new(|line: &str| {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)
    })
}

/// Something that turns an entry into a display line
pub trait Render {
    fn render(&self, severity: Severity, message: &str) -> String;
}

/// Console transport for a single host
pub struct LogSink {
    name: String,
    color: Color,
    out: Out,
    styler: Arc<dyn Styler>,
}

impl LogSink {
    /// Transport name reported to the logger
    pub const NAME: &'static str = "crawlog";

    pub fn new(name: impl Into<String>, color: Color, out: Out, styler: Arc<dyn Styler>) -> Self {
        Self {
            name: name.into(),
            color,
            out,
            styler,
        }
    }

    /// Build the sink for a resolved configuration
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::new(
            config.name(),
            config.color(),
            Arc::clone(config.out()),
            Arc::clone(config.styler()),
        )
    }

    /// Render and write one line; output failures are swallowed
    pub fn emit(&self, severity: Severity, message: &str) {
        let line = self.render(severity, message);
        let out = &self.out;
        match panic::catch_unwind(AssertUnwindSafe(|| out(&line))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!("LogSink::emit: output failed, dropping line: {}", e),
            Err(_) => debug!("LogSink::emit: output panicked, dropping line"),
        }
    }
}

impl Render for LogSink {
    fn render(&self, severity: Severity, message: &str) -> String {
        let label = severity.as_str();
        let pad = LEVEL_WIDTH.saturating_sub(label.len());
        format!(
            "{}/{}{}{}",
            self.styler.paint(self.color, &self.name),
            self.styler.bold(severity.color(), label),
            " ".repeat(pad),
            message
        )
    }
}

impl Transport for LogSink {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn log(&self, severity: Severity, message: &str) -> Result<(), TransportError> {
        self.emit(severity, message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::PlainStyler;
    use std::sync::Mutex;

    fn capture() -> (Out, Arc<Mutex<Vec<String>>>) {
        let lines = Arc::new(Mutex::new(Vec::new()));
        let sink_lines = Arc::clone(&lines);
        let out: Out = Arc::new(move |line: &str| -> io::Result<()> {
            sink_lines.lock().unwrap().push(line.to_string());
            Ok(())
        });
        (out, lines)
    }

    fn plain_sink(name: &str, out: Out) -> LogSink {
        LogSink::new(name, Color::Magenta, out, Arc::new(PlainStyler))
    }

    #[test]
    fn test_render_pads_each_level() {
        let (out, _) = capture();
        let sink = plain_sink("Test", out);

        assert_eq!(sink.render(Severity::Debug, "x"), "Test/debug  x");
        assert_eq!(sink.render(Severity::Verbose, "x"), "Test/verbosex");
        assert_eq!(sink.render(Severity::Info, "x"), "Test/info   x");
        assert_eq!(sink.render(Severity::Warn, "x"), "Test/warn   x");
        assert_eq!(sink.render(Severity::Error, "x"), "Test/error  x");
    }

    #[test]
    fn test_render_aligns_message_column() {
        let (out, _) = capture();
        let sink = plain_sink("MyJawa", out);

        let offsets: Vec<usize> = Severity::ALL
            .iter()
            .map(|s| sink.render(*s, "Scraping").find("Scraping").unwrap())
            .collect();
        assert!(offsets.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(offsets[0], "MyJawa/".len() + LEVEL_WIDTH);
    }

    #[test]
    fn test_emit_writes_rendered_line() {
        let (out, lines) = capture();
        let sink = plain_sink("Test", out);

        sink.emit(Severity::Warn, "careful");
        sink.emit(Severity::Error, "broken");

        let lines = lines.lock().unwrap();
        assert_eq!(lines.as_slice(), ["Test/warn   careful", "Test/error  broken"]);
    }

    #[test]
    fn test_emit_swallows_output_errors() {
        let out: Out = Arc::new(|_: &str| -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        });
        let sink = plain_sink("Test", out);

        sink.emit(Severity::Info, "nobody listening");
        assert!(Transport::log(&sink, Severity::Info, "still fine").is_ok());
    }

    #[test]
    fn test_emit_swallows_output_panics() {
        let out: Out = Arc::new(|_: &str| -> io::Result<()> { panic!("output exploded") });
        let sink = plain_sink("Test", out);

        sink.emit(Severity::Error, "boom");
    }

    #[test]
    fn test_transport_name() {
        let (out, _) = capture();
        let sink = plain_sink("Test", out);
        assert_eq!(Transport::name(&sink), "crawlog");
    }
}
