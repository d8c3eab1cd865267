//! Types for managing report output to various targets.
//!
//! Every line of a comparison report is written through a [`ReportSink`].
//! A [`PrintTarget`] is a single destination (stdout, a file, an internal
//! buffer, an arbitrary stream or nothing at all), and a [`MultiSink`]
//! sends each line to several of them, e.g. the console and `results.txt`.

use std::fs::File;
use std::io::{Error, ErrorKind, Result, Stdout, Write};

/// A destination for report lines.
pub trait ReportSink {
    /// Write one line of output.  A trailing newline is added.
    fn emit_line(&mut self, line: &str) -> Result<()>;
}

/// Container for managing multiple print targets
#[derive(Default)]
pub enum PrintTarget {
    #[default]
    Stdout,
    File(File),
    Buffer(Vec<u8>),
    Stream(Box<dyn Write + Send + Sync>), // Supports any stream that implements `Write`
    Sink,
}

impl PrintTarget {
    fn stdout() -> Stdout {
        std::io::stdout()
    }
}

impl std::fmt::Debug for PrintTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrintTarget::Stdout => write!(f, "PrintTarget::Stdout"),
            PrintTarget::File(_) => write!(f, "PrintTarget::File"),
            PrintTarget::Buffer(_) => write!(f, "PrintTarget::Buffer"),
            PrintTarget::Stream(_) => write!(f, "PrintTarget::Stream"),
            PrintTarget::Sink => write!(f, "PrintTarget::Sink"),
        }
    }
}

impl Write for PrintTarget {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match self {
            PrintTarget::Stdout => Self::stdout().write(buf),
            PrintTarget::File(file) => file.write(buf),
            PrintTarget::Buffer(buffer) => {
                buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
            PrintTarget::Stream(stream) => stream.write(buf),
            PrintTarget::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> Result<()> {
        match self {
            PrintTarget::Stdout => Self::stdout().flush(),
            PrintTarget::File(file) => file.flush(),
            PrintTarget::Buffer(_) => Ok(()),
            PrintTarget::Stream(stream) => stream.flush(),
            PrintTarget::Sink => Ok(()),
        }
    }
}

impl ReportSink for PrintTarget {
    fn emit_line(&mut self, line: &str) -> Result<()> {
        writeln!(self, "{line}")?;
        self.flush()
    }
}

/// Trait implemented by report writers that allow configurable print targets
pub trait ConfigurablePrintTarget {
    /// redirect print output to stdout
    fn print_to_stdout(&mut self);
    /// redirect print output to a file
    fn print_to_file(&mut self, file: File);
    /// redirect print output to a stream
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>);
    /// redirect print output to an internal buffer
    fn print_to_buffer(&mut self);
    /// discard all print output
    fn print_to_sink(&mut self);
    /// get the contents of the internal print buffer
    fn get_print_buffer(&mut self) -> Result<String>;
}

impl ConfigurablePrintTarget for PrintTarget {
    fn print_to_stdout(&mut self) {
        *self = PrintTarget::Stdout;
    }

    fn print_to_file(&mut self, file: File) {
        *self = PrintTarget::File(file);
    }

    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        *self = PrintTarget::Stream(stream);
    }

    fn print_to_buffer(&mut self) {
        *self = PrintTarget::Buffer(Vec::new());
    }

    fn print_to_sink(&mut self) {
        *self = PrintTarget::Sink;
    }

    fn get_print_buffer(&mut self) -> Result<String> {
        match self {
            PrintTarget::Buffer(buffer) => Ok(String::from_utf8_lossy(buffer).to_string()),
            _ => Err(Error::new(
                ErrorKind::Other,
                "Print buffering is not configured.",
            )),
        }
    }
}

/// Multicast sink.  Every line is forwarded to each of the inner sinks,
/// in the order they were added.
#[derive(Debug, Default)]
pub struct MultiSink<S = PrintTarget> {
    sinks: Vec<S>,
}

impl<S: ReportSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with(mut self, sink: S) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn sinks_mut(&mut self) -> &mut [S] {
        &mut self.sinks
    }

    pub fn into_inner(self) -> Vec<S> {
        self.sinks
    }
}

impl<S: ReportSink> ReportSink for MultiSink<S> {
    fn emit_line(&mut self, line: &str) -> Result<()> {
        // all sinks see the line even if an earlier one fails,
        // but the first failure is reported
        let mut status = Ok(());
        for sink in self.sinks.iter_mut() {
            let result = sink.emit_line(line);
            if status.is_ok() {
                status = result;
            }
        }
        status
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit_line(&mut self, line: &str) -> Result<()> {
        (**self).emit_line(line)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn emit_line(&mut self, line: &str) -> Result<()> {
        (**self).emit_line(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_target() {
        let mut target = PrintTarget::default();
        target.print_to_buffer();
        target.emit_line("first").unwrap();
        target.emit_line("second").unwrap();
        assert_eq!(target.get_print_buffer().unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_buffer_not_configured() {
        let mut target = PrintTarget::Sink;
        target.emit_line("dropped").unwrap();
        assert!(target.get_print_buffer().is_err());
    }

    #[test]
    fn test_multisink_broadcasts() {
        let mut multi = MultiSink::new()
            .with(PrintTarget::Buffer(Vec::new()))
            .with(PrintTarget::Sink)
            .with(PrintTarget::Buffer(Vec::new()));
        multi.emit_line("hello").unwrap();

        let mut sinks = multi.into_inner();
        assert_eq!(sinks[0].get_print_buffer().unwrap(), "hello\n");
        assert_eq!(sinks[2].get_print_buffer().unwrap(), "hello\n");
    }

    struct FailingSink;
    impl ReportSink for FailingSink {
        fn emit_line(&mut self, _line: &str) -> Result<()> {
            Err(Error::new(ErrorKind::Other, "broken"))
        }
    }

    #[test]
    fn test_multisink_reports_failure_after_forwarding() {
        let mut buffer = PrintTarget::Buffer(Vec::new());
        {
            let mut multi: MultiSink<Box<dyn ReportSink + '_>> = MultiSink::new();
            multi.push(Box::new(FailingSink));
            multi.push(Box::new(&mut buffer));
            assert!(multi.emit_line("still delivered").is_err());
        }
        assert_eq!(buffer.get_print_buffer().unwrap(), "still delivered\n");
    }
}
