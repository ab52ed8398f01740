use std::io::{self, Stderr, Stdout, Write};

/// Pair of text sinks the runner writes status messages to.
///
/// The sinks are owned by the caller and outlive the run.
pub trait Console {
    fn out(&mut self) -> &mut dyn Write;
    fn err(&mut self) -> &mut dyn Write;
}

/// Process stdout/stderr.
#[derive(Debug)]
pub struct StdConsole {
    out: Stdout,
    err: Stderr,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.err
    }
}

/// In-memory console; keeps everything written to either sink.
#[derive(Debug, Default, Clone)]
pub struct BufferConsole {
    out: Vec<u8>,
    err: Vec<u8>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn out_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn err_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}

impl Console for BufferConsole {
    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_console_keeps_sinks_apart() {
        let mut console = BufferConsole::new();
        write!(console.out(), "to out").unwrap();
        write!(console.err(), "to err").unwrap();

        assert_eq!(console.out_text(), "to out");
        assert_eq!(console.err_text(), "to err");
    }
}
