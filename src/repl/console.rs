//! Output sinks for the shell.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

/// Where the shell writes user-facing output and diagnostics.
pub struct Console {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

impl Console {
    pub fn stdio() -> Self {
        Self {
            out: Box::new(io::stdout()),
            err: Box::new(io::stderr()),
        }
    }

    /// Console writing into shared buffers, for inspection.
    pub fn captured() -> (Self, Captured) {
        let captured = Captured::default();
        let console = Self {
            out: Box::new(captured.out.clone()),
            err: Box::new(captured.err.clone()),
        };
        (console, captured)
    }

    // Write failures on a terminal are not actionable; they are dropped.

    pub fn print(&mut self, text: &str) {
        let _ = self.out.write_all(text.as_bytes());
        let _ = self.out.flush();
    }

    pub fn println(&mut self, text: &str) {
        let _ = writeln!(self.out, "{}", text);
        let _ = self.out.flush();
    }

    pub fn eprintln(&mut self, text: &str) {
        let _ = writeln!(self.err, "{}", text);
        let _ = self.err.flush();
    }
}

/// Growable byte buffer shared between a [`Console`] and its reader.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn clear(&self) {
        self.0.lock().clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Read side of [`Console::captured`].
#[derive(Debug, Clone, Default)]
pub struct Captured {
    pub out: SharedBuffer,
    pub err: SharedBuffer,
}

impl Captured {
    pub fn stdout(&self) -> String {
        self.out.contents()
    }

    pub fn stderr(&self) -> String {
        self.err.contents()
    }

    pub fn clear(&self) {
        self.out.clear();
        self.err.clear();
    }
}
