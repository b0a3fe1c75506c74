//! Console rendering for stream events.

use std::io::{self, Write};

use crate::event::{Event, EventKind};

/// Writes one line (or, for tokens, one unterminated fragment) per event.
///
/// The writer is flushed after every event so token fragments show up as they
/// arrive instead of sitting in a line buffer.
pub struct Printer<W> {
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print(&mut self, event: &Event) -> io::Result<()> {
        match event.kind() {
            EventKind::Status => writeln!(self.out, "STATUS: {}", event.data)?,
            EventKind::RetrievedSources => {
                writeln!(self.out, "RETRIEVED SOURCES: {}", event.data)?
            }
            // no trailing newline, tokens stream onto one line
            EventKind::Token => write!(self.out, "{}", event.data)?,
            EventKind::Citation => writeln!(self.out, "\nCITATION: {}", event.data)?,
            EventKind::End => writeln!(self.out, "\nEND: {}", event.data)?,
            EventKind::Other => {
                writeln!(self.out, "{}: {}", event.event.to_uppercase(), event.data)?
            }
        }
        self.out.flush()
    }
}
