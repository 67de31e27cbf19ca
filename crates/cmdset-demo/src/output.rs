//! Command output buffered for the lifetime of one run.
//!
//! Handlers are created by `'static` factories, so they cannot borrow the
//! caller's stdout. They append to a shared [`OutputBuffer`] instead, which
//! the runtime forwards once the dispatcher returns.

use std::cell::RefCell;
use std::fmt::Display;
use std::io::{self, Write};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub(crate) struct OutputBuffer(Rc<RefCell<Vec<u8>>>);

impl OutputBuffer {
    /// Appends `line` and a newline.
    pub(crate) fn line(&self, line: impl Display) {
        let mut buffer = self.0.borrow_mut();
        buffer.extend_from_slice(line.to_string().as_bytes());
        buffer.push(b'\n');
    }

    /// Writes everything buffered so far to `writer` and empties the buffer.
    pub(crate) fn forward_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let pending = std::mem::take(&mut *self.0.borrow_mut());
        if pending.is_empty() {
            return Ok(());
        }
        writer.write_all(&pending)?;
        writer.flush()
    }

    #[cfg(test)]
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}
