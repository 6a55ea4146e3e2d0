use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::Context;

use super::CallbackSource;
use crate::bridge::HostCallback;
use crate::error::BridgeError;

/// Recorded session read from JSON lines, one callback per line
///
/// Blank lines and lines starting with `#` are skipped.
pub struct ReplaySource {
    lines: Box<dyn BufRead + Send>,
    line_number: usize,
    buf: String,
}

impl ReplaySource {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open session {}", path.display()))?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader<R: BufRead + Send + 'static>(reader: R) -> Self {
        Self {
            lines: Box::new(reader),
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl CallbackSource for ReplaySource {
    fn next_callback(&mut self) -> anyhow::Result<Option<HostCallback>> {
        loop {
            self.buf.clear();
            if self.lines.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let callback = serde_json::from_str(line).map_err(|e| BridgeError::Session {
                line: self.line_number,
                message: e.to_string(),
            })?;
            return Ok(Some(callback));
        }
    }
}

/// Write callbacks in the format `ReplaySource` reads
pub fn write_session<W: Write>(writer: &mut W, callbacks: &[HostCallback]) -> anyhow::Result<()> {
    for callback in callbacks {
        serde_json::to_writer(&mut *writer, callback)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
