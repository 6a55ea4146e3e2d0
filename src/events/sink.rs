use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::Sender;
use serde_json::Value;

use crate::error::{BridgeError, Result};
use crate::output::Formatter;

use super::{EmittedEvent, EventSink};

/// Forwards events over a channel to whoever holds the receiver
pub struct ChannelSink {
    tx: Sender<EmittedEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<EmittedEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, name: &str, payload: Value) -> Result<()> {
        self.tx
            .send(EmittedEvent::new(name, payload))
            .map_err(|_| BridgeError::EventSink("event receiver dropped".into()))
    }
}

/// Writes each event as one formatted line
pub struct WriterSink {
    writer: Mutex<Box<dyn Write + Send>>,
    formatter: Box<dyn Formatter>,
}

impl WriterSink {
    /// Create the sink, writing the formatter's header line if it has one
    pub fn new(mut writer: Box<dyn Write + Send>, formatter: Box<dyn Formatter>) -> Result<Self> {
        if let Some(header) = formatter.header() {
            writeln!(writer, "{}", header).map_err(|e| BridgeError::EventSink(e.to_string()))?;
        }
        Ok(Self {
            writer: Mutex::new(writer),
            formatter,
        })
    }
}

impl EventSink for WriterSink {
    fn emit(&self, name: &str, payload: Value) -> Result<()> {
        let line = self.formatter.format(&EmittedEvent::new(name, payload));
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| BridgeError::EventSink("writer lock poisoned".into()))?;
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| BridgeError::EventSink(e.to_string()))
    }
}

/// Holds events back until the application layer attaches
///
/// While closed the sink reports itself not ready and the module drops
/// events instead of queueing them.
pub struct GatedSink<S> {
    inner: S,
    open: AtomicBool,
}

impl<S: EventSink> GatedSink<S> {
    /// Create a closed gate in front of `inner`
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            open: AtomicBool::new(false),
        }
    }

    pub fn open(&self) {
        self.open.store(true, Ordering::Release);
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}

impl<S: EventSink> EventSink for GatedSink<S> {
    fn is_ready(&self) -> bool {
        self.open.load(Ordering::Acquire) && self.inner.is_ready()
    }

    fn emit(&self, name: &str, payload: Value) -> Result<()> {
        self.inner.emit(name, payload)
    }
}
