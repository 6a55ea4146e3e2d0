use crossbeam_channel::Receiver;

use super::CallbackSource;
use crate::bridge::HostCallback;

/// Callbacks pushed by another thread, typically a live host binding
pub struct ChannelSource {
    rx: Receiver<HostCallback>,
}

impl ChannelSource {
    pub fn new(rx: Receiver<HostCallback>) -> Self {
        Self { rx }
    }
}

impl CallbackSource for ChannelSource {
    fn next_callback(&mut self) -> anyhow::Result<Option<HostCallback>> {
        match self.rx.recv() {
            Ok(callback) => Ok(Some(callback)),
            Err(_) => Ok(None),
        }
    }
}
