//! Producers of host callbacks.
//!
//! A source yields callbacks in delivery order until it is exhausted. The
//! CLI runs a source on its own thread and feeds the module through a
//! channel; tests pull from sources directly.

pub mod channel;
pub mod replay;

use crate::bridge::HostCallback;

pub use channel::ChannelSource;
pub use replay::{ReplaySource, write_session};

pub trait CallbackSource: Send {
    /// Next callback, or `None` once the source is exhausted
    fn next_callback(&mut self) -> anyhow::Result<Option<HostCallback>>;
}

/// Iterate a source to completion, stopping at the first error
pub fn drain<S: CallbackSource + ?Sized>(source: &mut S) -> anyhow::Result<Vec<HostCallback>> {
    let mut callbacks = Vec::new();
    while let Some(callback) = source.next_callback()? {
        callbacks.push(callback);
    }
    Ok(callbacks)
}
