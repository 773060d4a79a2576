//! I/O hooks: how a running program exchanges values with its host.
//!
//! A VM holds its hooks behind `Arc`, so snapshots share them. Hooks take
//! `&self`; stateful hooks keep their state behind a lock or a channel.

use std::collections::VecDeque;
use std::sync::Arc;

use crossbeam_channel as cb;
use parking_lot::Mutex;

use intcode_core::Word;

use crate::error::HookError;

/// Supplies values to opcode 3.
pub trait InputSource: Send + Sync {
    fn read(&self) -> Result<Word, HookError>;
}

/// Receives values from opcode 4.
pub trait OutputSink: Send + Sync {
    fn write(&self, value: Word) -> Result<(), HookError>;
}

impl<F> InputSource for F
where
    F: Fn() -> Result<Word, HookError> + Send + Sync,
{
    fn read(&self) -> Result<Word, HookError> {
        self()
    }
}

impl<F> OutputSink for F
where
    F: Fn(Word) -> Result<(), HookError> + Send + Sync,
{
    fn write(&self, value: Word) -> Result<(), HookError> {
        self(value)
    }
}

/// Input from a queue of pre-loaded values. Clones share the queue.
#[derive(Debug, Clone, Default)]
pub struct QueueInput {
    values: Arc<Mutex<VecDeque<Word>>>,
}

impl QueueInput {
    pub fn new<I: IntoIterator<Item = Word>>(values: I) -> Self {
        Self {
            values: Arc::new(Mutex::new(values.into_iter().collect())),
        }
    }

    pub fn push(&self, value: Word) {
        self.values.lock().push_back(value);
    }

    pub fn remaining(&self) -> usize {
        self.values.lock().len()
    }
}

impl InputSource for QueueInput {
    fn read(&self) -> Result<Word, HookError> {
        self.values.lock().pop_front().ok_or(HookError::Exhausted)
    }
}

/// Output that records every value. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct CollectOutput {
    values: Arc<Mutex<Vec<Word>>>,
}

impl CollectOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> Vec<Word> {
        self.values.lock().clone()
    }

    pub fn last(&self) -> Option<Word> {
        self.values.lock().last().copied()
    }

    pub fn clear(&self) {
        self.values.lock().clear();
    }
}

impl OutputSink for CollectOutput {
    fn write(&self, value: Word) -> Result<(), HookError> {
        self.values.lock().push(value);
        Ok(())
    }
}

/// Receiving end of a hook channel; blocks until a value arrives.
#[derive(Debug, Clone)]
pub struct ChannelInput {
    rx: cb::Receiver<Word>,
}

impl ChannelInput {
    /// Non-blocking read, for draining a channel after its producers finish.
    pub fn try_read(&self) -> Option<Word> {
        self.rx.try_recv().ok()
    }
}

impl InputSource for ChannelInput {
    fn read(&self) -> Result<Word, HookError> {
        self.rx.recv().map_err(|_| HookError::Disconnected)
    }
}

/// Sending end of a hook channel.
#[derive(Debug, Clone)]
pub struct ChannelOutput {
    tx: cb::Sender<Word>,
}

impl OutputSink for ChannelOutput {
    fn write(&self, value: Word) -> Result<(), HookError> {
        self.tx.send(value).map_err(|_| HookError::Disconnected)
    }
}

/// Unbounded channel linking one VM's output to another VM's input.
pub fn channel() -> (ChannelOutput, ChannelInput) {
    let (tx, rx) = cb::unbounded();
    (ChannelOutput { tx }, ChannelInput { rx })
}
