//! Scheduling outbound scripts onto the host UI thread.
//!
//! Web views may only be touched from the host's UI-affine context, so the
//! bridge never evaluates scripts itself. It hands each script to a
//! [`UiDispatcher`], and whoever owns the UI loop evaluates them through a
//! [`ScriptSink`].

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use reflector_common::BridgeError;
use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::envelope::PING_SENTINEL;

/// What a scheduled script delivers to the content.
#[derive(Debug, Clone, PartialEq)]
pub enum Delivery {
    /// A `SHARED_STATE_UPDATE_FROM_NATIVE` envelope, already JSON-encoded.
    StatePush { key: String, payload: String },
    /// The bare `PING` sentinel.
    Ping,
}

/// A script waiting to be evaluated in the content context.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledScript {
    pub delivery: Delivery,
    /// JavaScript source to evaluate.
    pub script: String,
}

impl ScheduledScript {
    /// The string the content's `message` listener will receive.
    pub fn payload(&self) -> &str {
        match &self.delivery {
            Delivery::StatePush { payload, .. } => payload,
            Delivery::Ping => PING_SENTINEL,
        }
    }
}

/// Something that can evaluate JavaScript in the content context.
///
/// Implementations are only called from the UI thread.
pub trait ScriptSink {
    fn evaluate_script(&self, script: &str) -> Result<(), BridgeError>;
}

/// The host's primitive for running work on its UI thread.
///
/// `dispatch` must not evaluate the script on the calling thread.
pub trait UiDispatcher: Send + Sync {
    fn dispatch(&self, job: ScheduledScript) -> Result<(), BridgeError>;
}

impl<F> UiDispatcher for F
where
    F: Fn(ScheduledScript) + Send + Sync,
{
    fn dispatch(&self, job: ScheduledScript) -> Result<(), BridgeError> {
        self(job);
        Ok(())
    }
}

// =============================================================================
// QUEUE DISPATCHER
// =============================================================================

/// FIFO queue drained by the UI event loop.
///
/// Clones share the same queue: hand one to the bridge and keep one in the
/// loop that calls [`QueueDispatcher::pump`].
#[derive(Debug, Clone, Default)]
pub struct QueueDispatcher {
    queue: Arc<Mutex<VecDeque<ScheduledScript>>>,
}

impl QueueDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending script, oldest first.
    pub fn drain(&self) -> Vec<ScheduledScript> {
        let mut queue = self.queue.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evaluate every pending script in order. Call from the UI thread.
    ///
    /// A failed evaluation is logged and does not stop the rest. Returns
    /// the number of scripts evaluated successfully.
    pub fn pump(&self, sink: &(impl ScriptSink + ?Sized)) -> usize {
        deliver_batch(self.drain(), sink)
    }
}

impl UiDispatcher for QueueDispatcher {
    fn dispatch(&self, job: ScheduledScript) -> Result<(), BridgeError> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(job);
        Ok(())
    }
}

// =============================================================================
// CHANNEL DISPATCHER
// =============================================================================

/// Dispatcher backed by an unbounded tokio channel, for hosts whose UI
/// loop is an async task.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
    sender: mpsc::UnboundedSender<ScheduledScript>,
}

impl ChannelDispatcher {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ScheduledScript>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl UiDispatcher for ChannelDispatcher {
    fn dispatch(&self, job: ScheduledScript) -> Result<(), BridgeError> {
        self.sender
            .send(job)
            .map_err(|_| BridgeError::Delivery("UI receiver was dropped".into()))
    }
}

/// Evaluate scripts from a [`ChannelDispatcher`] until every sender is gone.
/// Run this on the UI task. Returns the number evaluated successfully.
pub async fn deliver_from_channel(
    mut receiver: mpsc::UnboundedReceiver<ScheduledScript>,
    sink: &(impl ScriptSink + ?Sized),
) -> usize {
    let mut delivered = 0;
    while let Some(job) = receiver.recv().await {
        if deliver_one(&job, sink) {
            delivered += 1;
        }
    }
    delivered
}

fn deliver_batch(jobs: Vec<ScheduledScript>, sink: &(impl ScriptSink + ?Sized)) -> usize {
    jobs.iter().filter(|job| deliver_one(job, sink)).count()
}

fn deliver_one(job: &ScheduledScript, sink: &(impl ScriptSink + ?Sized)) -> bool {
    trace!(script = %job.script, "evaluating script");
    match sink.evaluate_script(&job.script) {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, payload_len = job.payload().len(), "script evaluation failed");
            false
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
