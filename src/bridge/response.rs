//! Callback responses.
//!
//! Every accepted query owns exactly one [`ResponseBlock`]. Responding
//! consumes the block, and a block dropped without a response delivers an
//! empty one, so each query produces one response and never more.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use tracing::{trace, warn};

use crate::types::Value;

/// Callback identifier chosen by the caller.
pub type CallbackId = u64;

/// Ordered values delivered to one callback. Empty `values` is the empty
/// (error) response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub callback: CallbackId,
    pub values: Vec<Value>,
}

impl Response {
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Delivery primitive provided by the transport.
pub trait ResponseSink {
    fn deliver(&self, response: Response);
}

/// Exactly-once response handle for one callback.
pub struct ResponseBlock {
    callback: CallbackId,
    sink: Rc<dyn ResponseSink>,
    sent: bool,
}

impl ResponseBlock {
    pub fn new(callback: CallbackId, sink: Rc<dyn ResponseSink>) -> Self {
        Self {
            callback,
            sink,
            sent: false,
        }
    }

    pub fn callback(&self) -> CallbackId {
        self.callback
    }

    pub fn respond(mut self, values: Vec<Value>) {
        self.send(values);
    }

    pub fn respond_empty(self) {
        self.respond(Vec::new());
    }

    fn send(&mut self, values: Vec<Value>) {
        if self.sent {
            return;
        }
        self.sent = true;
        trace!(callback = self.callback, len = values.len(), "response");
        self.sink.deliver(Response {
            callback: self.callback,
            values,
        });
    }
}

impl Drop for ResponseBlock {
    fn drop(&mut self) {
        if !self.sent {
            self.send(Vec::new());
        }
    }
}

impl std::fmt::Debug for ResponseBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseBlock")
            .field("callback", &self.callback)
            .field("sent", &self.sent)
            .finish()
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Responses queued in order, drained by the embedder at end of turn.
#[derive(Debug, Default)]
pub struct QueuedResponses {
    queue: RefCell<VecDeque<Response>>,
}

impl QueuedResponses {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    pub fn drain(&self) -> Vec<Response> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl ResponseSink for QueuedResponses {
    fn deliver(&self, response: Response) {
        self.queue.borrow_mut().push_back(response);
    }
}

/// Responses forwarded over a channel to a transport on another thread.
#[derive(Debug, Clone)]
pub struct ChannelResponses {
    tx: Sender<Response>,
}

impl ChannelResponses {
    pub fn new(tx: Sender<Response>) -> Self {
        Self { tx }
    }
}

impl ResponseSink for ChannelResponses {
    fn deliver(&self, response: Response) {
        let callback = response.callback;
        if self.tx.send(response).is_err() {
            warn!(callback, "response receiver closed, dropping response");
        }
    }
}
