//! Ordered, one-way event delivery from the sandbox to the host.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::Sender;

use tortuga_types::Event;

/// Receiving end of the sandbox's record stream.
///
/// Delivery is one-directional, ordered, and at-most-once: implementations
/// must hand records on in the exact order `emit` was called, and a record
/// that cannot be delivered is dropped, never re-sent.
pub trait EventSink {
    fn emit(&self, event: Event);
}

/// Sink that buffers records in the producing context.
///
/// Used when sandbox and host share a context (direct embedding, the wasm
/// endpoint, tests). Clones share the same buffer.
#[derive(Clone, Default)]
pub struct BufferSink {
    events: Rc<RefCell<Vec<Event>>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered record, in production order.
    pub fn drain(&self) -> Vec<Event> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventSink for BufferSink {
    fn emit(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }
}

/// Sink that crosses the context boundary over a channel.
///
/// The channel preserves order. Once the host has dropped the receiving
/// end (after a forced termination) records are silently discarded.
pub struct ChannelSink {
    sender: Sender<Event>,
}

impl ChannelSink {
    pub fn new(sender: Sender<Event>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: Event) {
        if self.sender.send(event).is_err() {
            tracing::debug!("event receiver gone, record discarded");
        }
    }
}
