//! Dedicated sandbox execution context for native hosts.
//!
//! The worker thread owns the interpreter; the host side holds only a
//! request sender, the ordered event receiver, and the interrupt handle.
//! The two contexts share no memory, mirroring the page/worker split of a
//! browser embedding.

use std::rc::Rc;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use tortuga_types::Event;

use crate::emitter::{ChannelSink, EventSink};
use crate::error::SandboxError;
use crate::runtime::{InterruptHandle, RunOutcome, SandboxConfig, SandboxRuntime};

/// Host-side handle to a sandbox running on its own thread.
pub struct SandboxWorker {
    requests: Sender<String>,
    events: Receiver<Event>,
    interrupt: InterruptHandle,
}

impl SandboxWorker {
    /// Spawn a fresh sandbox context.
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<String>();
        let (event_tx, event_rx) = mpsc::channel();
        let flag = Arc::new(AtomicBool::new(false));
        let worker_flag = Arc::clone(&flag);
        thread::spawn(move || sandbox_main(request_rx, event_tx, worker_flag));
        tracing::debug!("sandbox worker spawned");
        Self {
            requests: request_tx,
            events: event_rx,
            interrupt: InterruptHandle::new(flag),
        }
    }

    /// Queue one run. The caller must not have a run in flight.
    pub fn run(&self, source: &str) -> Result<(), SandboxError> {
        self.requests
            .send(source.to_string())
            .map_err(|_| SandboxError::WorkerGone)
    }

    /// Next buffered record, in production order, without blocking.
    pub fn try_next(&self) -> Result<Option<Event>, SandboxError> {
        match self.events.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(SandboxError::ChannelClosed),
        }
    }

    /// Forcibly terminate the context.
    ///
    /// Unconditional: the run in flight aborts at its next checkpoint with
    /// no `finished` record, and anything still buffered is discarded with
    /// the channels. The host is idle the moment this returns; a new
    /// worker may be spawned right away. The thread is detached and winds
    /// itself down.
    pub fn terminate(self) {
        self.interrupt.trigger();
        tracing::debug!("sandbox worker terminated");
        // Dropping self closes both channel ends; the thread exits once it
        // observes either the interrupt or the closed request channel.
    }
}

fn sandbox_main(requests: Receiver<String>, events: Sender<Event>, interrupt: Arc<AtomicBool>) {
    let sink: Rc<dyn EventSink> = Rc::new(ChannelSink::new(events));
    let config = SandboxConfig {
        interrupt,
        ..SandboxConfig::default()
    };
    let mut runtime = SandboxRuntime::with_config(sink, config);
    while let Ok(source) = requests.recv() {
        if runtime.run(&source) == RunOutcome::Terminated {
            break;
        }
    }
    tracing::debug!("sandbox worker thread exiting");
}
