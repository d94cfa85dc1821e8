//! Host orchestrator for the Tortuga playground on native targets.
//!
//! Ties the sandbox worker, the scene model, the renderer, and the
//! program output log together behind the run/stop/pump lifecycle a UI
//! drives. The host never inspects sandbox state directly; everything it
//! knows arrives through the ordered record stream.

mod store;

pub use store::{MemoryStore, SourceStore, StoreError, SAVED_SOURCE_KEY};

use thiserror::Error;

use tortuga_sandbox::{SandboxError, SandboxWorker};
use tortuga_scene::{Renderer, SceneModel, Surface};
use tortuga_types::Event;

/// Line appended to the output log when the user terminates a run.
const TERMINATED_LINE: &str = "Program terminated by user";

#[derive(Debug, Error)]
pub enum HostError {
    /// A run is already in flight; wait for it to finish or call `stop`.
    #[error("a run is already in flight")]
    RunInFlight,
    /// The sandbox context failed; the host returned to idle.
    #[error(transparent)]
    Sandbox(#[from] SandboxError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One playground session: a long-lived sandbox plus the host-side state
/// rebuilt from its record stream.
///
/// The worker is spawned lazily on the first run and replaced wholesale
/// after a `stop`, so a terminated script can never bleed into the next
/// run.
pub struct Playground {
    worker: Option<SandboxWorker>,
    scene: SceneModel,
    renderer: Renderer,
    output: Vec<String>,
    running: bool,
}

impl Playground {
    pub fn new() -> Self {
        Self {
            worker: None,
            scene: SceneModel::new(),
            renderer: Renderer::new(),
            output: Vec::new(),
            running: false,
        }
    }

    /// Whether a run is in flight (its `finished` record not yet seen).
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start a run. At most one run may be in flight at a time.
    pub fn run(&mut self, source: &str) -> Result<(), HostError> {
        if self.running {
            return Err(HostError::RunInFlight);
        }
        let worker = self.worker.get_or_insert_with(SandboxWorker::spawn);
        worker.run(source)?;
        self.running = true;
        Ok(())
    }

    /// Persist the source under the single storage slot, then run it.
    pub fn run_saving<S: SourceStore>(
        &mut self,
        source: &str,
        store: &mut S,
    ) -> Result<(), HostError> {
        if self.running {
            return Err(HostError::RunInFlight);
        }
        store.save(source)?;
        self.run(source)
    }

    /// Apply every buffered record in arrival order; returns how many.
    ///
    /// Losing the event channel while a run is in flight is an
    /// infrastructure failure: it is logged, the worker is dropped, and
    /// the host returns to idle with no retry.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        loop {
            let next = match self.worker.as_ref() {
                Some(worker) => worker.try_next(),
                None => return applied,
            };
            match next {
                Ok(Some(event)) => {
                    applied += 1;
                    self.handle(event);
                }
                Ok(None) => return applied,
                Err(err) => {
                    tracing::error!(error = %err, "sandbox channel lost, returning to idle");
                    self.worker = None;
                    self.running = false;
                    return applied;
                }
            }
        }
    }

    fn handle(&mut self, event: Event) {
        match &event {
            Event::Output { value } => self.output.push(value.clone()),
            Event::Clear => {
                self.output.clear();
                self.scene.apply(&event);
            }
            Event::Finished => {
                self.running = false;
                tracing::debug!("run finished");
            }
            _ => self.scene.apply(&event),
        }
    }

    /// Forcibly terminate the sandbox.
    ///
    /// Unconditional and immediate: the run in flight is discarded without
    /// a `finished` record, the host is idle when this returns, and the
    /// next `run` starts a fresh sandbox.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };
        worker.terminate();
        self.running = false;
        self.output.push(TERMINATED_LINE.to_string());
    }

    /// One render timer tick against the given surface; reports whether a
    /// paint happened.
    pub fn render_tick<S: Surface>(&mut self, surface: &mut S) -> bool {
        self.renderer.tick(&mut self.scene, surface)
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    /// Program output lines, oldest first.
    pub fn output(&self) -> &[String] {
        &self.output
    }
}

impl Default for Playground {
    fn default() -> Self {
        Self::new()
    }
}
