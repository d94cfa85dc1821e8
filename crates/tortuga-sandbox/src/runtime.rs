//! The sandbox runtime: one long-lived interpreter, reused across runs.

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rhai::{Dynamic, Engine, EvalAltResult};

use tortuga_types::Event;

use crate::api;
use crate::emitter::EventSink;
use crate::env::SandboxEnv;
use crate::turtle::TurtleFactory;

/// Construction-time knobs for a sandbox context.
pub struct SandboxConfig {
    /// Implementation of the script-facing `sleep(seconds)` primitive.
    /// Installed once at construction as part of the injected capability
    /// set; the default busy-waits so a sleeping script cannot suspend the
    /// surrounding context.
    pub wait: Rc<dyn Fn(f64)>,
    /// Shared flag observed at engine progress checkpoints. Once set, the
    /// run in flight aborts and every later run aborts too; a terminated
    /// context is discarded, not reused.
    pub interrupt: Arc<AtomicBool>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            wait: Rc::new(busy_wait),
            interrupt: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// Busy-wait for `seconds`. Monotonic clocks are unavailable on some wasm
/// targets; embedders there supply their own wait function instead.
fn busy_wait(seconds: f64) {
    let start = std::time::Instant::now();
    while start.elapsed().as_secs_f64() < seconds {
        std::hint::spin_loop();
    }
}

/// Outcome of a single `run` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run completed (including caught script errors) and `finished`
    /// was emitted.
    Completed,
    /// The run was forcibly terminated. No `finished` record was emitted
    /// and in-flight state was discarded.
    Terminated,
}

/// Shareable handle that aborts the run in flight from another context.
#[derive(Clone)]
pub struct InterruptHandle {
    flag: Arc<AtomicBool>,
}

impl InterruptHandle {
    pub(crate) fn new(flag: Arc<AtomicBool>) -> Self {
        Self { flag }
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }
}

/// Owns the long-lived interpreter instance and the reset protocol.
///
/// Exactly one runtime exists per sandbox context, for the lifetime of
/// that context. Construction installs the injected capability set (the
/// turtle surface, the wait substitute, output routing) and records the
/// environment baseline; every `run` then starts from a clean
/// script-visible environment without rebuilding the engine.
///
/// At most one run may be in flight at a time. The runtime does not queue
/// or reject overlapping calls; that discipline belongs to the caller.
pub struct SandboxRuntime {
    engine: Engine,
    env: SandboxEnv,
    factory: TurtleFactory,
    sink: Rc<dyn EventSink>,
    interrupt: Arc<AtomicBool>,
}

impl SandboxRuntime {
    pub fn new(sink: Rc<dyn EventSink>) -> Self {
        Self::with_config(sink, SandboxConfig::default())
    }

    pub fn with_config(sink: Rc<dyn EventSink>, config: SandboxConfig) -> Self {
        let mut engine = Engine::new();
        let factory = TurtleFactory::new(Rc::clone(&sink));

        // Interpreter output is part of the event stream, not stdout.
        let print_sink = Rc::clone(&sink);
        engine.on_print(move |text| {
            print_sink.emit(Event::Output {
                value: text.to_string(),
            })
        });
        let debug_sink = Rc::clone(&sink);
        engine.on_debug(move |text, _, _| {
            debug_sink.emit(Event::Output {
                value: text.to_string(),
            })
        });

        let watched = Arc::clone(&config.interrupt);
        engine.on_progress(move |_| {
            if watched.load(Ordering::Relaxed) {
                Some(Dynamic::UNIT)
            } else {
                None
            }
        });

        api::register(&mut engine, factory.clone(), Rc::clone(&config.wait));

        let mut env = SandboxEnv::new();
        env.inject_constant("PI", std::f64::consts::PI);
        env.inject_constant("TAU", std::f64::consts::TAU);
        env.initialize();

        Self {
            engine,
            env,
            factory,
            sink,
            interrupt: config.interrupt,
        }
    }

    /// Handle for aborting the run in flight, shareable across contexts.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        InterruptHandle::new(Arc::clone(&self.interrupt))
    }

    /// Execute one script run against a clean environment.
    ///
    /// Sequence: emit `clear`; restart the turtle id counter and orphan
    /// the previous run's entities; reset the environment to its baseline;
    /// execute the source. A script failure of any kind is formatted into
    /// one `output` record and does not propagate; `finished` is emitted
    /// unconditionally afterwards. Only a forced termination skips
    /// `finished`.
    pub fn run(&mut self, source: &str) -> RunOutcome {
        self.sink.emit(Event::Clear);
        self.factory.begin_run();
        self.env.reset_to_baseline();

        match self.engine.run_with_scope(self.env.scope_mut(), source) {
            Ok(()) => {}
            Err(err) => {
                if self.interrupt.load(Ordering::Relaxed)
                    && matches!(*err, EvalAltResult::ErrorTerminated(..))
                {
                    return RunOutcome::Terminated;
                }
                self.sink.emit(Event::Output {
                    value: format!("\n{err}\n"),
                });
            }
        }
        self.sink.emit(Event::Finished);
        RunOutcome::Completed
    }
}
