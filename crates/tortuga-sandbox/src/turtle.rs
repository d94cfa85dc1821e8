//! The turtle entity model: sandbox-side state of each drawable agent and
//! the arithmetic turning relative commands into absolute state changes.

use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use tortuga_types::{Event, Point, TurtleId};

use crate::emitter::EventSink;
use crate::error::ApiError;

/// Default full-circle unit: degrees.
const DEGREES: f64 = 360.0;

/// Creates turtle entities for the current run.
///
/// Owns the run-scoped id counter and the run epoch. Starting a new run
/// restarts ids at zero and orphans every entity created before it, so a
/// handle a previous script leaked can never write into the new run's
/// stream.
#[derive(Clone)]
pub struct TurtleFactory {
    next_id: Rc<Cell<u32>>,
    epoch: Rc<Cell<u64>>,
    sink: Rc<dyn EventSink>,
}

impl TurtleFactory {
    pub fn new(sink: Rc<dyn EventSink>) -> Self {
        Self {
            next_id: Rc::new(Cell::new(0)),
            epoch: Rc::new(Cell::new(0)),
            sink,
        }
    }

    /// Start a new run: ids restart at zero, entities of earlier runs go
    /// silent.
    pub fn begin_run(&self) {
        self.next_id.set(0);
        self.epoch.set(self.epoch.get() + 1);
    }

    /// Construct a turtle with default state and emit its creation record.
    pub fn create(&self) -> Turtle {
        let id = TurtleId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        let link = RunLink {
            sink: Rc::clone(&self.sink),
            epoch: Rc::clone(&self.epoch),
            born: self.epoch.get(),
        };
        link.emit(Event::CreateTurtle { id });
        Turtle {
            inner: Rc::new(RefCell::new(TurtleState {
                id,
                x: 0.0,
                y: 0.0,
                heading: 0.0,
                full_circle: DEGREES,
                pen_down: true,
                visible: true,
                link,
            })),
        }
    }
}

/// Event channel of one entity, valid only for the run it was created in.
struct RunLink {
    sink: Rc<dyn EventSink>,
    epoch: Rc<Cell<u64>>,
    born: u64,
}

impl RunLink {
    fn emit(&self, event: Event) {
        if self.epoch.get() == self.born {
            self.sink.emit(event);
        }
    }
}

struct TurtleState {
    id: TurtleId,
    x: f64,
    y: f64,
    /// Heading as a fraction of a full turn, in `[0, 1)`.
    heading: f64,
    /// How many script-side angle units make a full circle.
    full_circle: f64,
    pen_down: bool,
    visible: bool,
    link: RunLink,
}

/// Handle to one drawable agent.
///
/// Cheap to clone; clones alias the same entity, so a script that copies a
/// turtle variable keeps talking to the same turtle. Position is absolute
/// with the origin at the surface centre; heading 0 points straight up and
/// grows clockwise.
#[derive(Clone)]
pub struct Turtle {
    inner: Rc<RefCell<TurtleState>>,
}

impl Turtle {
    pub fn id(&self) -> TurtleId {
        self.inner.borrow().id
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Set the absolute position. Emits a move record carrying the new
    /// position and the current pen state.
    pub fn setpos(&self, x: f64, y: f64) {
        let mut state = self.inner.borrow_mut();
        state.x = x;
        state.y = y;
        let event = Event::MoveTurtle {
            id: state.id,
            x,
            y,
            drawing: state.pen_down,
        };
        state.link.emit(event);
    }

    /// Move `distance` along the current heading.
    pub fn forward(&self, distance: f64) {
        let (x, y) = {
            let state = self.inner.borrow();
            let radians = state.heading * TAU;
            (
                state.x + distance * radians.sin(),
                state.y + distance * radians.cos(),
            )
        };
        self.setpos(x, y);
    }

    pub fn backward(&self, distance: f64) {
        self.forward(-distance);
    }

    /// Back to the origin, facing up.
    pub fn home(&self) {
        self.setpos(0.0, 0.0);
        self.setheading(0.0);
    }

    // ── Heading ───────────────────────────────────────────────────────────

    /// Set the absolute heading, given in the current angle unit. The
    /// emitted record always carries the angle in radians, regardless of
    /// the unit the script was using.
    pub fn setheading(&self, angle: f64) {
        let mut state = self.inner.borrow_mut();
        state.heading = (angle / state.full_circle).rem_euclid(1.0);
        let event = Event::RotateTurtle {
            id: state.id,
            angle: state.heading * TAU,
        };
        state.link.emit(event);
    }

    /// Turn clockwise by `angle` in the current unit.
    pub fn right(&self, angle: f64) {
        let current = self.heading();
        self.setheading(current + angle);
    }

    /// Turn counterclockwise by `angle` in the current unit.
    pub fn left(&self, angle: f64) {
        let current = self.heading();
        self.setheading(current - angle);
    }

    /// Change the full-circle unit. `full` must be positive and finite.
    pub fn degrees(&self, full: f64) -> Result<(), ApiError> {
        if !full.is_finite() || full <= 0.0 {
            return Err(ApiError::InvalidArgument(format!(
                "full circle unit must be a positive number, got {full}"
            )));
        }
        self.inner.borrow_mut().full_circle = full;
        Ok(())
    }

    /// Switch to radian mode. Shorthand for a full circle of `2*pi`.
    pub fn radians(&self) {
        self.inner.borrow_mut().full_circle = TAU;
    }

    // ── Pen & visibility ──────────────────────────────────────────────────

    /// Lower the pen. No record is emitted; only the `drawing` flag of
    /// subsequent move records changes.
    pub fn pen_down(&self) {
        self.inner.borrow_mut().pen_down = true;
    }

    /// Lift the pen. See [`Turtle::pen_down`].
    pub fn pen_up(&self) {
        self.inner.borrow_mut().pen_down = false;
    }

    /// Show or hide the turtle's marker. Pen and position are untouched.
    pub fn set_visible(&self, visible: bool) {
        let mut state = self.inner.borrow_mut();
        state.visible = visible;
        let event = Event::ShowhideTurtle {
            id: state.id,
            visible,
        };
        state.link.emit(event);
    }

    pub fn show(&self) {
        self.set_visible(true);
    }

    pub fn hide(&self) {
        self.set_visible(false);
    }

    // ── Read accessors (no records) ───────────────────────────────────────

    pub fn pos(&self) -> Point {
        let state = self.inner.borrow();
        Point::new(state.x, state.y)
    }

    pub fn xcor(&self) -> f64 {
        self.inner.borrow().x
    }

    pub fn ycor(&self) -> f64 {
        self.inner.borrow().y
    }

    /// Current heading in the current angle unit.
    pub fn heading(&self) -> f64 {
        let state = self.inner.borrow();
        state.heading * state.full_circle
    }

    pub fn is_down(&self) -> bool {
        self.inner.borrow().pen_down
    }

    pub fn is_visible(&self) -> bool {
        self.inner.borrow().visible
    }
}
