//! Host-side mirror of the sandbox's drawing state.

use std::collections::BTreeMap;

use tortuga_types::{Event, Point, TurtleId};

/// A contiguous polyline drawn while a turtle's pen stayed down.
pub type Segment = Vec<Point>;

/// Host-side view of one turtle: current transform plus drawn history.
#[derive(Debug, Clone)]
pub struct SceneTurtle {
    pub position: Point,
    /// Heading in radians, absolute, clockwise from straight up.
    pub heading: f64,
    pub visible: bool,
    segments: Vec<Segment>,
    /// Whether the last segment is still open for appends.
    open: bool,
}

impl SceneTurtle {
    fn new() -> Self {
        Self {
            position: Point::ORIGIN,
            heading: 0.0,
            visible: true,
            segments: Vec::new(),
            open: false,
        }
    }

    /// Drawn history, oldest segment first. A segment closed by a pen-up
    /// transition is never mutated again.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    fn apply_move(&mut self, to: Point, drawing: bool) {
        if drawing {
            if !self.open {
                // A fresh segment starts where the turtle currently is.
                self.segments.push(vec![self.position]);
                self.open = true;
            }
            if let Some(segment) = self.segments.last_mut() {
                // A move that ends where the segment already ends adds no
                // point.
                if segment.last() != Some(&to) {
                    segment.push(to);
                }
            }
        } else {
            self.open = false;
        }
        self.position = to;
    }
}

/// Authoritative mirror of all turtles and their accumulated segments for
/// the current run.
///
/// Rebuilt incrementally from incoming records and discarded wholesale
/// when a `clear` record arrives. The model is a pure projection of the
/// record history since the last clear: it never consults the sandbox and
/// nothing else feeds it. Ids repeat across runs, so state is keyed per
/// run and never merged across a clear.
#[derive(Debug, Default)]
pub struct SceneModel {
    turtles: BTreeMap<TurtleId, SceneTurtle>,
    dirty: bool,
}

impl SceneModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one record. Records must arrive in production order; every
    /// mutation marks the model dirty.
    pub fn apply(&mut self, event: &Event) {
        match event {
            Event::Clear => {
                self.turtles.clear();
                self.dirty = true;
            }
            Event::CreateTurtle { id } => {
                self.turtles.insert(*id, SceneTurtle::new());
                self.dirty = true;
            }
            Event::MoveTurtle { id, x, y, drawing } => {
                if let Some(turtle) = self.turtles.get_mut(id) {
                    turtle.apply_move(Point::new(*x, *y), *drawing);
                    self.dirty = true;
                }
            }
            Event::RotateTurtle { id, angle } => {
                if let Some(turtle) = self.turtles.get_mut(id) {
                    turtle.heading = *angle;
                    self.dirty = true;
                }
            }
            Event::ShowhideTurtle { id, visible } => {
                if let Some(turtle) = self.turtles.get_mut(id) {
                    turtle.visible = *visible;
                    self.dirty = true;
                }
            }
            // Log and lifecycle records carry no scene state.
            Event::Output { .. } | Event::Finished => {}
        }
    }

    pub fn turtle(&self, id: TurtleId) -> Option<&SceneTurtle> {
        self.turtles.get(&id)
    }

    /// All turtles in id order.
    pub fn turtles(&self) -> impl Iterator<Item = (TurtleId, &SceneTurtle)> {
        self.turtles.iter().map(|(id, turtle)| (*id, turtle))
    }

    pub fn len(&self) -> usize {
        self.turtles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turtles.is_empty()
    }

    /// Whether the model changed since the flag was last taken.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consume the dirty flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// Re-mark the model, for example after a failed paint.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
