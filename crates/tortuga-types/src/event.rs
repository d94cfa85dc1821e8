use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a turtle within a single run.
///
/// Ids are assigned from a counter that restarts at zero on every run, so
/// they are only unique within one run. Hosts must never merge turtle state
/// across runs that happen to share an id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TurtleId(pub u32);

impl fmt::Display for TurtleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single record in the sandbox-to-host message stream.
///
/// Records are delivered in the exact order they were produced inside the
/// sandbox, at most once each. The serialized form (the `kind` tag plus the
/// payload fields) is the wire contract between the sandbox and any
/// host-side renderer; it must not change shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Event {
    /// Program output text, appended to the host's output log.
    Output { value: String },
    /// Discard all accumulated output and scene state.
    Clear,
    /// A new turtle entity was constructed.
    CreateTurtle { id: TurtleId },
    /// A turtle moved to an absolute position. When `drawing` is set the
    /// host extends (or opens) the turtle's current path segment.
    MoveTurtle {
        id: TurtleId,
        x: f64,
        y: f64,
        drawing: bool,
    },
    /// A turtle's heading changed. `angle` is absolute, in radians,
    /// independent of the angle unit the script was using.
    RotateTurtle { id: TurtleId, angle: f64 },
    /// A turtle was shown or hidden.
    ShowhideTurtle { id: TurtleId, visible: bool },
    /// The run completed, whether it succeeded or a script error was caught.
    Finished,
}

impl Event {
    /// The id this record refers to, for the per-turtle record kinds.
    pub fn turtle_id(&self) -> Option<TurtleId> {
        match self {
            Event::CreateTurtle { id }
            | Event::MoveTurtle { id, .. }
            | Event::RotateTurtle { id, .. }
            | Event::ShowhideTurtle { id, .. } => Some(*id),
            _ => None,
        }
    }
}
