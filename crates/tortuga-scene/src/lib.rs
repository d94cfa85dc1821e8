//! Host side of the Tortuga playground: the scene model rebuilt from the
//! sandbox's event stream, and the renderer that repaints a surface from
//! it on a fixed cadence.

mod error;
mod model;
mod render;

pub use error::RenderError;
pub use model::{SceneModel, SceneTurtle, Segment};
pub use render::{DisplayList, PaintOp, Renderer, Surface, TICK_INTERVAL};
