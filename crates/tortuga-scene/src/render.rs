//! Dirty-gated repaint of the scene onto an abstract surface.

use std::time::Duration;

use serde::Serialize;

use tortuga_types::Point;

use crate::error::RenderError;
use crate::model::SceneModel;

/// Target repaint cadence. The timer itself belongs to the embedding
/// host; the renderer only decides whether a given tick needs paint.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Fixed turtle glyph in scene units, nose along heading 0 (straight up).
const GLYPH: [Point; 3] = [
    Point::new(0.0, 10.0),
    Point::new(-6.0, -8.0),
    Point::new(6.0, -8.0),
];

/// Drawing surface the renderer paints onto.
///
/// Coordinates handed to a surface are already pixel-space: origin at the
/// top-left corner, y down. The renderer does the scene-to-pixel mapping.
pub trait Surface {
    /// Current surface size in pixels (width, height).
    fn size(&self) -> (f64, f64);
    /// Erase the whole surface.
    fn clear(&mut self) -> Result<(), RenderError>;
    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Point]) -> Result<(), RenderError>;
    /// Fill a triangle.
    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) -> Result<(), RenderError>;
}

/// Repaints a surface from the scene model, only when something changed.
#[derive(Debug, Default)]
pub struct Renderer {
    last_size: Option<(f64, f64)>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// One timer tick.
    ///
    /// Paints when the scene is dirty or the surface size changed since
    /// the last paint, and reports whether a paint happened. A paint
    /// failure is logged and re-marks the scene dirty, so the loop keeps
    /// ticking and the next tick retries.
    pub fn tick<S: Surface>(&mut self, scene: &mut SceneModel, surface: &mut S) -> bool {
        let size = surface.size();
        let resized = self.last_size != Some(size);
        let dirty = scene.take_dirty();
        if !dirty && !resized {
            return false;
        }
        match self.paint(scene, surface, size) {
            Ok(()) => {
                self.last_size = Some(size);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "paint pass failed");
                scene.mark_dirty();
                false
            }
        }
    }

    /// Full repaint: clear, then every segment of every turtle, then the
    /// glyph of every visible turtle. Drawn ink persists even for turtles
    /// hidden later; only the glyph pass honors visibility.
    fn paint<S: Surface>(
        &self,
        scene: &SceneModel,
        surface: &mut S,
        size: (f64, f64),
    ) -> Result<(), RenderError> {
        let (width, height) = size;
        let to_pixels = |p: Point| Point::new(width / 2.0 + p.x, height / 2.0 - p.y);

        surface.clear()?;

        for (_, turtle) in scene.turtles() {
            for segment in turtle.segments() {
                if segment.len() < 2 {
                    continue;
                }
                let points: Vec<Point> = segment.iter().copied().map(to_pixels).collect();
                surface.stroke_polyline(&points)?;
            }
        }

        for (_, turtle) in scene.turtles() {
            if !turtle.visible {
                continue;
            }
            let [a, b, c] = glyph_at(turtle.position, turtle.heading);
            surface.fill_triangle(to_pixels(a), to_pixels(b), to_pixels(c))?;
        }

        Ok(())
    }
}

/// The glyph triangle translated to `position` and rotated to `heading`
/// (radians, clockwise from straight up), still in scene space.
fn glyph_at(position: Point, heading: f64) -> [Point; 3] {
    let (sin, cos) = heading.sin_cos();
    GLYPH.map(|p| {
        Point::new(
            position.x + p.x * cos + p.y * sin,
            position.y - p.x * sin + p.y * cos,
        )
    })
}

/// A recording surface: every paint call becomes an ordered op.
///
/// Serializable, so a thin embedding (for example a browser page) can
/// replay one frame onto a real canvas; also convenient to assert against
/// in tests. `clear` drops the previous frame, so after a tick the list
/// holds exactly the current frame's ops.
#[derive(Debug, Serialize)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    pub ops: Vec<PaintOp>,
}

/// One recorded paint call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum PaintOp {
    Clear,
    Stroke { points: Vec<Point> },
    Glyph { points: [Point; 3] },
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }
}

impl Surface for DisplayList {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) -> Result<(), RenderError> {
        self.ops.clear();
        self.ops.push(PaintOp::Clear);
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point]) -> Result<(), RenderError> {
        self.ops.push(PaintOp::Stroke {
            points: points.to_vec(),
        });
        Ok(())
    }

    fn fill_triangle(&mut self, a: Point, b: Point, c: Point) -> Result<(), RenderError> {
        self.ops.push(PaintOp::Glyph { points: [a, b, c] });
        Ok(())
    }
}
