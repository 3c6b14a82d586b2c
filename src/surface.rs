//! Drawing primitives and the surface that accumulates them.

use crate::render::Renderer;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Default surface width, in pixels.
pub const DEFAULT_WIDTH: u32 = 800;
/// Default surface height, in pixels.
pub const DEFAULT_HEIGHT: u32 = 600;

/// Which of the two fixed colors a primitive is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Branches and edges laid down by forward moves.
    Path,
    /// Filled circles dropped by `*`.
    Marker,
}

/// A single drawing event emitted by the interpreter.
///
/// Coordinates are logical: the origin is the surface centre and `y` grows
/// downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Segment { from: DVec2, to: DVec2 },
    Circle { center: DVec2, radius: f64 },
}

impl Primitive {
    pub fn role(&self) -> ColorRole {
        match self {
            Self::Segment { .. } => ColorRole::Path,
            Self::Circle { .. } => ColorRole::Marker,
        }
    }

    /// Axis-aligned `(min, max)` corners covering the primitive.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        match *self {
            Self::Segment { from, to } => (from.min(to), from.max(to)),
            Self::Circle { center, radius } => {
                let r = DVec2::splat(radius);
                (center - r, center + r)
            }
        }
    }
}

/// The accumulated drawing of one run.
///
/// Primitives are kept in emission order, so replaying a prefix reproduces the
/// figure as it looked after that many drawing steps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
    primitives: Vec<Primitive>,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Surface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    /// Blanks the surface and adopts new dimensions.
    pub fn reset(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.primitives.clear();
    }

    pub fn clear(&mut self) {
        self.primitives.clear();
    }

    pub fn push(&mut self, primitive: Primitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn segment_count(&self) -> usize {
        self.count(ColorRole::Path)
    }

    pub fn circle_count(&self) -> usize {
        self.count(ColorRole::Marker)
    }

    fn count(&self, role: ColorRole) -> usize {
        self.primitives.iter().filter(|p| p.role() == role).count()
    }

    /// Pixel position of the logical origin.
    pub fn center(&self) -> DVec2 {
        DVec2::new((self.width / 2) as f64, (self.height / 2) as f64)
    }

    /// Converts a logical point to pixel coordinates.
    pub fn to_pixel(&self, point: DVec2) -> DVec2 {
        point + self.center()
    }

    /// Bounding box of everything drawn so far, or `None` for a blank surface.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.primitives
            .iter()
            .map(Primitive::bounds)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Feeds every primitive, in emission order, to `renderer`.
    pub fn replay<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.begin(self.width, self.height);
        for primitive in &self.primitives {
            match *primitive {
                Primitive::Segment { from, to } => {
                    renderer.segment(self.to_pixel(from), self.to_pixel(to))
                }
                Primitive::Circle { center, radius } => {
                    renderer.circle(self.to_pixel(center), radius)
                }
            }
        }
        renderer.finish();
    }
}
