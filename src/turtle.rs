//! Turtle state and operations for planar interpretation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Heading every run starts with: facing "up" the drawing surface.
pub const INITIAL_HEADING: f64 = 90.0;

/// Position and heading of the drawing turtle.
///
/// Positions are in logical surface units with the origin at the surface centre.
/// The vertical axis grows downwards (screen convention), so moving along a
/// heading of 90° decreases `y`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurtleState {
    /// Current position of the pen.
    pub position: DVec2,

    /// Heading in degrees. 0° points along `+x`, angles increase counterclockwise.
    pub heading: f64,
}

impl Default for TurtleState {
    fn default() -> Self {
        Self {
            position: DVec2::ZERO,
            heading: INITIAL_HEADING,
        }
    }
}

impl TurtleState {
    /// Unit vector of the current heading in surface coordinates (y flipped).
    pub fn direction(&self) -> DVec2 {
        let (sin, cos) = self.heading.to_radians().sin_cos();
        DVec2::new(cos, -sin)
    }

    /// Where a move of `distance` along the current heading would land.
    pub fn ahead(&self, distance: f64) -> DVec2 {
        self.position + self.direction() * distance
    }

    /// Rotates the heading by `degrees` (positive is counterclockwise).
    pub fn turn(&mut self, degrees: f64) {
        self.heading += degrees;
    }
}

/// How the turtle stores its position after a move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    /// Snap every new position to the nearest whole unit (halves round up).
    ///
    /// Rounding error accumulates along a path; figures drawn this way match
    /// the pixel output of earlier releases exactly.
    #[default]
    Pixel,
    /// Keep the exact real-valued position.
    Exact,
}

impl Precision {
    pub fn apply(self, position: DVec2) -> DVec2 {
        match self {
            Self::Pixel => (position + DVec2::splat(0.5)).floor(),
            Self::Exact => position,
        }
    }
}

/// Operations that can be performed by the turtle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TurtleOp {
    /// Move one step along the heading, drawing a path segment.
    Forward,
    /// Turn by the configured angle times the sign (`+` is `1.0`, `-` is `-1.0`).
    Turn(f64),
    /// Drop a filled marker circle at the current position.
    Marker,
    /// Save position and heading (`[`).
    Push,
    /// Restore the most recently saved position and heading (`]`).
    Pop,
    /// No-op. Symbol has no registered meaning.
    Ignore,
}

impl TurtleOp {
    /// Fixed symbol table understood by a freshly built interpreter.
    pub const STANDARD: [(char, TurtleOp); 10] = [
        ('F', TurtleOp::Forward),
        ('G', TurtleOp::Forward),
        ('0', TurtleOp::Forward),
        ('1', TurtleOp::Forward),
        ('x', TurtleOp::Forward),
        ('+', TurtleOp::Turn(1.0)),
        ('-', TurtleOp::Turn(-1.0)),
        ('[', TurtleOp::Push),
        (']', TurtleOp::Pop),
        ('*', TurtleOp::Marker),
    ];
}
