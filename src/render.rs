//! Renderer seam and the fixed two-color scheme.
//!
//! The interpreter never touches pixels. A host implements [`Renderer`] for
//! its target (window, canvas, file) and calls [`Surface::replay`] whenever it
//! wants to show the current figure. [`SvgRenderer`] is the renderer used by the
//! command-line host.
//!
//! [`Surface::replay`]: crate::surface::Surface::replay

use crate::surface::ColorRole;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Trait for drawing a replayed surface.
///
/// Coordinates handed to the renderer are already in pixels, origin top-left.
pub trait Renderer {
    /// Start a fresh frame of the given size (background fill goes here).
    fn begin(&mut self, width: u32, height: u32);

    /// Draw a path segment.
    fn segment(&mut self, from: DVec2, to: DVec2);

    /// Draw a filled marker circle.
    fn circle(&mut self, center: DVec2, radius: f64);

    /// Called once after the last primitive.
    fn finish(&mut self) {}
}

/// RGB color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
}

/// Background plus one color per [`ColorRole`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: Color,
    pub path: Color,
    pub marker: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::BLACK,
            path: Color::GREEN,
            marker: Color::RED,
        }
    }
}

impl Palette {
    pub fn color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Path => self.path,
            ColorRole::Marker => self.marker,
        }
    }
}

/// Writes the surface out as a standalone SVG document.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    palette: Palette,
    out: String,
}

impl SvgRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            out: String::new(),
        }
    }

    /// The rendered document. Empty until a surface has been replayed.
    pub fn into_document(self) -> String {
        self.out
    }
}

// Writing into a `String` cannot fail, so `fmt::Result`s below are discarded.
impl Renderer for SvgRenderer {
    fn begin(&mut self, width: u32, height: u32) {
        self.out.clear();
        let _ = writeln!(
            self.out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        let _ = writeln!(
            self.out,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            self.palette.background.hex()
        );
    }

    fn segment(&mut self, from: DVec2, to: DVec2) {
        let _ = writeln!(
            self.out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
            from.x,
            from.y,
            to.x,
            to.y,
            self.palette.color(ColorRole::Path).hex()
        );
    }

    fn circle(&mut self, center: DVec2, radius: f64) {
        let _ = writeln!(
            self.out,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            center.x,
            center.y,
            radius,
            self.palette.color(ColorRole::Marker).hex()
        );
    }

    fn finish(&mut self) {
        self.out.push_str("</svg>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Primitive, Surface};

    #[test]
    fn palette_matches_roles() {
        let palette = Palette::default();
        assert_eq!(palette.color(ColorRole::Path).hex(), "#00ff00");
        assert_eq!(palette.color(ColorRole::Marker).hex(), "#ff0000");
    }

    #[test]
    fn svg_contains_translated_primitives() {
        let mut surface = Surface::new(100, 50);
        surface.push(Primitive::Segment {
            from: DVec2::ZERO,
            to: DVec2::new(0.0, -10.0),
        });
        surface.push(Primitive::Circle {
            center: DVec2::new(0.0, -10.0),
            radius: 2.5,
        });

        let mut svg = SvgRenderer::default();
        surface.replay(&mut svg);
        let doc = svg.into_document();

        assert!(doc.starts_with("<svg"));
        assert!(doc.contains(r#"<line x1="50" y1="25" x2="50" y2="15""#));
        assert!(doc.contains(r##"<circle cx="50" cy="15" r="2.5" fill="#ff0000"/>"##));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
