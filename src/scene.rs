//! Display list emitted by the game cores
//!
//! The cores describe each frame as a flat list of 2D primitives in logical
//! canvas coordinates; the host walks the list and paints it with whatever
//! surface it owns. Painting order is list order (later entries on top).

use glam::Vec2;

use crate::geom::Rect;

/// RGBA color, components 0-1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// CSS `rgba(...)` string for the canvas API
    pub fn to_css(self) -> String {
        format!(
            "rgba({},{},{},{})",
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            self.a
        )
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
}

/// A single draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Filled disc with an optional glow (shadow blur in the same color)
    Disc {
        center: Vec2,
        radius: f32,
        color: Color,
        glow: f32,
    },
    /// Disc filled with a two-stop radial gradient fading to transparent
    /// at 1.5x the radius (the neon orb look)
    GlowDisc {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    /// Stroked circle outline
    Ring {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
        dashed: bool,
        glow: f32,
    },
    /// Stroked rectangle outline
    RectOutline {
        rect: Rect,
        color: Color,
        dashed: bool,
    },
    /// Straight line segment
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    /// Text label, horizontally centered on `pos` when `centered`
    Text {
        pos: Vec2,
        text: String,
        color: Color,
        size: f32,
        centered: bool,
    },
}

/// One frame's worth of primitives
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
}

impl Scene {
    pub fn push(&mut self, p: Primitive) {
        self.primitives.push(p);
    }
}
