//! Neon Arcade - two single-page canvas mini-games
//!
//! Core modules:
//! - `atom`: drag-and-drop atom builder (place electrons on orbit levels)
//! - `gallery`: aim-and-fire shooting gallery (knock down numbered balls)
//! - `scene`: resolution-independent display list consumed by the host painter
//! - `input`: per-frame input snapshot fed to the game ticks
//!
//! Both games are pure per-frame state machines: the host calls `tick` once
//! per animation frame with that frame's input, then paints the scene the
//! state describes. Nothing in the cores touches the DOM.

pub mod atom;
#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod gallery;
pub mod geom;
pub mod input;
pub mod scene;
pub mod settings;

pub use settings::Settings;

use glam::Vec2;

/// Shared constants
pub mod consts {
    /// Nominal frame rate; used only to convert wall-clock durations
    /// into tick counts (all animation steps are per-frame)
    pub const TICK_HZ: u32 = 60;

    /// Logical canvas dimensions (both games)
    pub const VIEW_WIDTH: f32 = 800.0;
    pub const VIEW_HEIGHT: f32 = 520.0;
}

/// Number of ticks covering `secs` seconds at the nominal frame rate
#[inline]
pub const fn ticks_for_secs(secs: f32) -> u32 {
    (secs * consts::TICK_HZ as f32) as u32
}

/// Offset vector at polar (r, theta)
#[inline]
pub fn polar_offset(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
