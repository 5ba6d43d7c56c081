//! Per-frame input snapshot
//!
//! The host accumulates DOM events into a `FrameInput` between animation
//! frames; `tick` consumes one snapshot per frame. Discrete events keep
//! their arrival order, held direction keys are polled as a bitset-style
//! struct once per frame.

use glam::Vec2;

/// A discrete input event, in arrival order within the frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed at a logical canvas position (mouse or single touch)
    PointerDown(Vec2),
    /// Pointer moved while pressed or hovering
    PointerMove(Vec2),
    /// Pointer released
    PointerUp(Vec2),
    /// Aim key pressed (auto-repeat already filtered by the host)
    AimPressed,
    /// Aim key released - fires the shot
    AimReleased,
    /// "Done" button - check the current configuration against the target
    CheckRequested,
    /// Dismiss the completion dialog
    Dismiss,
}

/// Direction keys currently held, polled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldDirs {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirs {
    /// Net movement for one frame at `step` pixels per held axis
    pub fn step(&self, step: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= step;
        }
        if self.down {
            delta.y += step;
        }
        if self.left {
            delta.x -= step;
        }
        if self.right {
            delta.x += step;
        }
        delta
    }
}

/// Everything a game tick sees for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub held: HeldDirs,
}

impl FrameInput {
    /// Snapshot for the current frame, leaving the queue empty for the next
    /// one (held keys persist until the host sees a keyup)
    pub fn take(&mut self) -> FrameInput {
        FrameInput {
            events: std::mem::take(&mut self.events),
            held: self.held,
        }
    }
}
