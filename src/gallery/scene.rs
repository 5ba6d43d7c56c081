//! Display list for the shooting gallery

use glam::Vec2;

use super::state::{Ball, GalleryState, KNOCK_FADE_TICKS, RETICLE_RADIUS};
use crate::scene::{Color, Primitive, Scene};

const ID_LABEL_COLOR: Color = Color::rgba(0.0, 0.0, 0.0, 0.7);
const RETICLE_COLOR: Color = Color::rgb(1.0, 0.3, 0.3);
/// Alpha a knocked ball settles at after its fade
const KNOCKED_ALPHA: f32 = 0.15;

/// Build the frame's display list from the current state
pub fn build(state: &GalleryState) -> Scene {
    let mut scene = Scene::default();

    for ball in &state.balls {
        let alpha = ball_alpha(ball, state.time_ticks);
        scene.push(Primitive::GlowDisc {
            center: ball.pos,
            radius: ball.radius,
            inner: ball.color.with_alpha(alpha),
            outer: ball.color.with_alpha(alpha),
        });
        scene.push(Primitive::Text {
            pos: ball.pos + Vec2::new(0.0, 5.0),
            text: ball.id.to_string(),
            color: ID_LABEL_COLOR.with_alpha(ID_LABEL_COLOR.a * alpha),
            size: 14.0,
            centered: true,
        });
    }

    if state.aiming {
        push_reticle(&mut scene, state.reticle, state.reticle_scale);
    }

    scene
}

/// Knocked balls fade down over a short window, then stay dim
fn ball_alpha(ball: &Ball, now: u64) -> f32 {
    let Some(knocked_at) = ball.knocked_at else {
        return 1.0;
    };
    let elapsed = now.saturating_sub(knocked_at);
    if elapsed >= KNOCK_FADE_TICKS {
        return KNOCKED_ALPHA;
    }
    let t = elapsed as f32 / KNOCK_FADE_TICKS as f32;
    1.0 - (1.0 - KNOCKED_ALPHA) * t
}

/// Crosshair: outer ring, four ticks, center dot
fn push_reticle(scene: &mut Scene, center: Vec2, scale: f32) {
    let r = RETICLE_RADIUS * scale;

    scene.push(Primitive::Ring {
        center,
        radius: r,
        color: RETICLE_COLOR,
        width: 2.0,
        dashed: false,
        glow: 10.0,
    });
    for dir in [Vec2::X, Vec2::NEG_X, Vec2::Y, Vec2::NEG_Y] {
        scene.push(Primitive::Line {
            from: center + dir * (r * 0.6),
            to: center + dir * (r * 1.2),
            color: RETICLE_COLOR,
            width: 2.0,
        });
    }
    scene.push(Primitive::Disc {
        center,
        radius: 2.0,
        color: RETICLE_COLOR,
        glow: 0.0,
    });
}
