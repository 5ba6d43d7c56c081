//! Display list for the atom builder

use glam::Vec2;

use super::state::{
    AtomPhase, AtomState, CENTER, ElectronState, HOLDING_AREA, ORBIT_COLORS, ORBIT_RADII,
};
use crate::scene::{Color, Primitive, Scene};

const NUCLEUS_RADIUS: f32 = 20.0;
const NUCLEUS_INNER: Color = Color::rgb(1.0, 1.0, 0.0);
const NUCLEUS_OUTER: Color = Color::rgb(1.0, 0.0, 0.0);
const FREE_ELECTRON_COLOR: Color = Color::rgb(0.2, 0.6, 1.0);
const HOLDING_OUTLINE: Color = Color::rgba(0.39, 0.39, 1.0, 0.5);
const LABEL_COLOR: Color = Color::rgba(0.78, 0.78, 1.0, 0.7);

/// Build the frame's display list from the current state
pub fn build(state: &AtomState) -> Scene {
    let mut scene = Scene::default();

    // Nucleus
    scene.push(Primitive::GlowDisc {
        center: CENTER,
        radius: NUCLEUS_RADIUS,
        inner: NUCLEUS_INNER,
        outer: NUCLEUS_OUTER,
    });

    // Dashed orbit guides, scaled by the celebration pulse
    for (i, &radius) in ORBIT_RADII.iter().enumerate() {
        scene.push(Primitive::Ring {
            center: CENTER,
            radius: radius * state.pulse_scale,
            color: ORBIT_COLORS[i],
            width: 2.0,
            dashed: true,
            glow: 15.0,
        });
    }

    // Holding area
    scene.push(Primitive::RectOutline {
        rect: HOLDING_AREA,
        color: HOLDING_OUTLINE,
        dashed: true,
    });
    scene.push(Primitive::Text {
        pos: Vec2::new(HOLDING_AREA.x + 10.0, HOLDING_AREA.y - 10.0),
        text: "Free Electrons".to_string(),
        color: LABEL_COLOR,
        size: 14.0,
        centered: false,
    });

    // Electrons, the dragged one last so it paints on top
    let dragged = state.drag.map(|g| g.index);
    for (i, e) in state.electrons.iter().enumerate() {
        if Some(i) != dragged {
            scene.push(electron_disc(e));
        }
    }
    if let Some(i) = dragged {
        scene.push(electron_disc(&state.electrons[i]));
    }

    if state.phase == AtomPhase::Complete {
        scene.push(Primitive::Text {
            pos: Vec2::new(CENTER.x, CENTER.y + ORBIT_RADII[3] + 40.0),
            text: "Configuration restored! Energy stabilized!".to_string(),
            color: Color::WHITE,
            size: 24.0,
            centered: true,
        });
    }

    scene
}

fn electron_disc(e: &super::state::Electron) -> Primitive {
    let color = match e.state {
        ElectronState::Placed { .. } => Color::WHITE,
        _ => FREE_ELECTRON_COLOR,
    };
    Primitive::GlowDisc {
        center: e.pos,
        radius: e.radius,
        inner: color,
        outer: color,
    }
}
