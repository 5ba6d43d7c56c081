//! Per-frame advance for the atom builder
//!
//! One call per animation frame: apply this frame's input events, then
//! advance the idle/orbit animations and the celebration pulse.

use glam::Vec2;

use super::state::{
    AtomPhase, AtomState, CELEBRATION_TICKS, CENTER, DragGrip, DRAGGED_RADIUS, ELECTRON_RADIUS,
    ElectronState, HOLDING_AREA, ORBIT_BAND, ORBIT_RADII, OSC_PHASE_STEP, PULSE_MAX, PULSE_MIN,
    PULSE_STEP, SHAKE_TICKS, jitter_offset, orbit_speed,
};
use crate::geom::hit_circle;
use crate::input::{FrameInput, InputEvent};
use crate::polar_offset;

/// Advance the session by one frame
pub fn tick(state: &mut AtomState, input: &FrameInput) {
    state.time_ticks += 1;
    state.shake_ticks = state.shake_ticks.saturating_sub(1);

    // Input only matters while building; from the win onward the session
    // is frozen apart from the idle animation
    if state.phase == AtomPhase::Building {
        for event in &input.events {
            match *event {
                InputEvent::PointerDown(p) => pointer_down(state, p),
                InputEvent::PointerMove(p) => pointer_move(state, p),
                InputEvent::PointerUp(p) => pointer_up(state, p),
                InputEvent::CheckRequested => check_goal(state),
                _ => {}
            }
        }
    }

    advance_entities(state);
    advance_celebration(state);
}

/// Pick the first electron (insertion order) under the pointer
fn pointer_down(state: &mut AtomState, p: Vec2) {
    if state.drag.is_some() {
        return;
    }
    let Some(index) = state
        .electrons
        .iter()
        .position(|e| hit_circle(p, e.pos, e.radius))
    else {
        return;
    };

    let e = &mut state.electrons[index];
    state.drag = Some(DragGrip {
        index,
        grab_offset: p - e.pos,
    });
    // Leaving an orbit frees its slot immediately
    e.state = ElectronState::Dragged;
    e.radius = DRAGGED_RADIUS;
}

fn pointer_move(state: &mut AtomState, p: Vec2) {
    if let Some(grip) = state.drag {
        state.electrons[grip.index].pos = p - grip.grab_offset;
    }
}

/// Drop: commit to an orbit level if inside a band with room, otherwise
/// revert to free (teleporting back into the holding area if needed)
fn pointer_up(state: &mut AtomState, p: Vec2) {
    let Some(grip) = state.drag.take() else {
        return;
    };

    let drop_pos = p - grip.grab_offset;
    let offset = drop_pos - CENTER;
    let dist = offset.length();

    // First matching band wins; bands touch at their edges so the lower
    // level takes the shared boundary
    let target = ORBIT_RADII
        .iter()
        .position(|&r| (dist - r).abs() <= ORBIT_BAND)
        .filter(|&level| state.level_has_room(level));

    match target {
        Some(level) => {
            let speed = orbit_speed(&mut state.rng);
            let e = &mut state.electrons[grip.index];
            e.state = ElectronState::Placed { level };
            e.angle = offset.y.atan2(offset.x);
            e.speed = speed;
            e.pos = drop_pos;
            e.anchor = drop_pos;
            e.radius = ELECTRON_RADIUS;
        }
        None => {
            let final_pos = if HOLDING_AREA.contains(drop_pos) {
                drop_pos
            } else {
                HOLDING_AREA.random_point_inside(&mut state.rng)
            };
            let e = &mut state.electrons[grip.index];
            e.state = ElectronState::Free;
            e.pos = final_pos;
            e.anchor = final_pos;
            e.radius = ELECTRON_RADIUS;
        }
    }
}

fn check_goal(state: &mut AtomState) {
    if state.goal_met() {
        log::info!("Configuration matched - celebrating (seed {})", state.seed);
        state.phase = AtomPhase::Celebrating {
            ticks_left: CELEBRATION_TICKS,
        };
    } else if !state.reduced_motion {
        state.shake_ticks = SHAKE_TICKS;
    }
}

/// One animation step for every electron not held by the pointer
fn advance_entities(state: &mut AtomState) {
    let pulse = state.pulse_scale;
    for e in &mut state.electrons {
        match e.state {
            ElectronState::Dragged => {}
            ElectronState::Placed { level } => {
                e.angle += e.speed;
                e.pos = CENTER + polar_offset(ORBIT_RADII[level] * pulse, e.angle);
            }
            ElectronState::Free => {
                e.osc_phase += OSC_PHASE_STEP;
                e.pos = e.anchor + jitter_offset(e.osc_phase);
            }
        }
    }
}

/// Step the win pulse; restore geometry when the countdown runs out
fn advance_celebration(state: &mut AtomState) {
    let AtomPhase::Celebrating { ticks_left } = state.phase else {
        return;
    };

    if !state.reduced_motion {
        if state.pulse_growing {
            state.pulse_scale += PULSE_STEP;
            if state.pulse_scale >= PULSE_MAX {
                state.pulse_growing = false;
            }
        } else {
            state.pulse_scale -= PULSE_STEP;
            if state.pulse_scale <= PULSE_MIN {
                state.pulse_growing = true;
            }
        }
    }

    let remaining = ticks_left.saturating_sub(1);
    if remaining == 0 {
        state.pulse_scale = 1.0;
        state.pulse_growing = true;
        state.phase = AtomPhase::Complete;
        log::info!("Celebration finished - session complete");
    } else {
        state.phase = AtomPhase::Celebrating {
            ticks_left: remaining,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::state::{Electron, ORBIT_CAPACITY, TARGET_CONFIG};
    use crate::input::HeldDirs;
    use proptest::prelude::*;

    fn frame(events: Vec<InputEvent>) -> FrameInput {
        FrameInput {
            events,
            held: HeldDirs::default(),
        }
    }

    fn winning_state() -> AtomState {
        let mut state = AtomState::new(5);
        state.electrons.clear();
        for (level, &count) in TARGET_CONFIG.iter().enumerate() {
            for i in 0..count {
                let e = Electron::placed_on(level, i as f32, &mut state.rng);
                state.electrons.push(e);
            }
        }
        state
    }

    /// Drag the electron at `index` and drop it at `target`
    fn drag_to(state: &mut AtomState, index: usize, target: Vec2) {
        let start = state.electrons[index].pos;
        tick(state, &frame(vec![InputEvent::PointerDown(start)]));
        assert!(state.drag.is_some(), "pick failed at {start}");
        tick(state, &frame(vec![InputEvent::PointerUp(target)]));
    }

    #[test]
    fn test_idle_oscillation_advances_one_step() {
        let mut state = AtomState::new(3);
        let index = state
            .electrons
            .iter()
            .position(|e| e.state == ElectronState::Free)
            .unwrap();
        let anchor = state.electrons[index].anchor;
        let phase = state.electrons[index].osc_phase;

        tick(&mut state, &FrameInput::default());

        let expected = anchor + jitter_offset(phase + OSC_PHASE_STEP);
        assert_eq!(state.electrons[index].pos, expected);
    }

    #[test]
    fn test_dragged_electron_skips_animation() {
        let mut state = AtomState::new(3);
        let index = state
            .electrons
            .iter()
            .position(|e| e.state == ElectronState::Free)
            .unwrap();
        let start = state.electrons[index].pos;
        tick(&mut state, &frame(vec![InputEvent::PointerDown(start)]));
        assert_eq!(state.drag.unwrap().index, index);

        // Held electron stays put while everything else animates
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.electrons[index].pos, start);
        assert_eq!(state.electrons[index].radius, DRAGGED_RADIUS);
    }

    #[test]
    fn test_pick_favors_insertion_order() {
        let mut state = AtomState::new(3);
        state.electrons.clear();
        let p = Vec2::new(300.0, 440.0);
        let a = Electron::free_at(p, &mut state.rng);
        let b = Electron::free_at(p + Vec2::new(2.0, 0.0), &mut state.rng);
        state.electrons.push(a);
        state.electrons.push(b);

        tick(&mut state, &frame(vec![InputEvent::PointerDown(p)]));
        assert_eq!(state.drag.unwrap().index, 0);
    }

    #[test]
    fn test_pointer_move_follows_grab_offset() {
        let mut state = AtomState::new(3);
        state.electrons.clear();
        let pos = Vec2::new(300.0, 440.0);
        let e = Electron::free_at(pos, &mut state.rng);
        state.electrons.push(e);

        // Grab 3 px right of center, move, and the offset is preserved
        let grab = pos + Vec2::new(3.0, 0.0);
        tick(&mut state, &frame(vec![InputEvent::PointerDown(grab)]));
        let dest = Vec2::new(500.0, 300.0);
        tick(&mut state, &frame(vec![InputEvent::PointerMove(dest)]));
        assert_eq!(state.electrons[0].pos, dest - Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_drop_in_band_places_electron() {
        let mut state = AtomState::new(3);
        state.electrons.clear();
        let e = Electron::free_at(Vec2::new(300.0, 440.0), &mut state.rng);
        state.electrons.push(e);

        // 80 px right of center lands exactly on level 1
        drag_to(&mut state, 0, CENTER + Vec2::new(80.0, 0.0));
        assert_eq!(state.electrons[0].state, ElectronState::Placed { level: 1 });
        assert_eq!(state.count_on_level(1), 1);
        assert!(state.electrons[0].speed >= 0.01 && state.electrons[0].speed < 0.02);
        assert_eq!(state.electrons[0].radius, ELECTRON_RADIUS);
    }

    #[test]
    fn test_drop_on_full_level_rejected() {
        let mut state = AtomState::new(3);
        state.electrons.clear();
        for i in 0..2 {
            let e = Electron::placed_on(0, i as f32, &mut state.rng);
            state.electrons.push(e);
        }
        let e = Electron::free_at(Vec2::new(300.0, 440.0), &mut state.rng);
        state.electrons.push(e);

        // Level 0 is at capacity (2); the drop must bounce back to free
        drag_to(&mut state, 2, CENTER + Vec2::new(40.0, 0.0));
        assert_eq!(state.electrons[2].state, ElectronState::Free);
        assert_eq!(state.count_on_level(0), 2);
    }

    #[test]
    fn test_drop_outside_everything_relocates_into_holding() {
        let mut state = AtomState::new(3);
        state.electrons.clear();
        let e = Electron::free_at(Vec2::new(300.0, 440.0), &mut state.rng);
        state.electrons.push(e);

        // Far corner: outside all orbit bands and outside the holding rect
        drag_to(&mut state, 0, Vec2::new(20.0, 20.0));
        let e = &state.electrons[0];
        assert_eq!(e.state, ElectronState::Free);
        // The relocated anchor is strictly inside the holding rect; the
        // freed electron has already taken one jitter step around it
        assert!(e.anchor.x > HOLDING_AREA.x && e.anchor.x < HOLDING_AREA.x + HOLDING_AREA.width);
        assert!(e.anchor.y > HOLDING_AREA.y && e.anchor.y < HOLDING_AREA.y + HOLDING_AREA.height);
        assert_eq!(e.pos, e.anchor + jitter_offset(e.osc_phase));
    }

    #[test]
    fn test_drop_between_bands_stays_where_dropped() {
        let mut state = AtomState::new(3);
        state.electrons.clear();
        let e = Electron::free_at(Vec2::new(300.0, 440.0), &mut state.rng);
        state.electrons.push(e);

        // dist 200 from center: outside every band, inside the holding rect
        let target = Vec2::new(400.0, 410.0);
        drag_to(&mut state, 0, target);
        let e = &state.electrons[0];
        assert_eq!(e.state, ElectronState::Free);
        // Anchored where it was dropped, jittering around that point
        assert_eq!(e.anchor, target);
        assert_eq!(e.pos, e.anchor + jitter_offset(e.osc_phase));
    }

    #[test]
    fn test_failed_check_only_shakes() {
        let mut state = AtomState::new(3);
        let before = state.current_config();
        assert!(!state.goal_met());

        tick(&mut state, &frame(vec![InputEvent::CheckRequested]));
        assert_eq!(state.phase, AtomPhase::Building);
        assert!(state.shake_ticks > 0);
        assert_eq!(state.current_config(), before);
    }

    #[test]
    fn test_failed_check_respects_reduced_motion() {
        let mut state = AtomState::new(3);
        state.reduced_motion = true;
        tick(&mut state, &frame(vec![InputEvent::CheckRequested]));
        assert_eq!(state.shake_ticks, 0);
    }

    #[test]
    fn test_win_pulses_then_restores_geometry() {
        let mut state = winning_state();
        tick(&mut state, &frame(vec![InputEvent::CheckRequested]));
        assert!(matches!(state.phase, AtomPhase::Celebrating { .. }));

        // Mid-celebration the pulse has left 1.0
        for _ in 0..30 {
            tick(&mut state, &FrameInput::default());
        }
        assert!(state.pulse_scale != 1.0);
        assert!(state.pulse_scale >= PULSE_MIN - PULSE_STEP);
        assert!(state.pulse_scale <= PULSE_MAX + PULSE_STEP);

        for _ in 0..CELEBRATION_TICKS {
            tick(&mut state, &FrameInput::default());
        }
        assert_eq!(state.phase, AtomPhase::Complete);
        assert_eq!(state.pulse_scale, 1.0);
    }

    #[test]
    fn test_input_ignored_after_win() {
        let mut state = winning_state();
        tick(&mut state, &frame(vec![InputEvent::CheckRequested]));

        let pos = state.electrons[0].pos;
        tick(&mut state, &frame(vec![InputEvent::PointerDown(pos)]));
        assert!(state.drag.is_none());
    }

    proptest! {
        /// No sequence of drags and drops pushes a level past its capacity
        /// or loses an electron
        #[test]
        fn prop_capacity_never_exceeded(
            drops in prop::collection::vec((0.0f32..800.0, 0.0f32..520.0), 0..60)
        ) {
            let mut state = AtomState::new(8);
            let total = state.electrons.len();
            for (x, y) in drops {
                let Some(i) = state
                    .electrons
                    .iter()
                    .position(|e| e.state == ElectronState::Free)
                else {
                    break;
                };
                let start = state.electrons[i].pos;
                tick(&mut state, &frame(vec![InputEvent::PointerDown(start)]));
                tick(&mut state, &frame(vec![InputEvent::PointerUp(Vec2::new(x, y))]));

                for level in 0..4 {
                    prop_assert!(state.count_on_level(level) <= ORBIT_CAPACITY[level]);
                }
                prop_assert_eq!(state.electrons.len(), total);
            }
        }
    }

    #[test]
    fn test_orbit_animation_uses_pulse_scale() {
        let mut state = winning_state();
        state.pulse_scale = 1.1;
        tick(&mut state, &FrameInput::default());
        let ElectronState::Placed { level } = state.electrons[0].state else {
            panic!("expected placed electron");
        };
        let dist = state.electrons[0].pos.distance(CENTER);
        assert!((dist - ORBIT_RADII[level] * 1.1).abs() < 0.01);
    }
}
