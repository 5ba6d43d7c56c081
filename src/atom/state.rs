//! Atom builder state and rules

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::geom::Rect;
use crate::polar_offset;
use crate::scene::Color;
use crate::ticks_for_secs;

/// Nucleus position (canvas center, shifted up to leave room for the
/// holding area)
pub const CENTER: Vec2 = Vec2::new(400.0, 210.0);

/// Display radius of each orbit level
pub const ORBIT_RADII: [f32; 4] = [40.0, 80.0, 120.0, 160.0];

/// Ring color of each orbit level
pub const ORBIT_COLORS: [Color; 4] = [
    Color::rgb(0.0, 1.0, 1.0),
    Color::rgb(0.0, 1.0, 0.0),
    Color::rgb(1.0, 0.47, 0.0),
    Color::rgb(0.8, 0.0, 1.0),
];

/// Maximum electrons a level accepts. Independent of the win target:
/// level 2 holds up to 18 even though the puzzle only wants 10 there.
pub const ORBIT_CAPACITY: [usize; 4] = [2, 8, 18, 32];

/// Per-level electron counts that win the puzzle
pub const TARGET_CONFIG: [usize; 4] = [2, 8, 10, 2];

/// Where unplaced electrons live and idle-jitter
pub const HOLDING_AREA: Rect = Rect::new(100.0, 400.0, 600.0, 80.0);

/// Half-width of the snap band around each orbit radius
pub const ORBIT_BAND: f32 = 20.0;

/// Electron draw/hit radius, enlarged while dragged
pub const ELECTRON_RADIUS: f32 = 8.0;
pub const DRAGGED_RADIUS: f32 = 12.0;

/// Idle jitter: phase step per frame and pixel amplitude
pub const OSC_PHASE_STEP: f32 = 0.05;
pub const OSC_AMPLITUDE: f32 = 3.0;

/// Win celebration: orbit radii pulse between these scales, stepping
/// per frame, for a fixed duration
pub const PULSE_MIN: f32 = 0.9;
pub const PULSE_MAX: f32 = 1.1;
pub const PULSE_STEP: f32 = 0.01;
pub const CELEBRATION_TICKS: u32 = ticks_for_secs(3.0);

/// Cosmetic shake after a failed goal check
pub const SHAKE_TICKS: u32 = ticks_for_secs(0.5);

/// Idle jitter offset for a given oscillation phase
#[inline]
pub fn jitter_offset(phase: f32) -> Vec2 {
    Vec2::new(
        phase.sin() * OSC_AMPLITUDE,
        (phase * 0.7).cos() * OSC_AMPLITUDE,
    )
}

/// Where an electron currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectronState {
    /// In the holding area, idle-jittering around its anchor
    Free,
    /// Orbiting the nucleus on the given level
    Placed { level: usize },
    /// Held by the pointer; exempt from animation
    Dragged,
}

/// A single electron
#[derive(Debug, Clone)]
pub struct Electron {
    pub pos: Vec2,
    /// Center of the idle jitter while free
    pub anchor: Vec2,
    /// Orbit angle (radians) while placed
    pub angle: f32,
    /// Angular step per frame while placed, frozen at commit
    pub speed: f32,
    pub osc_phase: f32,
    pub radius: f32,
    pub state: ElectronState,
}

impl Electron {
    /// Free electron jittering around `pos`
    pub fn free_at(pos: Vec2, rng: &mut Pcg32) -> Self {
        Self {
            pos,
            anchor: pos,
            angle: 0.0,
            speed: 0.0,
            osc_phase: rng.random::<f32>() * std::f32::consts::TAU,
            radius: ELECTRON_RADIUS,
            state: ElectronState::Free,
        }
    }

    /// Electron already orbiting on `level` at `angle`
    pub fn placed_on(level: usize, angle: f32, rng: &mut Pcg32) -> Self {
        let pos = CENTER + polar_offset(ORBIT_RADII[level], angle);
        Self {
            pos,
            anchor: pos,
            angle,
            speed: orbit_speed(rng),
            osc_phase: rng.random::<f32>() * std::f32::consts::TAU,
            radius: ELECTRON_RADIUS,
            state: ElectronState::Placed { level },
        }
    }
}

/// Fresh angular speed for a newly placed electron
pub fn orbit_speed(rng: &mut Pcg32) -> f32 {
    0.01 + rng.random::<f32>() * 0.01
}

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtomPhase {
    /// Normal play: dragging, dropping, goal checks
    Building,
    /// Win animation: orbit radii pulse for the remaining ticks
    Celebrating { ticks_left: u32 },
    /// Terminal: message shown, input ignored, idle animation continues
    Complete,
}

/// An in-progress drag: which electron and where the pointer grabbed it
#[derive(Debug, Clone, Copy)]
pub struct DragGrip {
    pub index: usize,
    pub grab_offset: Vec2,
}

/// Complete atom builder session state
#[derive(Debug, Clone)]
pub struct AtomState {
    pub seed: u64,
    pub rng: Pcg32,
    pub electrons: Vec<Electron>,
    pub phase: AtomPhase,
    pub drag: Option<DragGrip>,
    /// Shared scale applied to all orbit radii during the celebration
    pub pulse_scale: f32,
    pub pulse_growing: bool,
    /// Remaining ticks of the failed-check shake cue
    pub shake_ticks: u32,
    pub time_ticks: u64,
    /// Suppress the shake and pulse cues
    pub reduced_motion: bool,
}

impl AtomState {
    /// New session: a few electrons pre-placed on each level, the rest
    /// scattered in the holding area
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut electrons = Vec::new();

        for level in 0..ORBIT_RADII.len() {
            // Up to 5 pre-placed, never beyond the level's capacity
            let count = rng.random_range(0..=ORBIT_CAPACITY[level].min(5));
            for i in 0..count {
                let angle = std::f32::consts::TAU / count.max(1) as f32 * i as f32;
                let e = Electron::placed_on(level, angle, &mut rng);
                electrons.push(e);
            }
        }

        let free_count = 35 + rng.random_range(0..6);
        for _ in 0..free_count {
            let pos = HOLDING_AREA.random_point_inside(&mut rng);
            let e = Electron::free_at(pos, &mut rng);
            electrons.push(e);
        }

        Self {
            seed,
            rng,
            electrons,
            phase: AtomPhase::Building,
            drag: None,
            pulse_scale: 1.0,
            pulse_growing: true,
            shake_ticks: 0,
            time_ticks: 0,
            reduced_motion: false,
        }
    }

    /// Electrons currently placed on `level` (a dragged electron has
    /// already left its level)
    pub fn count_on_level(&self, level: usize) -> usize {
        self.electrons
            .iter()
            .filter(|e| e.state == ElectronState::Placed { level })
            .count()
    }

    /// Per-level counts in level order
    pub fn current_config(&self) -> [usize; 4] {
        std::array::from_fn(|level| self.count_on_level(level))
    }

    /// Strict capacity check: a level at capacity rejects further placement
    pub fn level_has_room(&self, level: usize) -> bool {
        self.count_on_level(level) < ORBIT_CAPACITY[level]
    }

    /// Exact per-level equality against the target, not "at least"
    pub fn goal_met(&self) -> bool {
        self.current_config() == TARGET_CONFIG
    }

    /// Electrons still in the holding area
    pub fn free_count(&self) -> usize {
        self.electrons
            .iter()
            .filter(|e| e.state == ElectronState::Free)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_config(config: [usize; 4]) -> AtomState {
        let mut state = AtomState::new(1);
        state.electrons.clear();
        for (level, &count) in config.iter().enumerate() {
            for i in 0..count {
                let e = Electron::placed_on(level, i as f32, &mut state.rng);
                state.electrons.push(e);
            }
        }
        state
    }

    #[test]
    fn test_initial_population_ranges() {
        for seed in 0..50 {
            let state = AtomState::new(seed);
            for level in 0..4 {
                let count = state.count_on_level(level);
                assert!(count <= 5);
                // A fresh session already honors the capacity invariant
                assert!(
                    count <= ORBIT_CAPACITY[level],
                    "seed {seed}: level {level} starts with {count} electrons"
                );
            }
            let free = state.free_count();
            assert!((35..=40).contains(&free), "free count {free} out of range");
        }
    }

    #[test]
    fn test_same_seed_same_session() {
        let a = AtomState::new(42);
        let b = AtomState::new(42);
        assert_eq!(a.electrons.len(), b.electrons.len());
        for (ea, eb) in a.electrons.iter().zip(&b.electrons) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.state, eb.state);
        }
    }

    #[test]
    fn test_goal_requires_exact_counts() {
        assert!(state_with_config([2, 8, 10, 2]).goal_met());
        assert!(!state_with_config([2, 8, 10, 1]).goal_met());
        // "At least" is not enough
        assert!(!state_with_config([2, 8, 11, 2]).goal_met());
        assert!(!state_with_config([0, 0, 0, 0]).goal_met());
    }

    #[test]
    fn test_capacity_is_strict() {
        let state = state_with_config([2, 0, 0, 0]);
        assert!(!state.level_has_room(0));
        let state = state_with_config([1, 0, 0, 0]);
        assert!(state.level_has_room(0));
        // Level 2 capacity (18) exceeds its target (10)
        let state = state_with_config([0, 0, 10, 0]);
        assert!(state.level_has_room(2));
    }

    #[test]
    fn test_dragged_electron_leaves_its_level() {
        let mut state = state_with_config([2, 0, 0, 0]);
        state.electrons[0].state = ElectronState::Dragged;
        assert_eq!(state.count_on_level(0), 1);
        assert!(state.level_has_room(0));
    }
}
