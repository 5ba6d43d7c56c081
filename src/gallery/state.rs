//! Shooting gallery state and rules

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{VIEW_HEIGHT, VIEW_WIDTH};
use crate::geom::hit_circle;
use crate::scene::Color;

/// Total number of balls on the wall
pub const BALL_TOTAL: u32 = 47;

/// Knocking this subset triggers the special side effect
pub const SPECIAL_IDS: [u32; 4] = [1, 3, 16, 26];

/// Ball colors, drawn at random per ball
pub const PALETTE: [Color; 7] = [
    Color::rgb(1.0, 0.42, 0.42),
    Color::rgb(1.0, 0.82, 0.4),
    Color::rgb(0.02, 0.84, 0.63),
    Color::rgb(0.3, 0.79, 0.94),
    Color::rgb(0.7, 0.55, 1.0),
    Color::rgb(0.97, 0.15, 0.52),
    Color::rgb(1.0, 0.65, 0.0),
];

pub const BALL_RADIUS: f32 = 22.0;

/// Wall layout: wrapped rows with a small per-ball jitter
const BALLS_PER_ROW: u32 = 10;
const ROW_START: Vec2 = Vec2::new(94.0, 80.0);
const COL_SPACING: f32 = 68.0;
const ROW_SPACING: f32 = 72.0;
const LAYOUT_JITTER: f32 = 6.0;

/// Reticle pan speed per held direction key, pixels per frame
pub const RETICLE_STEP: f32 = 4.0;
/// Reticle draw radius at rest
pub const RETICLE_RADIUS: f32 = 26.0;
/// Starting scale of the enlarge animation on aim start
pub const RETICLE_START_SCALE: f32 = 1.6;

/// Ticks a knocked ball takes to fade down
pub const KNOCK_FADE_TICKS: u64 = 30;

/// A targetable ball. Never moves; `knocked` is monotonic.
#[derive(Debug, Clone)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    pub color: Color,
    pub knocked: bool,
    /// Tick of the knock, for the render-side fade cue
    pub knocked_at: Option<u64>,
}

/// Session events the host reacts to (audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryEvent {
    ShotFired,
    SpecialComplete,
    AllClear,
}

/// Complete shooting gallery session state
#[derive(Debug, Clone)]
pub struct GalleryState {
    pub seed: u64,
    pub rng: Pcg32,
    pub balls: Vec<Ball>,
    /// Count of knocked balls; never exceeds `BALL_TOTAL`
    pub score: u32,
    /// Aim key held: reticle visible and pannable
    pub aiming: bool,
    pub reticle: Vec2,
    /// Enlarge animation scale, easing toward 1.0
    pub reticle_scale: f32,
    /// One-shot: the special subset has been completed
    pub special_done: bool,
    /// All balls knocked
    pub cleared: bool,
    /// Completion dialog visible until explicitly dismissed
    pub dialog_open: bool,
    /// Events since the host last drained them
    pub events: Vec<GalleryEvent>,
    pub time_ticks: u64,
    /// Skip the enlarge animation
    pub reduced_motion: bool,
}

impl GalleryState {
    /// New session: lay the wall out in wrapped rows with seeded jitter
    /// and seeded colors
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let balls = (1..=BALL_TOTAL)
            .map(|id| {
                let index = id - 1;
                let col = index % BALLS_PER_ROW;
                let row = index / BALLS_PER_ROW;
                let jitter = Vec2::new(
                    rng.random_range(-LAYOUT_JITTER..LAYOUT_JITTER),
                    rng.random_range(-LAYOUT_JITTER..LAYOUT_JITTER),
                );
                Ball {
                    id,
                    pos: ROW_START
                        + Vec2::new(col as f32 * COL_SPACING, row as f32 * ROW_SPACING)
                        + jitter,
                    radius: BALL_RADIUS,
                    color: PALETTE[rng.random_range(0..PALETTE.len())],
                    knocked: false,
                    knocked_at: None,
                }
            })
            .collect();

        Self {
            seed,
            rng,
            balls,
            score: 0,
            aiming: false,
            reticle: Vec2::new(VIEW_WIDTH / 2.0, VIEW_HEIGHT / 2.0),
            reticle_scale: 1.0,
            special_done: false,
            cleared: false,
            dialog_open: false,
            events: Vec::new(),
            time_ticks: 0,
            reduced_motion: false,
        }
    }

    /// Topmost ball under `point`. Later balls paint on top, so the scan
    /// runs back-to-front; a knocked ball still occludes the ones below.
    pub fn topmost_ball_at(&self, point: Vec2) -> Option<usize> {
        self.balls
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| hit_circle(point, b.pos, b.radius))
            .map(|(i, _)| i)
    }

    /// All special balls knocked
    pub fn special_complete(&self) -> bool {
        SPECIAL_IDS.iter().all(|&id| {
            self.balls
                .iter()
                .any(|b| b.id == id && b.knocked)
        })
    }

    /// Events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<GalleryEvent> {
        std::mem::take(&mut self.events)
    }
}
