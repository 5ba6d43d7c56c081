//! Shooting gallery mini-game
//!
//! Hold the aim key to show the reticle, pan it with the arrow keys,
//! release to fire at a wall of numbered balls.

pub mod scene;
pub mod state;
pub mod tick;

pub use state::{Ball, GalleryEvent, GalleryState};
pub use tick::tick;
