//! Atom builder mini-game
//!
//! Drag free electrons out of the holding area onto one of four orbit
//! levels until the configuration matches the target, then press "done".

pub mod scene;
pub mod state;
pub mod tick;

pub use state::{AtomPhase, AtomState, Electron, ElectronState};
pub use tick::tick;
