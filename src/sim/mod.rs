//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (pipes in spawn order)
//! - No rendering or platform dependencies

pub mod bird;
pub mod collision;
pub mod menu;
pub mod pipe;
pub mod state;
pub mod stream;
pub mod tick;

pub use bird::Bird;
pub use collision::{Rect, circle_intersects_rect};
pub use menu::{Button, ButtonKind, MenuLayout};
pub use pipe::{Oscillation, Pipe};
pub use state::{Difficulty, GameEvent, GamePhase, GameState, Snapshot};
pub use stream::PipeStream;
pub use tick::{TickInput, tick};
