//! Gameplay simulation
//!
//! All gameplay logic lives here. Nothing in this module draws or reads
//! devices:
//! - Time comes in as a millisecond timestamp per frame
//! - Input comes in as `InputEvent`s
//! - Platform fields come from a seeded RNG

pub mod autopilot;
pub mod camera;
pub mod collision;
pub mod easing;
pub mod events;
pub mod field;
pub mod level;
pub mod player;
pub mod state;
pub mod ticker;

pub use autopilot::Autopilot;
pub use camera::Camera;
pub use collision::{find_landing, lands_on, segments_intersect};
pub use easing::{ease_in_quad, ease_out_quad, linear};
pub use events::{EventBus, Handler, handler};
pub use field::{generate_platforms, max_platforms};
pub use level::Level;
pub use player::Player;
pub use state::{GameEventKind, GameOutcome, GamePhase, JumpPhase, Platform, PlayerMove};
pub use ticker::{Clock, FrameTicker, ManualClock, SystemClock};
