//! Train motion along a coaster track: pacing modes, a gravity-flavored
//! speed model, wheel rotation, and trailing cart placement.

pub mod config;
pub mod train;

pub use config::{MotionConfig, Pacing};
pub use train::{TrainMotion, DEFAULT_SPEED, MAX_SPEED, MIN_SPEED};
