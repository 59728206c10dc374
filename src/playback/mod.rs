//! Autoplay of initials along named coordinate paths

pub mod paths;
pub mod sequencer;

pub use paths::{default_paths, InitialsPath};
pub use sequencer::{Direction, PlaybackSequencer, PlaybackState, Transition, VoxelSink};
