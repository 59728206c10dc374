//! Voxpaint - an interactive voxel placement sandbox
//!
//! Click the ground or a cube face to drop a cube into the grid, shift-click a
//! cube to lift it off and fade it out. An autoplay sequencer traces named
//! paths by placing and then unwinding cubes on a timer.

pub mod core;
pub mod math;
pub mod voxel;
pub mod interaction;
pub mod animation;
pub mod playback;
pub mod scene;
pub mod render;
