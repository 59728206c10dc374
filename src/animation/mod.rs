//! Entry and exit transitions for placed voxels

pub mod transition;
pub mod animator;

pub use animator::{TransitionAnimator, TransitionSink};
pub use transition::{AnimationTask, TransitionKind};
