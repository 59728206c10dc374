//! A single voxel's entry or exit transition

use crate::voxel::VoxelId;

/// Direction of a transition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Falls from above onto its resting cell
    Entry,
    /// Rises off its cell and fades, then is removed
    Exit,
}

/// Per-frame state of one running transition.
///
/// `offset` is the vertical displacement above the resting cell. It moves by `step`
/// each frame toward `target` and lands exactly on it after `total_steps` frames.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationTask {
    pub voxel: VoxelId,
    pub kind: TransitionKind,
    pub offset: f32,
    pub target: f32,
    pub step: f32,
    pub steps_taken: u32,
    pub total_steps: u32,
    fall_height: f32,
}

impl AnimationTask {
    pub fn entry(voxel: VoxelId, fall_height: f32, step: f32) -> Self {
        Self::new(voxel, TransitionKind::Entry, fall_height, 0.0, -step, fall_height)
    }

    pub fn exit(voxel: VoxelId, fall_height: f32, step: f32) -> Self {
        Self::new(voxel, TransitionKind::Exit, 0.0, fall_height, step, fall_height)
    }

    fn new(
        voxel: VoxelId,
        kind: TransitionKind,
        offset: f32,
        target: f32,
        step: f32,
        fall_height: f32,
    ) -> Self {
        Self {
            voxel,
            kind,
            offset,
            target,
            step,
            steps_taken: 0,
            total_steps: steps_for(fall_height, step.abs()),
            fall_height,
        }
    }

    /// Advance one frame. Returns true on the final step.
    pub fn advance(&mut self) -> bool {
        self.steps_taken += 1;
        if self.steps_taken >= self.total_steps {
            self.offset = self.target;
            return true;
        }
        self.offset += self.step;
        false
    }

    /// Display opacity: entries are solid, exits fade out as they rise
    pub fn opacity(&self) -> f32 {
        match self.kind {
            TransitionKind::Entry => 1.0,
            TransitionKind::Exit if self.fall_height > 0.0 => {
                (1.0 - self.offset / self.fall_height).clamp(0.0, 1.0)
            }
            TransitionKind::Exit => 0.0,
        }
    }
}

/// Frames needed to cover `distance` at `step` per frame, at least one
pub fn steps_for(distance: f32, step: f32) -> u32 {
    if step <= 0.0 || !step.is_finite() {
        return 1;
    }
    ((distance / step).ceil() as u32).max(1)
}
