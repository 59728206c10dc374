//! Frame-driven runner for voxel entry and exit transitions

use super::transition::{AnimationTask, TransitionKind};
use crate::voxel::VoxelId;

/// Receives the effects of running transitions
pub trait TransitionSink {
    /// Display a voxel `offset` above its resting cell at the given opacity
    fn apply(&mut self, voxel: VoxelId, offset: f32, opacity: f32);
    /// Flag a voxel as animating or at rest
    fn set_animating(&mut self, voxel: VoxelId, animating: bool);
    /// An exit finished: drop the voxel from the scene and the store
    fn finish_exit(&mut self, voxel: VoxelId);
}

/// Runs at most one transition per voxel, one step per frame
pub struct TransitionAnimator {
    fall_height: f32,
    step: f32,
    tasks: Vec<AnimationTask>,
}

impl TransitionAnimator {
    pub fn new(fall_height: f32, step: f32) -> Self {
        Self {
            fall_height,
            step,
            tasks: Vec::new(),
        }
    }

    /// Frames every transition takes
    pub fn steps_per_transition(&self) -> u32 {
        super::transition::steps_for(self.fall_height, self.step)
    }

    /// Start the entry transition of a freshly placed voxel.
    ///
    /// Returns false if the voxel already has a transition.
    pub fn begin_entry(&mut self, voxel: VoxelId, sink: &mut impl TransitionSink) -> bool {
        if self.kind_of(voxel).is_some() {
            return false;
        }
        let task = AnimationTask::entry(voxel, self.fall_height, self.step);
        sink.set_animating(voxel, true);
        sink.apply(voxel, task.offset, task.opacity());
        self.tasks.push(task);
        true
    }

    /// Start the exit transition of a voxel.
    ///
    /// A voxel already exiting is left alone. A voxel still entering is snapped to rest
    /// first so every exit takes the full step count.
    pub fn begin_exit(&mut self, voxel: VoxelId, sink: &mut impl TransitionSink) -> bool {
        match self.kind_of(voxel) {
            Some(TransitionKind::Exit) => return false,
            Some(TransitionKind::Entry) => {
                self.tasks.retain(|t| t.voxel != voxel);
                sink.apply(voxel, 0.0, 1.0);
                log::trace!("Voxel {} snapped to rest before exit", voxel);
            }
            None => sink.set_animating(voxel, true),
        }
        let task = AnimationTask::exit(voxel, self.fall_height, self.step);
        sink.apply(voxel, task.offset, task.opacity());
        self.tasks.push(task);
        true
    }

    /// Advance every running transition by one frame.
    ///
    /// Returns the number of transitions that completed.
    pub fn advance_frame(&mut self, sink: &mut impl TransitionSink) -> usize {
        let mut completed = 0;
        self.tasks.retain_mut(|task| {
            let finished = task.advance();
            log::trace!("Voxel {} {:?} step {}/{}", task.voxel, task.kind, task.steps_taken, task.total_steps);

            if !finished {
                sink.apply(task.voxel, task.offset, task.opacity());
                return true;
            }

            completed += 1;
            match task.kind {
                TransitionKind::Entry => {
                    sink.apply(task.voxel, task.offset, task.opacity());
                    sink.set_animating(task.voxel, false);
                }
                TransitionKind::Exit => sink.finish_exit(task.voxel),
            }
            false
        });
        completed
    }

    /// Kind of the transition running for a voxel, if any
    pub fn kind_of(&self, voxel: VoxelId) -> Option<TransitionKind> {
        self.tasks.iter().find(|t| t.voxel == voxel).map(|t| t.kind)
    }

    pub fn is_entering(&self, voxel: VoxelId) -> bool {
        self.kind_of(voxel) == Some(TransitionKind::Entry)
    }

    pub fn is_exiting(&self, voxel: VoxelId) -> bool {
        self.kind_of(voxel) == Some(TransitionKind::Exit)
    }

    /// Number of running transitions
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }

    /// Drop every running transition without completing it
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct RecordingSink {
        offsets: HashMap<VoxelId, (f32, f32)>,
        animating: HashSet<VoxelId>,
        exited: Vec<VoxelId>,
    }

    impl TransitionSink for RecordingSink {
        fn apply(&mut self, voxel: VoxelId, offset: f32, opacity: f32) {
            self.offsets.insert(voxel, (offset, opacity));
        }

        fn set_animating(&mut self, voxel: VoxelId, animating: bool) {
            if animating {
                self.animating.insert(voxel);
            } else {
                self.animating.remove(&voxel);
            }
        }

        fn finish_exit(&mut self, voxel: VoxelId) {
            self.animating.remove(&voxel);
            self.offsets.remove(&voxel);
            self.exited.push(voxel);
        }
    }

    fn run_until_idle(animator: &mut TransitionAnimator, sink: &mut RecordingSink) -> u32 {
        let mut frames = 0;
        while animator.in_flight() > 0 {
            animator.advance_frame(sink);
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_entry_starts_high_and_settles() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();
        let id = VoxelId(1);

        assert!(animator.begin_entry(id, &mut sink));
        assert_eq!(sink.offsets[&id], (50.0, 1.0));
        assert!(sink.animating.contains(&id));
        assert!(animator.is_entering(id));

        animator.advance_frame(&mut sink);
        assert_eq!(sink.offsets[&id].0, 45.0);

        assert_eq!(run_until_idle(&mut animator, &mut sink), 9);
        assert_eq!(sink.offsets[&id], (0.0, 1.0));
        assert!(!sink.animating.contains(&id));
    }

    #[test]
    fn test_exit_removes_on_final_step() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();
        let id = VoxelId(1);

        assert!(animator.begin_exit(id, &mut sink));
        for _ in 0..9 {
            animator.advance_frame(&mut sink);
            assert!(sink.exited.is_empty());
        }
        assert_eq!(animator.advance_frame(&mut sink), 1);
        assert_eq!(sink.exited, vec![id]);
        assert_eq!(animator.in_flight(), 0);
    }

    #[test]
    fn test_exit_duration_independent_of_concurrency() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();

        for i in 0..25 {
            animator.begin_entry(VoxelId(100 + i), &mut sink);
        }
        animator.advance_frame(&mut sink);
        animator.begin_exit(VoxelId(1), &mut sink);

        let mut frames = 0;
        while !sink.exited.contains(&VoxelId(1)) {
            animator.advance_frame(&mut sink);
            frames += 1;
        }
        assert_eq!(frames, animator.steps_per_transition());
    }

    #[test]
    fn test_double_exit_is_noop() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();
        let id = VoxelId(1);

        assert!(animator.begin_exit(id, &mut sink));
        animator.advance_frame(&mut sink);
        assert!(!animator.begin_exit(id, &mut sink));
        assert_eq!(animator.in_flight(), 1);

        assert_eq!(run_until_idle(&mut animator, &mut sink), 9);
        assert_eq!(sink.exited, vec![id]);
    }

    #[test]
    fn test_exit_during_entry_snaps_then_takes_full_count() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();
        let id = VoxelId(1);

        animator.begin_entry(id, &mut sink);
        animator.advance_frame(&mut sink);
        animator.advance_frame(&mut sink);

        assert!(animator.begin_exit(id, &mut sink));
        assert_eq!(animator.in_flight(), 1);
        assert!(animator.is_exiting(id));
        assert_eq!(sink.offsets[&id], (0.0, 1.0));
        assert_eq!(run_until_idle(&mut animator, &mut sink), 10);
        assert_eq!(sink.exited, vec![id]);
    }

    #[test]
    fn test_entry_on_animating_voxel_is_refused() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();
        animator.begin_exit(VoxelId(1), &mut sink);
        assert!(!animator.begin_entry(VoxelId(1), &mut sink));
        assert_eq!(animator.in_flight(), 1);
    }

    #[test]
    fn test_clear_drops_tasks() {
        let mut animator = TransitionAnimator::new(50.0, 5.0);
        let mut sink = RecordingSink::default();
        animator.begin_entry(VoxelId(1), &mut sink);
        animator.begin_exit(VoxelId(2), &mut sink);
        animator.clear();
        assert_eq!(animator.in_flight(), 0);
        assert_eq!(animator.advance_frame(&mut sink), 0);
        assert!(sink.exited.is_empty());
    }
}
