//! Initials playback: types paths out cell by cell, then erases them in reverse

use std::time::Duration;

use super::paths::InitialsPath;
use crate::core::time::IntervalTimer;
use crate::voxel::{GridCell, VoxelId};

/// Where sequencer placements and removals go
pub trait VoxelSink {
    /// Place a voxel with its entry transition. `None` if the cell could not be used.
    fn place(&mut self, cell: GridCell) -> Option<VoxelId>;
    /// Begin the exit transition of a voxel. Unknown ids are ignored.
    fn remove(&mut self, id: VoxelId);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// The move made by one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Type the next cell of the path
    Place,
    /// Erase the most recently typed cell
    Remove,
    /// Fully typed: turn around
    Pivot,
    /// Fully erased: turn around and move to the next path
    Wrap,
}

/// Sequencer counters
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub sequence_index: usize,
    /// Position in the active path, from -1 to the path length inclusive
    pub step_index: i64,
    pub direction: Direction,
    /// Ids placed by the current forward pass, `None` for skipped cells
    pub placed: Vec<Option<VoxelId>>,
}

impl PlaybackState {
    fn reset(&mut self) {
        self.step_index = 0;
        self.direction = Direction::Forward;
        self.placed.clear();
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            sequence_index: 0,
            step_index: 0,
            direction: Direction::Forward,
            placed: Vec::new(),
        }
    }
}

/// Timer-driven state machine cycling forever through a list of paths.
///
/// Time is supplied by the owner as a `Duration` since its epoch.
pub struct PlaybackSequencer {
    paths: Vec<InitialsPath>,
    state: PlaybackState,
    timer: IntervalTimer,
    ticks: u64,
}

impl PlaybackSequencer {
    pub fn new(paths: Vec<InitialsPath>, interval: Duration) -> Self {
        Self {
            paths,
            state: PlaybackState::default(),
            timer: IntervalTimer::new(interval),
            ticks: 0,
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn paths(&self) -> &[InitialsPath] {
        &self.paths
    }

    /// True when there is nothing to play
    pub fn is_inert(&self) -> bool {
        self.paths.is_empty()
    }

    /// Ticks run so far
    pub fn ticks_dispatched(&self) -> u64 {
        self.ticks
    }

    /// True while no tick is scheduled
    pub fn is_paused(&self) -> bool {
        !self.timer.is_armed()
    }

    /// Schedule the first tick one interval after `now`
    pub fn start(&mut self, now: Duration) {
        if self.is_inert() {
            log::info!("No initials paths configured, playback disabled");
            return;
        }
        self.timer.arm(now);
        log::info!("Playback started, one tick every {:?}", self.timer.interval());
    }

    /// Cancel the pending tick. Counters are kept.
    pub fn pause(&mut self) {
        if self.timer.cancel() {
            log::info!("Playback paused at step {}", self.state.step_index);
        }
    }

    /// Schedule a fresh tick one full interval after `now`. No-op if already running.
    pub fn resume(&mut self, now: Duration) {
        if self.is_inert() || self.timer.is_armed() {
            return;
        }
        self.timer.arm(now);
        log::info!("Playback resumed at step {}", self.state.step_index);
    }

    /// Run every tick due at `now`, re-arming after each. Returns how many ran.
    pub fn poll(&mut self, now: Duration, sink: &mut impl VoxelSink) -> usize {
        let mut fired = 0;
        while let Some(deadline) = self.timer.poll(now) {
            self.tick(sink);
            self.timer.arm(deadline);
            fired += 1;
        }
        fired
    }

    /// Choose the transition for the current state, guards checked in order
    fn select(&self, len: i64) -> Option<Transition> {
        let step = self.state.step_index;
        let in_path = (0..len).contains(&step);
        match self.state.direction {
            Direction::Forward if in_path => Some(Transition::Place),
            Direction::Backward if in_path => Some(Transition::Remove),
            _ if step == len => Some(Transition::Pivot),
            Direction::Backward if step <= -1 => Some(Transition::Wrap),
            _ => None,
        }
    }

    /// Advance the state machine by one step
    pub fn tick(&mut self, sink: &mut impl VoxelSink) -> Option<Transition> {
        let len = self.paths.get(self.state.sequence_index)?.len() as i64;
        self.ticks += 1;

        let Some(transition) = self.select(len) else {
            log::warn!(
                "Playback in unreachable state {:?} at step {}, restarting path",
                self.state.direction,
                self.state.step_index
            );
            self.state.reset();
            return None;
        };

        match transition {
            Transition::Place => {
                let cell = self.paths[self.state.sequence_index].cells[self.state.step_index as usize];
                let placed = sink.place(cell);
                if placed.is_none() {
                    log::warn!("Playback skipped occupied cell {}", cell);
                }
                self.state.placed.push(placed);
                self.state.step_index += 1;
            }
            Transition::Remove => {
                if let Some(id) = self.state.placed.pop().flatten() {
                    sink.remove(id);
                }
                self.state.step_index -= 1;
            }
            Transition::Pivot => {
                log::debug!("Playback reversing '{}'", self.paths[self.state.sequence_index].name);
                self.state.direction = Direction::Backward;
                self.state.step_index -= 1;
            }
            Transition::Wrap => {
                self.state.reset();
                self.state.sequence_index = (self.state.sequence_index + 1) % self.paths.len();
                log::debug!(
                    "Playback moving to '{}'",
                    self.paths[self.state.sequence_index].name
                );
            }
        }
        Some(transition)
    }
}
