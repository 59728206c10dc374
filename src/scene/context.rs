//! The sandbox context: single owner of every piece of scene state.
//!
//! Input handlers, playback ticks and animation frames all run through
//! `SandboxContext` one at a time, so the occupancy store, the scene graph and
//! the animator never disagree.

use std::time::Duration;

use crate::animation::{TransitionAnimator, TransitionSink};
use crate::core::camera::Camera;
use crate::core::input::InputEvent;
use crate::core::types::Result;
use crate::interaction::{Intent, InteractionController, RayPicker};
use crate::playback::{PlaybackSequencer, VoxelSink};
use crate::voxel::{GridCell, Lattice, Material, OccupancyStore, VoxelId};

use super::config::SandboxConfig;
use super::flatten::FlatVoxelEntry;
use super::graph::SceneGraph;

/// Store and scene as seen by running transitions
struct SceneSink<'a> {
    store: &'a mut OccupancyStore,
    scene: &'a mut SceneGraph,
}

impl TransitionSink for SceneSink<'_> {
    fn apply(&mut self, voxel: VoxelId, offset: f32, opacity: f32) {
        self.scene.set_offset(voxel, offset, opacity);
    }

    fn set_animating(&mut self, voxel: VoxelId, animating: bool) {
        self.store.set_animating(voxel, animating);
    }

    fn finish_exit(&mut self, voxel: VoxelId) {
        self.scene.remove_voxel(voxel);
        self.store.remove(voxel);
    }
}

/// Voxel state that placements and removals touch together
struct VoxelWorld {
    lattice: Lattice,
    store: OccupancyStore,
    scene: SceneGraph,
    animator: TransitionAnimator,
}

impl VoxelWorld {
    /// Add a voxel to the store and the scene and start its entry
    fn place(&mut self, cell: GridCell, material: Material) -> Result<VoxelId> {
        let id = self.store.place(cell, material)?;
        self.scene.add_voxel(id, self.lattice.cell_center(cell), material.color);
        self.animator.begin_entry(id, &mut SceneSink {
            store: &mut self.store,
            scene: &mut self.scene,
        });
        Ok(id)
    }

    /// Start a voxel's exit. Returns false for voxels that are gone or already leaving.
    fn begin_removal(&mut self, id: VoxelId) -> bool {
        if !self.store.contains(id) {
            log::debug!("Removal of vanished voxel {} ignored", id);
            return false;
        }
        self.animator.begin_exit(id, &mut SceneSink {
            store: &mut self.store,
            scene: &mut self.scene,
        })
    }

    fn advance_frame(&mut self) -> usize {
        self.animator.advance_frame(&mut SceneSink {
            store: &mut self.store,
            scene: &mut self.scene,
        })
    }

    fn clear(&mut self) -> usize {
        self.animator.clear();
        self.scene.clear();
        self.store.clear()
    }
}

/// Playback placements use the configured material
struct PlaybackSink<'a> {
    world: &'a mut VoxelWorld,
    material: Material,
}

impl VoxelSink for PlaybackSink<'_> {
    fn place(&mut self, cell: GridCell) -> Option<VoxelId> {
        match self.world.place(cell, self.material) {
            Ok(id) => Some(id),
            Err(e) => {
                log::debug!("Playback placement rejected: {}", e);
                None
            }
        }
    }

    fn remove(&mut self, id: VoxelId) {
        self.world.begin_removal(id);
    }
}

/// One running sandbox scene.
pub struct SandboxContext {
    config: SandboxConfig,
    picker: RayPicker,
    world: VoxelWorld,
    controller: InteractionController,
    sequencer: PlaybackSequencer,
    camera: Camera,
    /// Time since the context was created, advanced only by `advance`
    clock: Duration,
    torn_down: bool,
}

impl SandboxContext {
    /// Create a sandbox from a configuration. Autoplay, if enabled, ticks first one
    /// interval from now.
    pub fn new(config: SandboxConfig, aspect: f32) -> Result<Self> {
        config.validate()?;

        let lattice = Lattice::new(config.cell_width);
        let world = VoxelWorld {
            lattice,
            store: OccupancyStore::new(),
            scene: SceneGraph::new(config.cell_width, config.preview_color, config.preview_opacity),
            animator: TransitionAnimator::new(config.fall_height(), config.fall_step()),
        };

        let mut sequencer = PlaybackSequencer::new(config.paths.clone(), config.tick_interval());
        if config.autoplay {
            sequencer.start(Duration::ZERO);
        }

        log::info!(
            "Sandbox created: cell width {}, {} path(s), {} frame(s) per transition, autoplay {}",
            config.cell_width,
            config.paths.len(),
            world.animator.steps_per_transition(),
            if config.autoplay { "on" } else { "off" }
        );

        Ok(Self {
            picker: RayPicker::new(lattice, config.plane_width),
            controller: InteractionController::new(config.material_policy, config.material),
            camera: config.camera.build(aspect),
            world,
            sequencer,
            config,
            clock: Duration::ZERO,
            torn_down: false,
        })
    }

    /// Handle one input event to completion. Returns what was decided.
    pub fn dispatch(&mut self, event: InputEvent) -> Intent {
        if self.torn_down {
            return Intent::None;
        }

        let world = &self.world;
        let camera = &self.camera;
        let picker = &self.picker;
        let intent = self.controller.handle(
            &event,
            &world.lattice,
            |ndc| {
                let ray = camera.ray_from_ndc(ndc);
                picker.pick(&ray, world.store.all().filter(|v| !world.animator.is_exiting(v.id)))
            },
            |id| world.animator.is_entering(id),
        );

        match intent {
            Intent::None => {}
            Intent::Preview(cell) => {
                // Cells still held by an exiting voxel cannot take a placement yet
                let center = match self.world.store.find_at(cell) {
                    Some(_) => None,
                    None => Some(self.world.lattice.cell_center(cell)),
                };
                self.world.scene.set_preview(center);
            }
            Intent::Place { cell, material } => {
                if let Err(e) = self.world.place(cell, material) {
                    log::warn!("Placement refused: {}", e);
                }
            }
            Intent::Remove(id) => {
                self.world.begin_removal(id);
            }
        }
        intent
    }

    /// Advance the clock by `dt`: run every playback tick now due, then one animation frame.
    ///
    /// Returns the number of playback ticks that ran.
    pub fn advance(&mut self, dt: Duration) -> usize {
        if self.torn_down {
            return 0;
        }
        self.clock += dt;

        let ticks = self.sequencer.poll(self.clock, &mut PlaybackSink {
            world: &mut self.world,
            material: self.config.material,
        });
        let completed = self.world.advance_frame();
        if completed > 0 {
            log::trace!("{} transition(s) completed", completed);
        }
        debug_assert!(self.world.store.check_consistency());
        ticks
    }

    pub fn pause_playback(&mut self) {
        self.sequencer.pause();
    }

    pub fn resume_playback(&mut self) {
        if !self.torn_down {
            self.sequencer.resume(self.clock);
        }
    }

    /// Pause if running, resume if paused. Returns true if playback is now running.
    pub fn toggle_playback(&mut self) -> bool {
        if self.sequencer.is_paused() {
            self.resume_playback();
        } else {
            self.pause_playback();
        }
        !self.sequencer.is_paused()
    }

    /// Remove every voxel immediately, dropping running transitions
    pub fn clear(&mut self) {
        let removed = self.world.clear();
        log::info!("Cleared {} voxel(s)", removed);
    }

    /// Cancel pending work. Later calls to `dispatch` and `advance` do nothing.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.sequencer.pause();
        self.world.animator.clear();
        self.torn_down = true;
        log::info!(
            "Sandbox torn down after {} playback tick(s)",
            self.sequencer.ticks_dispatched()
        );
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Cube instances for the current frame, back to front
    pub fn instances(&self) -> Vec<FlatVoxelEntry> {
        self.world.scene.flatten(self.camera.position)
    }

    /// Consume the pending render request
    pub fn take_render_request(&mut self) -> bool {
        self.world.scene.take_render_request()
    }

    pub fn request_render(&mut self) {
        self.world.scene.request_render();
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }

    pub fn lattice(&self) -> &Lattice {
        &self.world.lattice
    }

    pub fn store(&self) -> &OccupancyStore {
        &self.world.store
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.world.scene
    }

    pub fn animator(&self) -> &TransitionAnimator {
        &self.world.animator
    }

    pub fn sequencer(&self) -> &PlaybackSequencer {
        &self.sequencer
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Camera access for view controls. Requests a frame.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.world.scene.request_render();
        &mut self.camera
    }

    /// Time since creation on the context's clock
    pub fn clock(&self) -> Duration {
        self.clock
    }
}
