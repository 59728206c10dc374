//! Translates pointer and key input into placement, removal and preview intents

use serde::{Deserialize, Serialize};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::core::input::InputEvent;
use crate::core::types::Vec2;
use crate::interaction::pick::PickResult;
use crate::voxel::{GridCell, Lattice, Material, Rgb, VoxelId};

/// How a newly placed voxel gets its material
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialPolicy {
    /// Every voxel uses the configured material
    #[default]
    Fixed,
    /// Every voxel gets a fresh random color
    RandomColor,
}

/// What the owner of the scene should do in response to an input event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    None,
    /// Move the preview indicator to a cell
    Preview(GridCell),
    /// Place a voxel with an entry transition
    Place { cell: GridCell, material: Material },
    /// Begin the exit transition of a voxel
    Remove(VoxelId),
}

/// Interaction state machine: modifier tracking plus pick interpretation.
///
/// Picking is delegated to the caller through a closure so the controller never
/// touches the store.
pub struct InteractionController {
    modifier_active: bool,
    policy: MaterialPolicy,
    material: Material,
    preview: Option<GridCell>,
}

impl InteractionController {
    pub fn new(policy: MaterialPolicy, material: Material) -> Self {
        Self {
            modifier_active: false,
            policy,
            material,
            preview: None,
        }
    }

    /// True while a removal modifier key is held
    pub fn modifier_active(&self) -> bool {
        self.modifier_active
    }

    /// Cell under the preview indicator after the latest pointer move
    pub fn preview(&self) -> Option<GridCell> {
        self.preview
    }

    pub fn policy(&self) -> MaterialPolicy {
        self.policy
    }

    /// Handle one event. `pick` resolves a pointer position to the nearest hit.
    ///
    /// `is_entering` reports voxels whose entry transition is still running; those are
    /// not removable yet.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        lattice: &Lattice,
        mut pick: impl FnMut(Vec2) -> Option<PickResult>,
        is_entering: impl Fn(VoxelId) -> bool,
    ) -> Intent {
        match *event {
            InputEvent::PointerMove { ndc } => match pick(ndc) {
                Some(hit) => {
                    let cell = hit.placement_cell(lattice);
                    self.preview = Some(cell);
                    Intent::Preview(cell)
                }
                None => Intent::None,
            },
            InputEvent::PointerDown { ndc, button: MouseButton::Left } => {
                let Some(hit) = pick(ndc) else {
                    return Intent::None;
                };

                if !self.modifier_active {
                    return Intent::Place {
                        cell: hit.placement_cell(lattice),
                        material: self.next_material(),
                    };
                }

                match hit.removal_target() {
                    Some(id) if is_entering(id) => {
                        log::warn!("Voxel {} is still entering, removal refused", id);
                        Intent::None
                    }
                    Some(id) => Intent::Remove(id),
                    None => Intent::None,
                }
            }
            InputEvent::PointerDown { .. } => Intent::None,
            InputEvent::KeyDown(key) if is_modifier(key) => {
                self.modifier_active = true;
                Intent::None
            }
            InputEvent::KeyUp(key) if is_modifier(key) => {
                self.modifier_active = false;
                Intent::None
            }
            InputEvent::KeyDown(_) | InputEvent::KeyUp(_) => Intent::None,
            InputEvent::FocusLost => {
                self.modifier_active = false;
                Intent::None
            }
        }
    }

    fn next_material(&self) -> Material {
        match self.policy {
            MaterialPolicy::Fixed => self.material,
            MaterialPolicy::RandomColor => Material::new(Rgb::random()),
        }
    }
}

fn is_modifier(key: KeyCode) -> bool {
    matches!(key, KeyCode::ShiftLeft | KeyCode::ShiftRight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::interaction::pick::PickTarget;

    fn lattice() -> Lattice {
        Lattice::new(50.0)
    }

    fn ground_hit() -> PickResult {
        PickResult {
            t: 10.0,
            point: Vec3::new(60.0, 0.0, 10.0),
            normal: Vec3::Y,
            target: PickTarget::Ground,
        }
    }

    fn voxel_hit(id: u64) -> PickResult {
        PickResult {
            t: 10.0,
            point: Vec3::new(25.0, 50.0, 25.0),
            normal: Vec3::Y,
            target: PickTarget::Voxel(VoxelId(id)),
        }
    }

    fn down() -> InputEvent {
        InputEvent::PointerDown { ndc: Vec2::ZERO, button: MouseButton::Left }
    }

    #[test]
    fn test_move_updates_preview() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        let event = InputEvent::PointerMove { ndc: Vec2::ZERO };

        let intent = controller.handle(&event, &lattice(), |_| Some(ground_hit()), |_| false);
        assert_eq!(intent, Intent::Preview(GridCell::new(1, 0, 0)));
        assert_eq!(controller.preview(), Some(GridCell::new(1, 0, 0)));

        let intent = controller.handle(&event, &lattice(), |_| None, |_| false);
        assert_eq!(intent, Intent::None);
    }

    #[test]
    fn test_click_places_with_fixed_material() {
        let material = Material::new(Rgb::from_hex(0x123456));
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, material);

        let intent = controller.handle(&down(), &lattice(), |_| Some(voxel_hit(1)), |_| false);
        assert_eq!(intent, Intent::Place { cell: GridCell::new(0, 1, 0), material });
    }

    #[test]
    fn test_click_on_nothing_does_nothing() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        assert_eq!(controller.handle(&down(), &lattice(), |_| None, |_| false), Intent::None);
    }

    #[test]
    fn test_shift_click_removes_voxel_only() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        controller.handle(&InputEvent::KeyDown(KeyCode::ShiftRight), &lattice(), |_| None, |_| false);
        assert!(controller.modifier_active());

        let intent = controller.handle(&down(), &lattice(), |_| Some(voxel_hit(7)), |_| false);
        assert_eq!(intent, Intent::Remove(VoxelId(7)));

        let intent = controller.handle(&down(), &lattice(), |_| Some(ground_hit()), |_| false);
        assert_eq!(intent, Intent::None);
    }

    #[test]
    fn test_entering_voxel_cannot_be_removed() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        controller.handle(&InputEvent::KeyDown(KeyCode::ShiftLeft), &lattice(), |_| None, |_| false);

        let intent = controller.handle(
            &down(),
            &lattice(),
            |_| Some(voxel_hit(3)),
            |id| id == VoxelId(3),
        );
        assert_eq!(intent, Intent::None);
    }

    #[test]
    fn test_modifier_release_and_other_keys() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        controller.handle(&InputEvent::KeyDown(KeyCode::ShiftLeft), &lattice(), |_| None, |_| false);
        controller.handle(&InputEvent::KeyDown(KeyCode::KeyA), &lattice(), |_| None, |_| false);
        assert!(controller.modifier_active());
        controller.handle(&InputEvent::KeyUp(KeyCode::KeyA), &lattice(), |_| None, |_| false);
        assert!(controller.modifier_active());
        controller.handle(&InputEvent::KeyUp(KeyCode::ShiftLeft), &lattice(), |_| None, |_| false);
        assert!(!controller.modifier_active());
    }

    #[test]
    fn test_focus_loss_drops_modifier() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        controller.handle(&InputEvent::KeyDown(KeyCode::ShiftLeft), &lattice(), |_| None, |_| false);
        controller.handle(&InputEvent::FocusLost, &lattice(), |_| None, |_| false);
        assert!(!controller.modifier_active());

        let intent = controller.handle(&down(), &lattice(), |_| Some(voxel_hit(7)), |_| false);
        assert!(matches!(intent, Intent::Place { .. }));
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut controller = InteractionController::new(MaterialPolicy::Fixed, Material::default());
        let event = InputEvent::PointerDown { ndc: Vec2::ZERO, button: MouseButton::Right };
        let mut picked = false;
        let intent = controller.handle(&event, &lattice(), |_| {
            picked = true;
            Some(ground_hit())
        }, |_| false);
        assert_eq!(intent, Intent::None);
        assert!(!picked);
    }

    #[test]
    fn test_policy_deserializes_snake_case() {
        let policy: MaterialPolicy = serde_json::from_str("\"random_color\"").unwrap();
        assert_eq!(policy, MaterialPolicy::RandomColor);
    }
}
