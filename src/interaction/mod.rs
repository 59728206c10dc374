//! Pointer picking and the interaction controller

pub mod pick;
pub mod controller;

pub use controller::{Intent, InteractionController, MaterialPolicy};
pub use pick::{PickResult, PickTarget, RayPicker};
