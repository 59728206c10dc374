//! Voxel, material and color types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::voxel::grid::GridCell;

/// sRGB color, written `#rrggbb` in configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    /// Parse `#rrggbb` (the `#` is optional)
    pub fn parse(s: &str) -> Result<Self, Error> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return Err(Error::Config(format!("invalid color '{}': expected #rrggbb", s)));
        }
        let hex = u32::from_str_radix(digits, 16)
            .map_err(|e| Error::Config(format!("invalid color '{}': {}", s, e)))?;
        Ok(Self::from_hex(hex))
    }

    /// Uniformly random color
    pub fn random() -> Self {
        Self([fastrand::u8(..), fastrand::u8(..), fastrand::u8(..)])
    }

    /// Linear-space RGB for shading
    pub fn to_linear(self) -> [f32; 3] {
        self.0.map(|c| {
            let c = c as f32 / 255.0;
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Error> {
        Self::parse(&s)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_string()
    }
}

/// Surface appearance attached to a voxel when it is placed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Material {
    pub color: Rgb,
}

impl Material {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(Rgb::from_hex(0xfeb74c))
    }
}

/// Identity of a placed voxel. Never reused within one store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoxelId(pub u64);

impl fmt::Display for VoxelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A live voxel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
    pub id: VoxelId,
    pub cell: GridCell,
    pub material: Material,
    /// True exactly while an entry or exit transition is running
    pub is_animating: bool,
}
