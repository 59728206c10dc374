//! Named coordinate paths typed out by the playback sequencer

use serde::{Deserialize, Serialize};

use crate::voxel::GridCell;

/// An ordered run of cells spelling out one set of initials
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialsPath {
    pub name: String,
    pub cells: Vec<GridCell>,
}

impl InitialsPath {
    pub fn new(name: impl Into<String>, cells: Vec<GridCell>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// "AO" written on the ground layer, one stroke of cells
const AO_CELLS: [(i32, i32); 16] = [
    (-10, 6),
    (-10, 5),
    (-10, 4),
    (-10, 3),
    (-10, 2),
    (-10, 1),
    (-9, 0),
    (-9, -1),
    (-8, -2),
    (-8, -3),
    (-7, -3),
    (-6, -3),
    (-5, -2),
    (-4, -1),
    (-4, 0),
    (-3, 1),
];

/// Built-in path list used when the configuration names none
pub fn default_paths() -> Vec<InitialsPath> {
    let cells = AO_CELLS
        .iter()
        .map(|&(x, z)| GridCell::new(x, 0, z))
        .collect();
    vec![InitialsPath::new("AO", cells)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_path_is_on_ground_layer() {
        let paths = default_paths();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].name, "AO");
        assert_eq!(paths[0].len(), 16);
        assert!(paths[0].cells.iter().all(|c| c.y == 0));
    }

    #[test]
    fn test_default_path_has_no_repeated_cells() {
        let path = &default_paths()[0];
        let unique: HashSet<_> = path.cells.iter().collect();
        assert_eq!(unique.len(), path.len());
    }

    #[test]
    fn test_path_from_json() {
        let path: InitialsPath =
            serde_json::from_str(r#"{"name": "X", "cells": [[0, 0, 0], [1, 0, -1]]}"#).unwrap();
        assert_eq!(path.cells, vec![GridCell::new(0, 0, 0), GridCell::new(1, 0, -1)]);
    }
}
