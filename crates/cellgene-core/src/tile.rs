use crate::direction::Direction;
use crate::gene::GeneHandle;
use serde::{Deserialize, Serialize};

/// Coarse classification of a tile, as shown in the "life forms" view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Empty,
    Food,
    /// Alive, and has photosynthesised at least as often as it has eaten.
    Plant,
    /// Alive, and has eaten more often than it has photosynthesised.
    Predator,
}

/// One grid cell. Tiles are never created or destroyed after the grid is
/// built; only their contents change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Cosmetic, in `[-1, 1]`. Set at regeneration, never touched by ticks.
    pub temperature: f32,
    pub energy: f32,
    pub eaten_food_count: u32,
    pub photosynth_count: u32,
    pub gene: GeneHandle,
    pub direction: Direction,
    pub program_counter: u8,
    #[serde(skip)]
    pub processed: bool,
}

impl Tile {
    pub fn is_alive(&self) -> bool {
        self.gene.is_some()
    }

    pub fn is_food(&self) -> bool {
        self.gene.is_none() && self.energy > 0.0
    }

    pub fn is_empty(&self) -> bool {
        self.gene.is_none() && self.energy <= 0.0
    }

    pub fn kind(&self) -> TileKind {
        if self.is_alive() {
            if self.eaten_food_count > self.photosynth_count {
                TileKind::Predator
            } else {
                TileKind::Plant
            }
        } else if self.energy > 0.0 {
            TileKind::Food
        } else {
            TileKind::Empty
        }
    }

    /// Remove the organism and its lifetime counters, leaving any energy
    /// behind as food.
    pub fn clear_organism(&mut self) {
        self.gene = GeneHandle::NONE;
        self.program_counter = 0;
        self.eaten_food_count = 0;
        self.photosynth_count = 0;
    }

    /// Starvation: nothing, not even food, is left behind.
    pub fn clear(&mut self) {
        self.clear_organism();
        self.energy = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_distinguishes_food_from_empty_space() {
        let mut tile = Tile::default();
        assert_eq!(tile.kind(), TileKind::Empty);
        tile.energy = 0.3;
        assert_eq!(tile.kind(), TileKind::Food);
        tile.gene = GeneHandle::new(1);
        assert_eq!(tile.kind(), TileKind::Plant);
        tile.eaten_food_count = 2;
        tile.photosynth_count = 1;
        assert_eq!(tile.kind(), TileKind::Predator);
    }

    #[test]
    fn clear_organism_leaves_energy_as_food() {
        let mut tile = Tile {
            energy: 0.4,
            eaten_food_count: 3,
            photosynth_count: 5,
            gene: GeneHandle::new(2),
            program_counter: 7,
            ..Tile::default()
        };
        tile.clear_organism();
        assert!(tile.is_food());
        assert_eq!(tile.program_counter, 0);
        assert_eq!((tile.eaten_food_count, tile.photosynth_count), (0, 0));
        tile.clear();
        assert!(tile.is_empty());
    }
}
