use super::super::World;
use crate::direction::Direction;
use crate::tile::Tile;
use rand::Rng;

impl World {
    /// Split `parent` (the tile at `(x, y)`) into a random neighbour whose gene
    /// handle differs from its own. Foreign organisms count as free and are
    /// overwritten. Returns `false` when every neighbour carries the same
    /// handle, leaving `parent` untouched.
    pub(in crate::world) fn try_reproduce(&mut self, x: i32, y: i32, parent: &mut Tile) -> bool {
        let mut free = [0usize; Direction::COUNT];
        let mut free_count = 0;
        for dir in Direction::ALL {
            let (dx, dy) = dir.vector();
            let idx = self.tile_index(x + dx, y + dy);
            if self.tiles[idx].gene != parent.gene {
                free[free_count] = idx;
                free_count += 1;
            }
        }
        if free_count == 0 {
            return false;
        }

        let child_idx = free[self.rng.random_range(0..free_count)];
        let direction = Direction::random(&mut self.rng);
        let half = parent.energy / 2.0;

        let mut child_gene = parent.gene;
        if self.rng.random::<f32>() < self.params.mutation_chance {
            if let Some(mutated) = self.genes.mutate(parent.gene, &mut self.rng) {
                child_gene = mutated;
                self.counters.mutations += 1;
            }
        }

        let child = &mut self.tiles[child_idx];
        child.eaten_food_count = 0;
        child.photosynth_count = 0;
        child.gene = child_gene;
        child.energy += half;
        child.direction = direction;
        child.processed = true;
        parent.energy = half;

        self.genes.add_reference(child_gene);
        self.counters.births += 1;
        true
    }
}
