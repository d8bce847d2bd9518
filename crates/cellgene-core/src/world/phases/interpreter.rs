use super::super::World;
use crate::constants::GENE_COMMANDS_COUNT;
use crate::gene::{GeneHandle, Instruction};
use crate::tile::Tile;
use tracing::debug;

/// What a tile sees in front of it, relative to its own species.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Sight {
    Empty,
    Food,
    Kin,
    Foreign,
}

impl World {
    fn sight(&self, other: &Tile, species: GeneHandle) -> Sight {
        match self.genes.get(other.gene) {
            Some(gene) if gene.parent_handle() == species => Sight::Kin,
            Some(_) => Sight::Foreign,
            None if other.energy > 0.0 => Sight::Food,
            None => Sight::Empty,
        }
    }

    /// Run one tile's share of a tick: upkeep, reproduction, one instruction
    /// and the death check. Tiles already handled this tick are skipped.
    pub(in crate::world) fn process_tile(&mut self, x: i32, y: i32) {
        let idx = self.tile_index(x, y);
        if self.tiles[idx].processed {
            return;
        }
        self.tiles[idx].processed = true;
        self.counters.visited += 1;

        let mut tile = self.tiles[idx];
        if tile.gene.is_none() {
            return;
        }
        let Some(gene) = self.genes.get(tile.gene) else {
            debug!(x, y, gene = %tile.gene, "tile refers to a missing gene; demoting to food");
            tile.clear_organism();
            tile.energy = tile.energy.max(0.0);
            self.tiles[idx] = tile;
            return;
        };
        let species = gene.parent_handle();
        let commands = *gene.commands();

        self.alive_tile_count += 1;
        self.genes.add_reference(tile.gene);

        let (dx, dy) = tile.direction.vector();
        let front_idx = self.tile_index(x + dx, y + dy);

        tile.energy -= self.params.energy_spending;

        // Overcrowding only drops the gene; the instruction below still runs.
        if tile.energy > self.params.reproduction_energy && !self.try_reproduce(x, y, &mut tile) {
            self.counters.overcrowding_deaths += 1;
            tile.gene = GeneHandle::NONE;
        }

        if tile.energy > self.energy_maximum {
            self.energy_maximum = tile.energy;
        }

        tile.program_counter %= GENE_COMMANDS_COUNT as u8;
        let pc = tile.program_counter;
        match Instruction::decode(commands[pc as usize]) {
            Instruction::Look => {
                let skip = match self.sight(&self.tiles[front_idx], species) {
                    Sight::Empty => 3,
                    Sight::Kin => 2,
                    Sight::Food | Sight::Foreign => 1,
                };
                tile.program_counter = pc.wrapping_add(skip);
            }
            Instruction::Move => {
                let front = self.tiles[front_idx];
                if self.sight(&front, species) == Sight::Kin {
                    tile.program_counter = pc.wrapping_add(2);
                } else {
                    tile.program_counter = pc.wrapping_add(1);
                    tile.energy += front.energy;
                    tile.energy -= self.params.move_energy;
                    if front.energy > 0.0 {
                        tile.eaten_food_count += 1;
                    }
                    self.tiles[front_idx] = tile;

                    if self.follow_selection && self.selection == Some((x, y)) {
                        self.selection = Some(self.wrap(x + dx, y + dy));
                    }

                    tile.clear();
                    self.counters.moves += 1;
                }
            }
            Instruction::TurnCw => {
                tile.direction = tile.direction.rotate_cw();
                tile.program_counter = pc.wrapping_add(1);
            }
            Instruction::TurnCcw => {
                tile.direction = tile.direction.rotate_ccw();
                tile.program_counter = pc.wrapping_add(1);
            }
            Instruction::Photosynth => {
                tile.photosynth_count += 1;
                tile.energy += self.params.photosynth_energy;
                tile.program_counter = pc.wrapping_add(1);
            }
            Instruction::Jump(offset) => {
                tile.program_counter = pc.wrapping_add(offset);
            }
        }

        if tile.energy <= 0.0 {
            if tile.is_alive() {
                self.counters.starvation_deaths += 1;
            }
            tile.clear();
        }
        self.tiles[idx] = tile;
    }
}
