use super::super::World;
use crate::metrics::StepCounters;
use tracing::trace;

impl World {
    /// Clear per-tick state: gene reference counts, tile visit flags and the
    /// statistics accumulated by the previous tick.
    pub(in crate::world) fn begin_tick(&mut self) {
        self.genes.reset_reference_counts();
        self.energy_maximum = 0.0;
        self.alive_tile_count = 0;
        self.counters = StepCounters::default();
        for tile in &mut self.tiles {
            tile.processed = false;
        }
    }

    /// Free genes no live tile referenced and advance the tick counter.
    pub(in crate::world) fn end_tick(&mut self) {
        self.counters.evicted_genes = self.genes.evict_unreferenced();
        self.total_births += self.counters.births;
        self.total_mutations += self.counters.mutations;
        self.tick += 1;
        trace!(
            tick = self.tick,
            alive = self.alive_tile_count,
            births = self.counters.births,
            deaths = self.counters.overcrowding_deaths + self.counters.starvation_deaths,
            evicted = self.counters.evicted_genes,
            live_genes = self.genes.live_count(),
            "tick complete"
        );
    }
}
