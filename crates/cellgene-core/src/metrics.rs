use crate::gene_pool::GenePool;
use crate::tile::{Tile, TileKind};
use serde::{Deserialize, Serialize};

/// Event counts gathered during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCounters {
    /// Tiles interpreted this tick; destinations already handled are not counted.
    pub visited: usize,
    pub births: usize,
    pub mutations: usize,
    pub moves: usize,
    pub overcrowding_deaths: usize,
    pub starvation_deaths: usize,
    pub evicted_genes: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StepMetrics {
    pub tick: u64,
    pub alive_count: usize,
    pub energy_max: f32,
    pub energy_mean: f32,
    pub plant_count: usize,
    pub predator_count: usize,
    pub food_count: usize,
    pub gene_slots: usize,
    pub live_genes: usize,
    pub species_count: usize,
    pub counters: StepCounters,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub steps: usize,
    pub sample_every: usize,
    pub final_alive_count: usize,
    #[serde(default)]
    pub final_species_count: usize,
    #[serde(default)]
    pub total_births: usize,
    #[serde(default)]
    pub total_mutations: usize,
    pub samples: Vec<StepMetrics>,
}

/// Snapshot the grid and gene pool after a tick.
pub fn collect_step_metrics(
    tick: u64,
    energy_max: f32,
    tiles: &[Tile],
    genes: &GenePool,
    counters: StepCounters,
) -> StepMetrics {
    let mut alive_count = 0usize;
    let mut plant_count = 0usize;
    let mut predator_count = 0usize;
    let mut food_count = 0usize;
    let mut energy_sum = 0.0f64;

    for tile in tiles {
        match tile.kind() {
            TileKind::Plant => plant_count += 1,
            TileKind::Predator => predator_count += 1,
            TileKind::Food => food_count += 1,
            TileKind::Empty => {}
        }
        if tile.is_alive() {
            alive_count += 1;
            energy_sum += tile.energy as f64;
        }
    }

    let energy_mean = if alive_count > 0 {
        (energy_sum / alive_count as f64) as f32
    } else {
        0.0
    };

    StepMetrics {
        tick,
        alive_count,
        energy_max,
        energy_mean,
        plant_count,
        predator_count,
        food_count,
        gene_slots: genes.slot_count(),
        live_genes: genes.live_count(),
        species_count: genes.species_count(),
        counters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gene::GeneHandle;

    #[test]
    fn metrics_classify_tiles() {
        let tiles = [
            Tile::default(),
            Tile {
                energy: 0.5,
                ..Tile::default()
            },
            Tile {
                energy: 1.0,
                gene: GeneHandle::new(1),
                photosynth_count: 3,
                ..Tile::default()
            },
            Tile {
                energy: 2.0,
                gene: GeneHandle::new(1),
                eaten_food_count: 1,
                ..Tile::default()
            },
        ];
        let m = collect_step_metrics(3, 2.0, &tiles, &GenePool::new(), StepCounters::default());
        assert_eq!(m.alive_count, 2);
        assert_eq!((m.plant_count, m.predator_count, m.food_count), (1, 1, 1));
        assert!((m.energy_mean - 1.5).abs() < 1e-6);
        assert_eq!(m.live_genes, 0);
    }

    #[test]
    fn legacy_summary_json_gets_schema_default() {
        let json = r#"{"steps": 2, "sample_every": 1, "final_alive_count": 0, "samples": []}"#;
        let summary: RunSummary = serde_json::from_str(json).expect("summary should parse");
        assert_eq!(summary.schema_version, 1);
        assert_eq!(summary.total_births, 0);
    }
}
