use crate::camera::Camera;
use crate::config::{SimConfig, SimConfigError, SimParams};
use crate::direction::Direction;
use crate::gene::{Gene, GeneHandle, Instruction};
use crate::gene_pool::GenePool;
use crate::metrics::{RunSummary, StepCounters, StepMetrics, collect_step_metrics};
use crate::rng::create_rng;
use crate::tile::Tile;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::{error::Error, fmt};
use tracing::debug;

/// The tile grid together with the gene pool that its organisms run.
pub struct World {
    /// Tunables read at the start of every tick.
    pub params: SimParams,
    pub camera: Camera,
    /// When set, a MOVE by the selected organism drags the selection along.
    pub follow_selection: bool,
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
    genes: GenePool,
    rng: ChaCha12Rng,
    tick: u64,
    energy_maximum: f32,
    alive_tile_count: usize,
    selection: Option<(i32, i32)>,
    counters: StepCounters,
    total_births: usize,
    total_mutations: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentError {
    InvalidSampleEvery,
    TooManySteps { max: usize, actual: usize },
    TooManySamples { max: usize, actual: usize },
}

impl fmt::Display for ExperimentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExperimentError::InvalidSampleEvery => write!(f, "sample_every must be positive"),
            ExperimentError::TooManySteps { max, actual } => {
                write!(f, "steps ({actual}) exceed supported maximum ({max})")
            }
            ExperimentError::TooManySamples { max, actual } => {
                write!(
                    f,
                    "sample count ({actual}) exceeds supported maximum ({max})"
                )
            }
        }
    }
}

impl Error for ExperimentError {}

impl World {
    pub const MAX_EXPERIMENT_STEPS: usize = 10_000_000;
    pub const MAX_EXPERIMENT_SAMPLES: usize = 50_000;

    /// Build an empty grid (no organisms, no genes). Call [`World::regenerate`]
    /// to seed it.
    pub fn new(config: SimConfig) -> Result<Self, WorldInitError> {
        config.validate()?;
        Ok(Self {
            params: config.params,
            camera: Camera::centered_on(config.width, config.height),
            follow_selection: false,
            width: config.width,
            height: config.height,
            tiles: vec![Tile::default(); config.tile_count()],
            genes: GenePool::new(),
            rng: create_rng(config.seed),
            tick: 0,
            energy_maximum: 0.0,
            alive_tile_count: 0,
            selection: None,
            counters: StepCounters::default(),
            total_births: 0,
            total_mutations: 0,
        })
    }

    /// Reset every tile and the gene pool, then scatter organisms of the single
    /// all-PHOTOSYNTH seed species with probability `population_density`.
    pub fn regenerate(&mut self) {
        self.tick = 0;
        let seed_handle = GeneHandle::new(1);
        let density = self.params.population_density;
        let spawn_energy = self.params.spawn_energy;

        let mut seeded = 0usize;
        for tile in self.tiles.iter_mut() {
            *tile = Tile {
                temperature: self.rng.random::<f32>() * 2.0 - 1.0,
                direction: Direction::random(&mut self.rng),
                ..Tile::default()
            };
            if self.rng.random::<f32>() < density {
                tile.energy = spawn_energy;
                tile.gene = seed_handle;
                seeded += 1;
            }
        }

        self.genes.clear();
        let seed = self.genes.add_gene(GeneHandle::NONE, &mut self.rng);
        debug_assert_eq!(seed, seed_handle);
        if let Some(gene) = self.genes.get_mut(seed) {
            gene.fill(Instruction::PHOTOSYNTH);
        }

        self.alive_tile_count = seeded;
        self.energy_maximum = if seeded > 0 { spawn_energy } else { 0.0 };
        self.counters = StepCounters::default();
        debug!(
            seeded,
            tiles = self.tiles.len(),
            width = self.width,
            height = self.height,
            "world regenerated"
        );
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Highest live-tile energy seen during the last tick.
    pub fn energy_maximum(&self) -> f32 {
        self.energy_maximum
    }

    /// Live tiles interpreted during the last tick.
    pub fn alive_tile_count(&self) -> usize {
        self.alive_tile_count
    }

    /// Gene pool slots, including freed ones. Every valid handle is `<=` this.
    pub fn gene_count(&self) -> usize {
        self.genes.slot_count()
    }

    pub fn genes(&self) -> &GenePool {
        &self.genes
    }

    pub fn gene(&self, handle: GeneHandle) -> Option<&Gene> {
        self.genes.get(handle)
    }

    pub fn gene_mut(&mut self, handle: GeneHandle) -> Option<&mut Gene> {
        self.genes.get_mut(handle)
    }

    /// Register a new, zero-filled gene. It is evicted at the end of the next
    /// tick unless some tile refers to it by then.
    pub fn add_gene(&mut self, parent: GeneHandle) -> GeneHandle {
        self.genes.add_gene(parent, &mut self.rng)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at `(x, y)`, wrapping toroidally in both axes.
    pub fn tile_at(&self, x: i32, y: i32) -> &Tile {
        &self.tiles[self.tile_index(x, y)]
    }

    pub fn tile_at_mut(&mut self, x: i32, y: i32) -> &mut Tile {
        let idx = self.tile_index(x, y);
        &mut self.tiles[idx]
    }

    /// Counters from the most recent tick.
    pub fn last_step(&self) -> StepCounters {
        self.counters
    }

    pub(crate) fn tile_index(&self, x: i32, y: i32) -> usize {
        let (x, y) = self.wrap(x, y);
        y as usize * self.width as usize + x as usize
    }

    fn wrap(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.rem_euclid(self.width as i32),
            y.rem_euclid(self.height as i32),
        )
    }

    /// Select the tile under a screen position, as seen through `self.camera`.
    pub fn select_tile(&mut self, screen_pos: [f32; 2], screen_size: [f32; 2]) {
        self.selection = Some(self.camera.screen_to_tile(screen_pos, screen_size));
    }

    /// Select a tile by grid coordinate. No wrapping is applied.
    pub fn select_tile_at(&mut self, x: i32, y: i32) {
        self.selection = Some((x, y));
    }

    pub fn remove_tile_selection(&mut self) {
        self.selection = None;
    }

    /// The selected coordinate, if any and if it lies inside the grid.
    pub fn current_selection(&self) -> Option<(i32, i32)> {
        self.selection.filter(|&(x, y)| {
            (0..self.width as i32).contains(&x) && (0..self.height as i32).contains(&y)
        })
    }

    pub fn selected_tile(&self) -> Option<&Tile> {
        self.current_selection().map(|(x, y)| self.tile_at(x, y))
    }

    pub fn selected_tile_mut(&mut self) -> Option<&mut Tile> {
        self.current_selection().map(|(x, y)| self.tile_at_mut(x, y))
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.begin_tick();
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                self.process_tile(x, y);
            }
        }
        self.end_tick();
    }

    pub fn metrics(&self) -> StepMetrics {
        collect_step_metrics(
            self.tick,
            self.energy_maximum,
            &self.tiles,
            &self.genes,
            self.counters,
        )
    }

    pub fn run_experiment(
        &mut self,
        steps: usize,
        sample_every: usize,
    ) -> Result<RunSummary, ExperimentError> {
        if sample_every == 0 {
            return Err(ExperimentError::InvalidSampleEvery);
        }
        if steps > Self::MAX_EXPERIMENT_STEPS {
            return Err(ExperimentError::TooManySteps {
                max: Self::MAX_EXPERIMENT_STEPS,
                actual: steps,
            });
        }
        let estimated_samples = if steps == 0 {
            0
        } else {
            ((steps - 1) / sample_every) + 1
        };
        if estimated_samples > Self::MAX_EXPERIMENT_SAMPLES {
            return Err(ExperimentError::TooManySamples {
                max: Self::MAX_EXPERIMENT_SAMPLES,
                actual: estimated_samples,
            });
        }

        let births_before = self.total_births;
        let mutations_before = self.total_mutations;
        let mut samples = Vec::with_capacity(estimated_samples);
        for step in 1..=steps {
            self.step();
            if step % sample_every == 0 || step == steps {
                samples.push(self.metrics());
            }
        }
        let final_alive_count = self.tiles.iter().filter(|t| t.is_alive()).count();
        Ok(RunSummary {
            schema_version: 1,
            steps,
            sample_every,
            final_alive_count,
            final_species_count: self.genes.species_count(),
            total_births: self.total_births - births_before,
            total_mutations: self.total_mutations - mutations_before,
            samples,
        })
    }
}

mod phases;
