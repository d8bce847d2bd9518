use crate::constants::MAX_GRID_DIMENSION;
use serde::{Deserialize, Serialize};

/// Tunables read by every tick. Hosts may edit them between ticks; values are
/// used as-is, so probabilities outside `[0, 1]` simply saturate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Energy gained by one PHOTOSYNTH instruction.
    pub photosynth_energy: f32,
    /// Upkeep subtracted from every live tile each tick.
    pub energy_spending: f32,
    /// A tile reproduces once its energy (after upkeep) exceeds this.
    pub reproduction_energy: f32,
    /// Cost of a successful MOVE.
    pub move_energy: f32,
    /// Probability that a newborn receives a mutated copy of its parent's gene.
    pub mutation_chance: f32,
    /// Probability that a tile is seeded alive on regeneration.
    pub population_density: f32,
    /// Energy given to each tile seeded on regeneration.
    pub spawn_energy: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            photosynth_energy: 0.05,
            energy_spending: 0.04,
            reproduction_energy: 0.8,
            move_energy: 0.01,
            mutation_chance: 0.25,
            population_density: 0.01,
            spawn_energy: 0.05,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for the world's RNG; equal seeds give equal runs.
    pub seed: u64,
    /// Grid width in tiles.
    pub width: u32,
    /// Grid height in tiles.
    pub height: u32,
    pub params: SimParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            width: 128,
            height: 128,
            params: SimParams::default(),
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidWidth => "width must be greater than 0";
    InvalidHeight => "height must be greater than 0";
    GridTooLarge { max: u32, width: u32, height: u32 } => "grid {}x{} exceeds maximum dimension {}", width, height, max;
    NonFiniteParam { name: &'static str } => "{} must be finite", name;
}

impl std::error::Error for SimConfigError {}

impl SimParams {
    fn named(&self) -> [(&'static str, f32); 7] {
        [
            ("photosynth_energy", self.photosynth_energy),
            ("energy_spending", self.energy_spending),
            ("reproduction_energy", self.reproduction_energy),
            ("move_energy", self.move_energy),
            ("mutation_chance", self.mutation_chance),
            ("population_density", self.population_density),
            ("spawn_energy", self.spawn_energy),
        ]
    }

    pub fn validate(&self) -> Result<(), SimConfigError> {
        match self.named().into_iter().find(|(_, value)| !value.is_finite()) {
            Some((name, _)) => Err(SimConfigError::NonFiniteParam { name }),
            None => Ok(()),
        }
    }
}

impl SimConfig {
    pub const MAX_GRID_DIMENSION: u32 = MAX_GRID_DIMENSION;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_grid()?;
        self.params.validate()?;
        Ok(())
    }

    fn validate_grid(&self) -> Result<(), SimConfigError> {
        if self.width == 0 {
            return Err(SimConfigError::InvalidWidth);
        }
        if self.height == 0 {
            return Err(SimConfigError::InvalidHeight);
        }
        if self.width > Self::MAX_GRID_DIMENSION || self.height > Self::MAX_GRID_DIMENSION {
            return Err(SimConfigError::GridTooLarge {
                max: Self::MAX_GRID_DIMENSION,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
