pub mod camera;
pub mod config;
pub mod constants;
pub mod direction;
pub mod gene;
pub mod gene_pool;
pub mod metrics;
pub mod rng;
pub mod tile;
pub mod world;

pub use config::{SimConfig, SimParams};
pub use constants::GENE_COMMANDS_COUNT;
pub use direction::Direction;
pub use gene::{Gene, GeneHandle, Instruction, Rgb};
pub use gene_pool::GenePool;
pub use metrics::{RunSummary, StepCounters, StepMetrics};
pub use tile::{Tile, TileKind};
pub use world::World;
