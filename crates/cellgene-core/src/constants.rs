/// Number of instruction slots in every gene.
pub const GENE_COMMANDS_COUNT: usize = 32;

/// Shallow mutations a lineage may accumulate before the next one forks a new species.
pub const MAX_MUTATION_DEPTH: u16 = 8;

/// Largest accepted grid dimension (tiles). Keeps `width * height` and the
/// signed coordinate math comfortably inside `i32`.
pub const MAX_GRID_DIMENSION: u32 = 4096;

/// Edge length of one tile in screen pixels at zoom 1.0.
pub const TILE_SIZE: f32 = 16.0;

pub const MIN_ZOOM: f32 = 0.01;
pub const MAX_ZOOM: f32 = 10.0;

/// Prime multiplier used to derive per-world seeds from a base seed.
pub const RNG_DERIVATION_PRIME: u64 = 7919;
