use rand::Rng;
use serde::{Deserialize, Serialize};

/// One of the eight headings a tile can face.
///
/// Discriminants are ordered counter-clockwise starting at `Up`, so turning
/// counter-clockwise is `+1` and clockwise is `-1` modulo 8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    #[default]
    Up = 0,
    UpLeft = 1,
    Left = 2,
    DownLeft = 3,
    Down = 4,
    DownRight = 5,
    Right = 6,
    UpRight = 7,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Direction; Self::COUNT] = [
        Direction::Up,
        Direction::UpLeft,
        Direction::Left,
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
        Direction::Right,
        Direction::UpRight,
    ];

    /// Grid offsets, indexed by discriminant. `y` grows downwards.
    const VECTORS: [(i32, i32); Self::COUNT] = [
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
    ];

    const NAMES: [&'static str; Self::COUNT] = [
        "Up",
        "Up-Left",
        "Left",
        "Down-Left",
        "Down",
        "Down-Right",
        "Right",
        "Up-Right",
    ];

    /// Direction for an arbitrary index, wrapped modulo 8.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::COUNT]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn vector(self) -> (i32, i32) {
        Self::VECTORS[self.index()]
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    pub fn rotate_cw(self) -> Self {
        Self::from_index(self.index() + Self::COUNT - 1)
    }

    pub fn rotate_ccw(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::COUNT)]
    }
}
