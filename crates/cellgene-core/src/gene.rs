use crate::constants::GENE_COMMANDS_COUNT;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable 1-based reference to a gene pool slot. `GeneHandle::NONE` (0) means
/// "no gene": an empty or food tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneHandle(u32);

impl GeneHandle {
    pub const NONE: GeneHandle = GeneHandle(0);

    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    /// Pool slot this handle addresses, or `None` for the reserved handle.
    pub(crate) fn slot(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }

    pub(crate) fn from_slot(slot: usize) -> Self {
        Self(u32::try_from(slot + 1).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for GeneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display colour of a gene. Purely cosmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully saturated, full-value colour for `hue` in turns (`0.0..1.0`).
    pub fn from_hue(hue: f32) -> Self {
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.floor();
        let rising = ((h - sector) * 255.0).round() as u8;
        let falling = 255 - rising;
        match sector as u8 {
            0 => Self::new(255, rising, 0),
            1 => Self::new(falling, 255, 0),
            2 => Self::new(0, 255, rising),
            3 => Self::new(0, falling, 255),
            4 => Self::new(rising, 0, 255),
            _ => Self::new(255, 0, falling),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from_hue(rng.random::<f32>())
    }
}

/// Decoded form of one gene byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Look,
    Move,
    TurnCw,
    TurnCcw,
    Photosynth,
    /// Any byte outside the named set advances the program counter by itself.
    Jump(u8),
}

impl Instruction {
    pub const LOOK: u8 = 0;
    pub const MOVE: u8 = 1;
    pub const TURN_CW: u8 = 2;
    pub const TURN_CCW: u8 = 3;
    pub const PHOTOSYNTH: u8 = 4;

    /// Size of the named opcode set; bytes at or above this value are jumps.
    pub const OPCODE_COUNT: u8 = 5;

    pub fn decode(byte: u8) -> Self {
        match byte {
            Self::LOOK => Instruction::Look,
            Self::MOVE => Instruction::Move,
            Self::TURN_CW => Instruction::TurnCw,
            Self::TURN_CCW => Instruction::TurnCcw,
            Self::PHOTOSYNTH => Instruction::Photosynth,
            other => Instruction::Jump(other),
        }
    }

    pub fn encode(self) -> u8 {
        match self {
            Instruction::Look => Self::LOOK,
            Instruction::Move => Self::MOVE,
            Instruction::TurnCw => Self::TURN_CW,
            Instruction::TurnCcw => Self::TURN_CCW,
            Instruction::Photosynth => Self::PHOTOSYNTH,
            Instruction::Jump(offset) => offset,
        }
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Instruction::Look => "LOOK",
            Instruction::Move => "MOVE",
            Instruction::TurnCw => "TURN_CW",
            Instruction::TurnCcw => "TURN_CCW",
            Instruction::Photosynth => "PHOTOSYNTH",
            Instruction::Jump(_) => "JUMP",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Jump(offset) => write!(f, "JUMP +{offset}"),
            other => f.write_str(other.mnemonic()),
        }
    }
}

/// Fixed-length program shared by every tile of one mutation lineage.
///
/// Only the commands (through the editor API), the colour and the per-tick
/// reference count change after creation.
#[derive(Clone, Debug)]
pub struct Gene {
    commands: [u8; GENE_COMMANDS_COUNT],
    handle: GeneHandle,
    parent_handle: GeneHandle,
    mutation_depth: u16,
    color: Rgb,
    pub(crate) reference_count: u32,
}

impl Gene {
    pub(crate) fn new(handle: GeneHandle, parent_handle: GeneHandle, color: Rgb) -> Self {
        Self {
            commands: [0; GENE_COMMANDS_COUNT],
            handle,
            parent_handle,
            mutation_depth: 0,
            color,
            reference_count: 0,
        }
    }

    pub fn handle(&self) -> GeneHandle {
        self.handle
    }

    /// Species identity: genes with equal parent handles are kin.
    pub fn parent_handle(&self) -> GeneHandle {
        self.parent_handle
    }

    pub fn mutation_depth(&self) -> u16 {
        self.mutation_depth
    }

    pub(crate) fn set_mutation_depth(&mut self, depth: u16) {
        self.mutation_depth = depth;
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// Live tiles counted during the current (or most recent) tick.
    pub fn reference_count(&self) -> u32 {
        self.reference_count
    }

    pub fn commands(&self) -> &[u8; GENE_COMMANDS_COUNT] {
        &self.commands
    }

    pub(crate) fn copy_commands_from(&mut self, other: &Gene) {
        self.commands = other.commands;
    }

    /// Raw byte at `index`, wrapped into the program length.
    pub fn command(&self, index: usize) -> u8 {
        self.commands[index % GENE_COMMANDS_COUNT]
    }

    pub fn instruction(&self, index: usize) -> Instruction {
        Instruction::decode(self.command(index))
    }

    /// Overwrite one slot. Out-of-range indices are ignored.
    pub fn set_command(&mut self, index: usize, command: u8) {
        if let Some(slot) = self.commands.get_mut(index) {
            *slot = command;
        }
    }

    pub fn fill(&mut self, command: u8) {
        self.commands = [command; GENE_COMMANDS_COUNT];
    }

    pub fn is_kin(&self, other: &Gene) -> bool {
        self.parent_handle == other.parent_handle
    }
}
