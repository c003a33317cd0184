//! Architectural state of the 65x64.
//!
//! Everything the processor carries between instructions lives in
//! [`Cpu`]: the register file, the flags, the halt latches and the
//! parked coprocessor request. The struct is a plain value; hosts may
//! own as many independent cores as they like.

use crate::timing::Cycles;
use save_state::{InSaveState, SaveStateDeserializer, SaveStateSerializer};
use save_state_macro::InSaveState;

/// Processor status byte.
///
/// Bit layout matches the value pushed by `PHP` and pulled by `PLP`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, InSaveState)]
pub struct Status(pub u8);

impl Status {
    pub const CARRY: Self = Self(0x01);
    pub const ZERO: Self = Self(0x02);
    pub const IRQ_DISABLE: Self = Self(0x04);
    pub const DECIMAL: Self = Self(0x08);
    pub const TRAP: Self = Self(0x10);
    pub const PARITY: Self = Self(0x20);
    pub const OVERFLOW: Self = Self(0x40);
    pub const NEGATIVE: Self = Self(0x80);

    pub const fn has(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }

    pub fn set_if(&mut self, flag: Self, condition: bool) {
        if condition {
            *self = *self | flag
        } else {
            *self = *self & !flag
        }
    }
}

impl core::ops::BitAnd for Status {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl core::ops::BitOr for Status {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl core::ops::Not for Status {
    type Output = Self;

    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// A 64-bit register with byte, word and dword lanes.
///
/// Narrow writes replace only the selected low lane; the bits above it
/// are preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, InSaveState)]
pub struct Reg(pub u64);

impl Reg {
    pub const fn b(self) -> u8 {
        self.0 as u8
    }

    pub const fn w(self) -> u16 {
        self.0 as u16
    }

    pub const fn d(self) -> u32 {
        self.0 as u32
    }

    pub const fn q(self) -> u64 {
        self.0
    }

    pub fn set_b(&mut self, value: u8) {
        self.0 = (self.0 & !0xff) | value as u64
    }

    pub fn set_w(&mut self, value: u16) {
        self.0 = (self.0 & !0xffff) | value as u64
    }

    pub fn set_d(&mut self, value: u32) {
        self.0 = (self.0 & !0xffff_ffff) | value as u64
    }

    pub fn set_q(&mut self, value: u64) {
        self.0 = value
    }
}

/// The architectural register file.
#[derive(Debug, Clone, PartialEq, Eq, InSaveState)]
pub struct Regs {
    /// Accumulator.
    pub a: Reg,
    /// Accumulator extension, reachable through `TBA`.
    pub b: Reg,
    /// Index register X.
    pub x: Reg,
    /// Index register Y.
    pub y: Reg,
    /// Stack pointer. Pushes write at `sp` and decrement afterwards.
    pub sp: Reg,
    /// Zero-cache register file.
    pub z: [Reg; 128],
    /// Program counter.
    pub pc: u64,
    /// Address of the opcode of the instruction currently executing.
    pub tpc: u64,
    /// Status flags.
    pub status: Status,
}

impl Regs {
    pub fn new() -> Self {
        Self {
            a: Reg::default(),
            b: Reg::default(),
            x: Reg::default(),
            y: Reg::default(),
            sp: Reg(0x0100),
            z: [Reg::default(); 128],
            pc: 0,
            tpc: 0,
            status: Status::IRQ_DISABLE,
        }
    }

    /// Zero-cache register `index`, wrapped into the 128-entry file.
    pub fn zc(&self, index: usize) -> Reg {
        self.z[index & 0x7f]
    }

    pub fn set_zc(&mut self, index: usize, value: Reg) {
        self.z[index & 0x7f] = value
    }
}

impl Default for Regs {
    fn default() -> Self {
        Self::new()
    }
}

/// Why the core stopped executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StopReason {
    /// Not stopped.
    #[default]
    Running,
    /// `STP` retired; only a reset restarts the core.
    Stop,
    /// `WAI` retired; [`resume`](crate::emu::Core::resume) restarts the
    /// core.
    Wait,
    /// `COP` retired; the parked request is waiting to be collected.
    Coprocessor,
}

impl InSaveState for StopReason {
    fn serialize(&self, state: &mut SaveStateSerializer) {
        let tag: u8 = match self {
            Self::Running => 0,
            Self::Stop => 1,
            Self::Wait => 2,
            Self::Coprocessor => 3,
        };
        tag.serialize(state)
    }

    fn deserialize(&mut self, state: &mut SaveStateDeserializer) {
        let mut tag: u8 = 0;
        tag.deserialize(state);
        *self = match tag {
            1 => Self::Stop,
            2 => Self::Wait,
            3 => Self::Coprocessor,
            _ => Self::Running,
        }
    }
}

/// A parked coprocessor request.
///
/// `COP` packs its sub-opcode and inline argument words here and halts
/// the core; the host collects the request with
/// [`take_cop_inst`](crate::emu::Core::take_cop_inst), services it and
/// calls [`resume`](crate::emu::Core::resume).
#[derive(Debug, Clone, PartialEq, Eq, Default, InSaveState)]
pub struct CopInst {
    /// Coprocessor sub-opcode.
    pub op: u8,
    /// Inline argument words, in instruction-stream order.
    pub args: Vec<u16>,
}

/// Complete processor state.
#[derive(Debug, Clone, PartialEq, Eq, InSaveState)]
pub struct Cpu {
    pub regs: Regs,
    /// Latched when a halting instruction retires.
    pub stopped: bool,
    pub stop_reason: StopReason,
    /// Latched by [`interrupt`](crate::emu::Core::interrupt).
    pub interrupted: bool,
    /// Cycles retired since the last reset.
    pub cycles: Cycles,
    /// Parked coprocessor request, if any.
    pub cop: Option<CopInst>,
}

impl Cpu {
    pub fn new() -> Self {
        Self {
            regs: Regs::new(),
            stopped: false,
            stop_reason: StopReason::Running,
            interrupted: false,
            cycles: 0,
            cop: None,
        }
    }

    /// Set N and Z from a word-width result.
    pub fn update_nz_w(&mut self, value: u16) {
        self.regs.status.set_if(Status::ZERO, value == 0);
        self.regs
            .status
            .set_if(Status::NEGATIVE, value & 0x8000 != 0);
    }

    /// Set N and Z from a qword-width result.
    pub fn update_nz_q(&mut self, value: u64) {
        self.regs.status.set_if(Status::ZERO, value == 0);
        self.regs
            .status
            .set_if(Status::NEGATIVE, value & 0x8000_0000_0000_0000 != 0);
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
