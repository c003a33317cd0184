//! Addressing-mode resolvers.
//!
//! Each mode consumes its operand bytes from the instruction stream,
//! charges its base cycle cost and yields the effective address the
//! handler operates on. The absolute family carries its operand as a
//! 16-byte inline field, and the effective address of the plain
//! absolute modes is the field itself; indirect modes dereference a
//! qword pointer out of the field instead.

use crate::backend::TraceSink;
use crate::bus::Bus;
use crate::emu::Core;
use crate::timing::Cycles;

/// Addressing mode of a decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddrMode {
    /// No operand.
    Implied,
    /// Operates on the accumulator.
    Accumulator,
    /// `a` - 16-byte inline operand field.
    Absolute,
    /// `a,X`
    AbsoluteX,
    /// `a,Y`
    AbsoluteY,
    /// `(a)` - qword pointer in the operand field.
    AbsoluteIndirect,
    /// `(a,X)`
    AbsoluteIndirectX,
    /// `#b`
    ImmediateByte,
    /// `#w`
    ImmediateWord,
    /// `#d`
    ImmediateDWord,
    /// `#q` - reads a qword but consumes a full 16-byte field.
    ImmediateQWord,
    /// `r` - 16-bit signed displacement from the advanced `pc`.
    Relative,
    /// `d,S` - zero-extended byte displacement from `sp`.
    StackRelative,
    /// `(d,S),Y` - qword pointer at `sp + d`, then indexed by `y`.
    StackRelativeIndirectY,
}

impl<B: Bus, S: TraceSink> Core<B, S> {
    /// Consume `bytes` operand bytes and charge `cycles`, returning the
    /// address of the operand field.
    fn advance(&mut self, bytes: u64, cycles: Cycles) -> u64 {
        let field = self.cpu.regs.pc;
        self.cpu.regs.pc = field.wrapping_add(bytes);
        self.cpu.cycles += cycles;
        field
    }

    /// Resolve `mode` to an effective address, or `None` for the modes
    /// that have no memory operand.
    pub(crate) fn resolve(&mut self, mode: AddrMode) -> Option<u64> {
        match mode {
            AddrMode::Implied | AddrMode::Accumulator => None,
            AddrMode::Absolute => Some(self.advance(16, 2)),
            AddrMode::AbsoluteX => {
                let field = self.advance(16, 2);
                Some(field.wrapping_add(self.cpu.regs.x.q()))
            }
            AddrMode::AbsoluteY => {
                let field = self.advance(16, 2);
                Some(field.wrapping_add(self.cpu.regs.y.q()))
            }
            AddrMode::AbsoluteIndirect => {
                let ia = self.advance(16, 4);
                Some(self.bus.read_qword(ia))
            }
            AddrMode::AbsoluteIndirectX => {
                let ia = self.advance(16, 4).wrapping_add(self.cpu.regs.x.q());
                Some(self.bus.read_qword(ia))
            }
            AddrMode::ImmediateByte => Some(self.advance(1, 0)),
            AddrMode::ImmediateWord => Some(self.advance(2, 1)),
            AddrMode::ImmediateDWord => Some(self.advance(4, 1)),
            AddrMode::ImmediateQWord => Some(self.advance(16, 1)),
            AddrMode::Relative => {
                let disp = self.bus.read_word(self.cpu.regs.pc) as i16;
                self.advance(2, 1);
                Some(self.cpu.regs.pc.wrapping_add(disp as i64 as u64))
            }
            AddrMode::StackRelative => {
                let disp = self.bus.read_byte(self.cpu.regs.pc) as u64;
                self.advance(1, 1);
                Some(self.cpu.regs.sp.q().wrapping_add(disp))
            }
            AddrMode::StackRelativeIndirectY => {
                let disp = self.bus.read_byte(self.cpu.regs.pc) as u64;
                self.advance(1, 3);
                let ia = self
                    .bus
                    .read_qword(self.cpu.regs.sp.q().wrapping_add(disp));
                Some(ia.wrapping_add(self.cpu.regs.y.q()))
            }
        }
    }
}
