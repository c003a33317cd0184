//! Opcode decode table and instruction semantics.
//!
//! `decode` is the single authoritative opcode map; every legal opcode
//! byte can be enumerated by scanning it. `execute` is the central
//! dispatch the controller drives after the addressing mode has
//! resolved.
//!
//! Width conventions: the arithmetic/logic/shift/load/store group works
//! on the low word lane of its registers, register-to-register
//! transfers (except `TAX`/`TAY`) and the bit test-and-modify pair work
//! on the full qword, and `ADC` accumulates over the full qword with
//! only the operand load sized.

use crate::addr::AddrMode;
use crate::backend::TraceSink;
use crate::bus::{Bus, Size};
use crate::cpu::{CopInst, Status, StopReason};
use crate::emu::{Core, BRK_VECTOR};

/// Operation selector, one variant per handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Adc(Size),
    And,
    Asl,
    AslA,
    Bcc,
    Bcs,
    Beq,
    Bit,
    BitImm,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Brl,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cop,
    Cpx,
    Cpy,
    Dec,
    DecA,
    Dex,
    Dey,
    Eor,
    Inc,
    IncA,
    Inx,
    Iny,
    Jmp,
    Jsl,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    LsrA,
    Mvn,
    Mvp,
    Nop,
    Ora,
    Pea,
    Pei,
    Per,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    Rep,
    Rol,
    RolA,
    Ror,
    RorA,
    Rti,
    Rtl,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sep,
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tas,
    Tax,
    Tay,
    Tba,
    Tcd,
    Tdc,
    Trb,
    Tsa,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Txy,
    Tya,
    Tyx,
    Wai,
}

impl Op {
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Op::Adc(_) => "ADC",
            Op::And => "AND",
            Op::Asl | Op::AslA => "ASL",
            Op::Bcc => "BCC",
            Op::Bcs => "BCS",
            Op::Beq => "BEQ",
            Op::Bit | Op::BitImm => "BIT",
            Op::Bmi => "BMI",
            Op::Bne => "BNE",
            Op::Bpl => "BPL",
            Op::Bra => "BRA",
            Op::Brk => "BRK",
            Op::Brl => "BRL",
            Op::Bvc => "BVC",
            Op::Bvs => "BVS",
            Op::Clc => "CLC",
            Op::Cld => "CLD",
            Op::Cli => "CLI",
            Op::Clv => "CLV",
            Op::Cmp => "CMP",
            Op::Cop => "COP",
            Op::Cpx => "CPX",
            Op::Cpy => "CPY",
            Op::Dec | Op::DecA => "DEC",
            Op::Dex => "DEX",
            Op::Dey => "DEY",
            Op::Eor => "EOR",
            Op::Inc | Op::IncA => "INC",
            Op::Inx => "INX",
            Op::Iny => "INY",
            Op::Jmp => "JMP",
            Op::Jsl => "JSL",
            Op::Jsr => "JSR",
            Op::Lda => "LDA",
            Op::Ldx => "LDX",
            Op::Ldy => "LDY",
            Op::Lsr | Op::LsrA => "LSR",
            Op::Mvn => "MVN",
            Op::Mvp => "MVP",
            Op::Nop => "NOP",
            Op::Ora => "ORA",
            Op::Pea => "PEA",
            Op::Pei => "PEI",
            Op::Per => "PER",
            Op::Pha => "PHA",
            Op::Php => "PHP",
            Op::Phx => "PHX",
            Op::Phy => "PHY",
            Op::Pla => "PLA",
            Op::Plp => "PLP",
            Op::Plx => "PLX",
            Op::Ply => "PLY",
            Op::Rep => "REP",
            Op::Rol | Op::RolA => "ROL",
            Op::Ror | Op::RorA => "ROR",
            Op::Rti => "RTI",
            Op::Rtl => "RTL",
            Op::Rts => "RTS",
            Op::Sbc => "SBC",
            Op::Sec => "SEC",
            Op::Sed => "SED",
            Op::Sei => "SEI",
            Op::Sep => "SEP",
            Op::Sta => "STA",
            Op::Stp => "STP",
            Op::Stx => "STX",
            Op::Sty => "STY",
            Op::Stz => "STZ",
            Op::Tas => "TAS",
            Op::Tax => "TAX",
            Op::Tay => "TAY",
            Op::Tba => "TBA",
            Op::Tcd => "TCD",
            Op::Tdc => "TDC",
            Op::Trb => "TRB",
            Op::Tsa => "TSA",
            Op::Tsb => "TSB",
            Op::Tsx => "TSX",
            Op::Txa => "TXA",
            Op::Txs => "TXS",
            Op::Txy => "TXY",
            Op::Tya => "TYA",
            Op::Tyx => "TYX",
            Op::Wai => "WAI",
        }
    }

    /// Width suffix for size-tagged instructions.
    pub const fn size(self) -> Option<Size> {
        match self {
            Op::Adc(size) => Some(size),
            _ => None,
        }
    }
}

/// A decoded instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instr {
    pub mode: AddrMode,
    pub op: Op,
}

/// Decode an opcode byte, `None` for undefined encodings.
pub const fn decode(opcode: u8) -> Option<Instr> {
    use AddrMode::*;
    use Op::*;
    let (mode, op) = match opcode {
        0x00 => (Implied, Brk),
        0x02 => (ImmediateByte, Cop),
        0x03 => (StackRelative, Ora),
        0x08 => (Implied, Php),
        0x09 => (ImmediateWord, Ora),
        0x0a => (Accumulator, AslA),
        0x0c => (Absolute, Tsb),
        0x0d => (Absolute, Ora),
        0x0e => (Absolute, Asl),
        0x10 => (Relative, Bpl),
        0x13 => (StackRelativeIndirectY, Ora),
        0x18 => (Implied, Clc),
        0x19 => (AbsoluteY, Ora),
        0x1a => (Accumulator, IncA),
        0x1b => (Implied, Tas),
        0x1c => (Absolute, Trb),
        0x1d => (AbsoluteX, Ora),
        0x1e => (AbsoluteX, Asl),
        0x20 => (Absolute, Jsr),
        0x22 => (Absolute, Jsl),
        0x23 => (StackRelative, And),
        0x28 => (Implied, Plp),
        0x29 => (ImmediateWord, And),
        0x2a => (Accumulator, RolA),
        0x2c => (Absolute, Bit),
        0x2d => (Absolute, And),
        0x2e => (Absolute, Rol),
        0x30 => (Relative, Bmi),
        0x33 => (StackRelativeIndirectY, And),
        0x38 => (Implied, Sec),
        0x39 => (AbsoluteY, And),
        0x3a => (Accumulator, DecA),
        0x3b => (Implied, Tsa),
        0x3c => (AbsoluteX, Bit),
        0x3d => (AbsoluteX, And),
        0x3e => (AbsoluteX, Rol),
        0x40 => (Implied, Rti),
        0x43 => (StackRelative, Eor),
        0x44 => (ImmediateWord, Mvp),
        0x48 => (Implied, Pha),
        0x49 => (ImmediateWord, Eor),
        0x4a => (Accumulator, LsrA),
        0x4c => (Absolute, Jmp),
        0x4d => (Absolute, Eor),
        0x4e => (Absolute, Lsr),
        0x50 => (Relative, Bvc),
        0x53 => (StackRelativeIndirectY, Eor),
        0x54 => (ImmediateWord, Mvn),
        0x58 => (Implied, Cli),
        0x59 => (AbsoluteY, Eor),
        0x5a => (Implied, Phy),
        0x5b => (Implied, Tcd),
        0x5d => (AbsoluteX, Eor),
        0x5e => (AbsoluteX, Lsr),
        0x60 => (Implied, Rts),
        0x61 => (ImmediateByte, Adc(Size::Byte)),
        0x62 => (Relative, Per),
        0x63 => (StackRelative, Adc(Size::QWord)),
        0x65 => (ImmediateDWord, Adc(Size::DWord)),
        0x68 => (Implied, Pla),
        0x69 => (ImmediateWord, Adc(Size::Word)),
        0x6a => (Accumulator, RorA),
        0x6b => (Implied, Rtl),
        0x6c => (AbsoluteIndirect, Jmp),
        0x6d => (Absolute, Adc(Size::QWord)),
        0x6e => (Absolute, Ror),
        0x70 => (Relative, Bvs),
        0x71 => (ImmediateQWord, Adc(Size::QWord)),
        0x73 => (StackRelativeIndirectY, Adc(Size::QWord)),
        0x78 => (Implied, Sei),
        0x79 => (AbsoluteY, Adc(Size::QWord)),
        0x7a => (Implied, Ply),
        0x7b => (Implied, Tdc),
        0x7c => (AbsoluteIndirectX, Jmp),
        0x7d => (AbsoluteX, Adc(Size::QWord)),
        0x7e => (AbsoluteX, Ror),
        0x80 => (Relative, Bra),
        0x82 => (Relative, Brl),
        0x83 => (StackRelative, Sta),
        0x88 => (Implied, Dey),
        0x89 => (ImmediateWord, BitImm),
        0x8a => (Implied, Txa),
        0x8c => (Absolute, Sty),
        0x8d => (Absolute, Sta),
        0x8e => (Absolute, Stx),
        0x90 => (Relative, Bcc),
        0x93 => (StackRelativeIndirectY, Sta),
        0x98 => (Implied, Tya),
        0x99 => (AbsoluteY, Sta),
        0x9a => (Implied, Txs),
        0x9b => (Implied, Txy),
        0x9c => (Absolute, Stz),
        0x9d => (AbsoluteX, Sta),
        0x9e => (AbsoluteX, Stz),
        0xa0 => (ImmediateWord, Ldy),
        0xa2 => (ImmediateWord, Ldx),
        0xa3 => (StackRelative, Lda),
        0xa8 => (Implied, Tay),
        0xa9 => (ImmediateWord, Lda),
        0xaa => (Implied, Tax),
        0xac => (Absolute, Ldy),
        0xad => (Absolute, Lda),
        0xae => (Absolute, Ldx),
        0xb0 => (Relative, Bcs),
        0xb2 => (AbsoluteIndirect, Lda),
        0xb3 => (StackRelativeIndirectY, Lda),
        0xb8 => (Implied, Clv),
        0xb9 => (AbsoluteY, Lda),
        0xba => (Implied, Tsx),
        0xbb => (Implied, Tyx),
        0xbc => (AbsoluteX, Ldy),
        0xbd => (AbsoluteX, Lda),
        0xbe => (AbsoluteY, Ldx),
        0xc0 => (ImmediateWord, Cpy),
        0xc2 => (ImmediateByte, Rep),
        0xc3 => (StackRelative, Cmp),
        0xc8 => (Implied, Iny),
        0xc9 => (ImmediateWord, Cmp),
        0xca => (Implied, Dex),
        0xcb => (Implied, Wai),
        0xcc => (Absolute, Cpy),
        0xcd => (Absolute, Cmp),
        0xce => (Absolute, Dec),
        0xd0 => (Relative, Bne),
        0xd3 => (StackRelativeIndirectY, Cmp),
        0xd4 => (AbsoluteIndirect, Pei),
        0xd8 => (Implied, Cld),
        0xd9 => (AbsoluteY, Cmp),
        0xda => (Implied, Phx),
        0xdb => (Implied, Stp),
        0xdd => (AbsoluteX, Cmp),
        0xde => (AbsoluteX, Dec),
        0xe0 => (ImmediateWord, Cpx),
        0xe2 => (ImmediateByte, Sep),
        0xe3 => (StackRelative, Sbc),
        0xe8 => (Implied, Inx),
        0xe9 => (ImmediateWord, Sbc),
        0xea => (Implied, Nop),
        0xeb => (Implied, Tba),
        0xec => (Absolute, Cpx),
        0xed => (Absolute, Sbc),
        0xee => (Absolute, Inc),
        0xf0 => (Relative, Beq),
        0xf3 => (StackRelativeIndirectY, Sbc),
        0xf4 => (ImmediateWord, Pea),
        0xf8 => (Implied, Sed),
        0xf9 => (AbsoluteY, Sbc),
        0xfa => (Implied, Plx),
        0xfc => (AbsoluteIndirectX, Jsr),
        0xfd => (AbsoluteX, Sbc),
        0xfe => (AbsoluteX, Inc),
        _ => return None,
    };
    Some(Instr { mode, op })
}

impl<B: Bus, S: TraceSink> Core<B, S> {
    /// Branch to `ea` (truncated to 16 bits) when `taken`.
    fn branch(&mut self, ea: u64, taken: bool) {
        if taken {
            self.cpu.regs.pc = ea as u16 as u64;
            self.cpu.cycles += 3;
        } else {
            self.cpu.cycles += 2;
        }
    }

    /// Word compare. The carry flag reports the borrow of the wrapped
    /// 64-bit difference, so it is set when `reg < data`.
    fn compare_w(&mut self, reg: u16, ea: u64) {
        let data = self.bus.read_word(ea) as u64;
        let temp = (reg as u64).wrapping_sub(data);
        self.cpu
            .regs
            .status
            .set_if(Status::CARRY, temp & 0x10000 != 0);
        self.cpu.update_nz_w(temp as u16);
        self.cpu.cycles += 3;
    }

    /// Qword add with carry. Only the operand load is sized; the
    /// accumulate always spans the full accumulator. Carry and overflow
    /// come from the raw binary sum, the decimal correction runs nibble
    /// by nibble afterwards, and N/Z reflect the stored result.
    fn adc(&mut self, ea: u64, size: Size) {
        let a = self.cpu.regs.a.q();
        let data = size.read(&mut self.bus, ea);
        let carry_in = self.cpu.regs.status.has(Status::CARRY) as u64;
        let (partial, c1) = a.overflowing_add(data);
        let (sum, c2) = partial.overflowing_add(carry_in);
        let overflow = (!(a ^ data)) & (a ^ sum) & 0x8000_0000_0000_0000 != 0;

        let mut temp = sum;
        if self.cpu.regs.status.has(Status::DECIMAL) {
            for nibble in 0..16 {
                let shift = nibble * 4;
                if (temp >> shift) & 0xf > 9 {
                    temp = temp.wrapping_add(6 << shift)
                }
            }
        }

        self.cpu.regs.status.set_if(Status::CARRY, c1 | c2);
        self.cpu.regs.status.set_if(Status::OVERFLOW, overflow);
        self.cpu.regs.a.set_q(temp);
        self.cpu.update_nz_q(temp);
        self.cpu.cycles += 2;
    }

    /// Word subtract with borrow, as an add of the operand complement.
    /// Carry is set when no borrow occurred.
    fn sbc(&mut self, ea: u64) {
        let a = self.cpu.regs.a.w();
        let data = !self.bus.read_word(ea);
        let carry_in = self.cpu.regs.status.has(Status::CARRY) as u32;
        let mut temp = a as u32 + data as u32 + carry_in;

        if self.cpu.regs.status.has(Status::DECIMAL) {
            if temp & 0x000f > 0x0009 {
                temp += 0x0006
            }
            if temp & 0x00f0 > 0x0090 {
                temp += 0x0060
            }
            if temp & 0x0f00 > 0x0900 {
                temp += 0x0600
            }
            if temp & 0xf000 > 0x9000 {
                temp += 0x6000
            }
        }

        self.cpu
            .regs
            .status
            .set_if(Status::CARRY, temp & 0x10000 != 0);
        let overflow = (!(a ^ data)) & (a ^ temp as u16) & 0x8000 != 0;
        self.cpu.regs.status.set_if(Status::OVERFLOW, overflow);
        self.cpu.regs.a.set_w(temp as u16);
        self.cpu.update_nz_w(temp as u16);
        self.cpu.cycles += 3;
    }

    /// Capture a coprocessor request and halt. The instruction stream
    /// carries `[size][op][size x u16 args]` after the opcode byte.
    fn cop(&mut self, ea: u64) {
        let size = self.bus.read_byte(ea);
        let op = self.bus.read_byte(ea.wrapping_add(1));
        self.cpu.regs.pc = self.cpu.regs.pc.wrapping_add(1 + size as u64 * 2);
        let mut args = Vec::with_capacity(size as usize);
        for i in 0..size as u64 {
            args.push(self.bus.read_word(ea.wrapping_add(2 + i * 2)));
        }
        self.cpu.cop = Some(CopInst { op, args });
        self.cpu.stopped = true;
        self.cpu.stop_reason = StopReason::Coprocessor;
    }

    /// Block-move bookkeeping shared by `MVN` and `MVP`. The byte
    /// transfer itself is not wired up; only the repeat-until-underflow
    /// counter and pc rewind are modeled.
    fn block_move(&mut self, ea: u64) {
        let _dst = self.bus.read_byte(ea);
        let _src = self.bus.read_byte(ea.wrapping_add(1));
        let count = self.cpu.regs.a.w().wrapping_sub(1);
        self.cpu.regs.a.set_w(count);
        if count != 0xffff {
            self.cpu.regs.pc = self.cpu.regs.pc.wrapping_sub(3)
        }
        self.cpu.cycles += 7;
    }

    fn halt(&mut self, reason: StopReason) {
        self.cpu.stopped = true;
        self.cpu.stop_reason = reason;
        self.cpu.cycles += 3;
    }

    pub(crate) fn execute(&mut self, op: Op, ea: u64) {
        match op {
            // ADC - add with carry
            Op::Adc(size) => self.adc(ea, size),
            // AND - bitwise and with accumulator
            Op::And => {
                let value = self.cpu.regs.a.w() & self.bus.read_word(ea);
                self.cpu.regs.a.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 3;
            }
            // ASL - arithmetic shift left in memory
            Op::Asl => {
                let data = self.bus.read_word(ea);
                self.cpu
                    .regs
                    .status
                    .set_if(Status::CARRY, data & 0x8000 != 0);
                let data = data << 1;
                self.cpu.update_nz_w(data);
                self.bus.write_word(ea, data);
                self.cpu.cycles += 5;
            }
            // ASL - arithmetic shift left of accumulator
            Op::AslA => {
                let a = self.cpu.regs.a.w();
                self.cpu.regs.status.set_if(Status::CARRY, a & 0x8000 != 0);
                let a = a << 1;
                self.cpu.regs.a.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // BCC - branch if carry clear
            Op::Bcc => {
                let taken = !self.cpu.regs.status.has(Status::CARRY);
                self.branch(ea, taken);
            }
            // BCS - branch if carry set
            Op::Bcs => {
                let taken = self.cpu.regs.status.has(Status::CARRY);
                self.branch(ea, taken);
            }
            // BEQ - branch if equal
            Op::Beq => {
                let taken = self.cpu.regs.status.has(Status::ZERO);
                self.branch(ea, taken);
            }
            // BIT - bit test against memory
            Op::Bit => {
                let data = self.bus.read_word(ea);
                let a = self.cpu.regs.a.w();
                let status = &mut self.cpu.regs.status;
                status.set_if(Status::ZERO, a & data == 0);
                status.set_if(Status::NEGATIVE, data & 0x8000 != 0);
                status.set_if(Status::OVERFLOW, data & 0x4000 != 0);
                self.cpu.cycles += 3;
            }
            // BIT - immediate form only affects Z
            Op::BitImm => {
                let data = self.bus.read_word(ea);
                self.cpu
                    .regs
                    .status
                    .set_if(Status::ZERO, self.cpu.regs.a.w() & data == 0);
                self.cpu.cycles += 2;
            }
            // BMI - branch if minus
            Op::Bmi => {
                let taken = self.cpu.regs.status.has(Status::NEGATIVE);
                self.branch(ea, taken);
            }
            // BNE - branch if not equal
            Op::Bne => {
                let taken = !self.cpu.regs.status.has(Status::ZERO);
                self.branch(ea, taken);
            }
            // BPL - branch if plus
            Op::Bpl => {
                let taken = !self.cpu.regs.status.has(Status::NEGATIVE);
                self.branch(ea, taken);
            }
            // BRA - branch always
            Op::Bra | Op::Brl => self.branch(ea, true),
            // BRK - software interrupt through the break vector
            Op::Brk => {
                let pc = self.cpu.regs.pc as u16;
                self.push(pc);
                self.push(self.cpu.regs.status.0);
                self.cpu.regs.status.set_if(Status::IRQ_DISABLE, true);
                self.cpu.regs.status.set_if(Status::DECIMAL, false);
                self.cpu.regs.pc = self.bus.read_word(BRK_VECTOR) as u64;
                self.cpu.cycles += 8;
            }
            // BVC - branch if overflow clear
            Op::Bvc => {
                let taken = !self.cpu.regs.status.has(Status::OVERFLOW);
                self.branch(ea, taken);
            }
            // BVS - branch if overflow set
            Op::Bvs => {
                let taken = self.cpu.regs.status.has(Status::OVERFLOW);
                self.branch(ea, taken);
            }
            // CLC - clear carry
            Op::Clc => {
                self.cpu.regs.status.set_if(Status::CARRY, false);
                self.cpu.cycles += 2;
            }
            // CLD - clear decimal mode
            Op::Cld => {
                self.cpu.regs.status.set_if(Status::DECIMAL, false);
                self.cpu.cycles += 2;
            }
            // CLI - clear interrupt disable
            Op::Cli => {
                self.cpu.regs.status.set_if(Status::IRQ_DISABLE, false);
                self.cpu.cycles += 2;
            }
            // CLV - clear overflow
            Op::Clv => {
                self.cpu.regs.status.set_if(Status::OVERFLOW, false);
                self.cpu.cycles += 2;
            }
            // CMP - compare with accumulator
            Op::Cmp => {
                let a = self.cpu.regs.a.w();
                self.compare_w(a, ea);
            }
            // COP - coprocessor hand-off
            Op::Cop => self.cop(ea),
            // CPX - compare with X
            Op::Cpx => {
                let x = self.cpu.regs.x.w();
                self.compare_w(x, ea);
            }
            // CPY - compare with Y
            Op::Cpy => {
                let y = self.cpu.regs.y.w();
                self.compare_w(y, ea);
            }
            // DEC - decrement memory
            Op::Dec => {
                let data = self.bus.read_word(ea).wrapping_sub(1);
                self.bus.write_word(ea, data);
                self.cpu.update_nz_w(data);
                self.cpu.cycles += 5;
            }
            // DEC - decrement accumulator
            Op::DecA => {
                let a = self.cpu.regs.a.w().wrapping_sub(1);
                self.cpu.regs.a.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // DEX - decrement X
            Op::Dex => {
                let x = self.cpu.regs.x.w().wrapping_sub(1);
                self.cpu.regs.x.set_w(x);
                self.cpu.update_nz_w(x);
                self.cpu.cycles += 2;
            }
            // DEY - decrement Y
            Op::Dey => {
                let y = self.cpu.regs.y.w().wrapping_sub(1);
                self.cpu.regs.y.set_w(y);
                self.cpu.update_nz_w(y);
                self.cpu.cycles += 2;
            }
            // EOR - exclusive or with accumulator
            Op::Eor => {
                let value = self.cpu.regs.a.w() ^ self.bus.read_word(ea);
                self.cpu.regs.a.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 3;
            }
            // INC - increment memory
            Op::Inc => {
                let data = self.bus.read_word(ea).wrapping_add(1);
                self.bus.write_word(ea, data);
                self.cpu.update_nz_w(data);
                self.cpu.cycles += 5;
            }
            // INC - increment accumulator
            Op::IncA => {
                let a = self.cpu.regs.a.w().wrapping_add(1);
                self.cpu.regs.a.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // INX - increment X
            Op::Inx => {
                let x = self.cpu.regs.x.w().wrapping_add(1);
                self.cpu.regs.x.set_w(x);
                self.cpu.update_nz_w(x);
                self.cpu.cycles += 2;
            }
            // INY - increment Y
            Op::Iny => {
                let y = self.cpu.regs.y.w().wrapping_add(1);
                self.cpu.regs.y.set_w(y);
                self.cpu.update_nz_w(y);
                self.cpu.cycles += 2;
            }
            // JMP - jump
            Op::Jmp => {
                self.cpu.regs.pc = ea as u16 as u64;
                self.cpu.cycles += 1;
            }
            // JSL - jump to subroutine, long form
            Op::Jsl => {
                let ret = self.cpu.regs.pc.wrapping_sub(1) as u16;
                self.push(ret);
                self.cpu.regs.pc = ea as u16 as u64;
                self.cpu.cycles += 5;
            }
            // JSR - jump to subroutine
            Op::Jsr => {
                let ret = self.cpu.regs.pc.wrapping_sub(1) as u16;
                self.push(ret);
                self.cpu.regs.pc = ea as u16 as u64;
                self.cpu.cycles += 4;
            }
            // LDA - load accumulator
            Op::Lda => {
                let value = self.bus.read_word(ea);
                self.cpu.regs.a.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 3;
            }
            // LDX - load X
            Op::Ldx => {
                let value = self.bus.read_word(ea);
                self.cpu.regs.x.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 3;
            }
            // LDY - load Y
            Op::Ldy => {
                let value = self.bus.read_word(ea);
                self.cpu.regs.y.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 3;
            }
            // LSR - logical shift right in memory
            Op::Lsr => {
                let data = self.bus.read_word(ea);
                self.cpu.regs.status.set_if(Status::CARRY, data & 1 != 0);
                let data = data >> 1;
                self.cpu.update_nz_w(data);
                self.bus.write_word(ea, data);
                self.cpu.cycles += 5;
            }
            // LSR - logical shift right of accumulator
            Op::LsrA => {
                let a = self.cpu.regs.a.w();
                self.cpu.regs.status.set_if(Status::CARRY, a & 1 != 0);
                let a = a >> 1;
                self.cpu.regs.a.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // MVN/MVP - block move bookkeeping
            Op::Mvn | Op::Mvp => self.block_move(ea),
            // NOP - no operation
            Op::Nop => self.cpu.cycles += 2,
            // ORA - bitwise or with accumulator
            Op::Ora => {
                let value = self.cpu.regs.a.w() | self.bus.read_word(ea);
                self.cpu.regs.a.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 3;
            }
            // PEA - push effective absolute
            Op::Pea => {
                let value = self.bus.read_word(ea);
                self.push(value);
                self.cpu.cycles += 5;
            }
            // PEI - push effective indirect
            Op::Pei => {
                let value = self.bus.read_word(ea);
                self.push(value);
                self.cpu.cycles += 6;
            }
            // PER - push pc-relative address
            Op::Per => {
                self.push(ea as u16);
                self.cpu.cycles += 6;
            }
            // PHA - push accumulator
            Op::Pha => {
                let a = self.cpu.regs.a.w();
                self.push(a);
                self.cpu.cycles += 4;
            }
            // PHP - push processor status
            Op::Php => {
                self.push(self.cpu.regs.status.0);
                self.cpu.cycles += 3;
            }
            // PHX - push X
            Op::Phx => {
                let x = self.cpu.regs.x.w();
                self.push(x);
                self.cpu.cycles += 4;
            }
            // PHY - push Y
            Op::Phy => {
                let y = self.cpu.regs.y.w();
                self.push(y);
                self.cpu.cycles += 4;
            }
            // PLA - pull accumulator
            Op::Pla => {
                let value: u16 = self.pull();
                self.cpu.regs.a.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 5;
            }
            // PLP - pull processor status
            Op::Plp => {
                let value: u8 = self.pull();
                self.cpu.regs.status = Status(value);
                self.cpu.cycles += 4;
            }
            // PLX - pull X
            Op::Plx => {
                let value: u16 = self.pull();
                self.cpu.regs.x.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 5;
            }
            // PLY - pull Y
            Op::Ply => {
                let value: u16 = self.pull();
                self.cpu.regs.y.set_w(value);
                self.cpu.update_nz_w(value);
                self.cpu.cycles += 5;
            }
            // REP - reset status bits
            Op::Rep => {
                let mask = self.bus.read_byte(ea);
                self.cpu.regs.status = Status(self.cpu.regs.status.0 & !mask);
                self.cpu.cycles += 3;
            }
            // ROL - rotate left in memory
            Op::Rol => {
                let data = self.bus.read_word(ea);
                let carry = self.cpu.regs.status.has(Status::CARRY) as u16;
                self.cpu
                    .regs
                    .status
                    .set_if(Status::CARRY, data & 0x8000 != 0);
                let data = (data << 1) | carry;
                self.cpu.update_nz_w(data);
                self.bus.write_word(ea, data);
                self.cpu.cycles += 5;
            }
            // ROL - rotate left of accumulator
            Op::RolA => {
                let a = self.cpu.regs.a.w();
                let carry = self.cpu.regs.status.has(Status::CARRY) as u16;
                self.cpu.regs.status.set_if(Status::CARRY, a & 0x8000 != 0);
                let a = (a << 1) | carry;
                self.cpu.regs.a.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // ROR - rotate right in memory
            Op::Ror => {
                let data = self.bus.read_word(ea);
                let carry = (self.cpu.regs.status.has(Status::CARRY) as u16) << 15;
                self.cpu.regs.status.set_if(Status::CARRY, data & 1 != 0);
                let data = (data >> 1) | carry;
                self.cpu.update_nz_w(data);
                self.bus.write_word(ea, data);
                self.cpu.cycles += 5;
            }
            // ROR - rotate right of accumulator
            Op::RorA => {
                let a = self.cpu.regs.a.w();
                let carry = (self.cpu.regs.status.has(Status::CARRY) as u16) << 15;
                self.cpu.regs.status.set_if(Status::CARRY, a & 1 != 0);
                let a = (a >> 1) | carry;
                self.cpu.regs.a.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // RTI - return from interrupt
            Op::Rti => {
                let status: u8 = self.pull();
                self.cpu.regs.status = Status(status);
                let pc: u16 = self.pull();
                self.cpu.regs.pc = pc as u64;
                self.cpu.cycles += 7;
                self.cpu.regs.status.set_if(Status::IRQ_DISABLE, false);
            }
            // RTL/RTS - return from subroutine
            Op::Rtl | Op::Rts => {
                let ret: u16 = self.pull();
                self.cpu.regs.pc = ret as u64 + 1;
                self.cpu.cycles += 6;
            }
            // SBC - subtract with borrow
            Op::Sbc => self.sbc(ea),
            // SEC - set carry
            Op::Sec => {
                self.cpu.regs.status.set_if(Status::CARRY, true);
                self.cpu.cycles += 2;
            }
            // SED - set decimal mode
            Op::Sed => {
                self.cpu.regs.status.set_if(Status::DECIMAL, true);
                self.cpu.cycles += 2;
            }
            // SEI - set interrupt disable
            Op::Sei => {
                self.cpu.regs.status.set_if(Status::IRQ_DISABLE, true);
                self.cpu.cycles += 2;
            }
            // SEP - set status bits
            Op::Sep => {
                let mask = self.bus.read_byte(ea);
                self.cpu.regs.status = Status(self.cpu.regs.status.0 | mask);
                self.cpu.cycles += 3;
            }
            // STA - store accumulator
            Op::Sta => {
                let a = self.cpu.regs.a.w();
                self.bus.write_word(ea, a);
                self.cpu.cycles += 3;
            }
            // STP - stop the processor
            Op::Stp => self.halt(StopReason::Stop),
            // STX - store X
            Op::Stx => {
                let x = self.cpu.regs.x.w();
                self.bus.write_word(ea, x);
                self.cpu.cycles += 3;
            }
            // STY - store Y
            Op::Sty => {
                let y = self.cpu.regs.y.w();
                self.bus.write_word(ea, y);
                self.cpu.cycles += 3;
            }
            // STZ - store zero
            Op::Stz => {
                self.bus.write_word(ea, 0);
                self.cpu.cycles += 3;
            }
            // TAS - transfer accumulator to stack pointer
            Op::Tas => {
                self.cpu.regs.sp.set_q(self.cpu.regs.a.q());
                self.cpu.cycles += 2;
            }
            // TAX - transfer accumulator to X, word lane
            Op::Tax => {
                let a = self.cpu.regs.a.w();
                self.cpu.regs.x.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // TAY - transfer accumulator to Y, word lane
            Op::Tay => {
                let a = self.cpu.regs.a.w();
                self.cpu.regs.y.set_w(a);
                self.cpu.update_nz_w(a);
                self.cpu.cycles += 2;
            }
            // TBA - transfer B to accumulator
            Op::Tba => {
                let b = self.cpu.regs.b.q();
                self.cpu.regs.a.set_q(b);
                self.cpu.update_nz_q(b);
                self.cpu.cycles += 2;
            }
            // TCD/TDC - no direct-page register in this variant
            Op::Tcd | Op::Tdc => self.cpu.cycles += 2,
            // TRB - test and reset bits
            Op::Trb => {
                let a = self.cpu.regs.a.q();
                let data = self.bus.read_qword(ea);
                self.bus.write_qword(ea, data & !a);
                self.cpu.regs.status.set_if(Status::ZERO, a & data == 0);
                self.cpu.cycles += 5;
            }
            // TSA - transfer stack pointer to accumulator
            Op::Tsa => {
                let sp = self.cpu.regs.sp.q();
                self.cpu.regs.a.set_q(sp);
                self.cpu.update_nz_q(sp);
                self.cpu.cycles += 2;
            }
            // TSB - test and set bits
            Op::Tsb => {
                let a = self.cpu.regs.a.q();
                let data = self.bus.read_qword(ea);
                self.bus.write_qword(ea, data | a);
                self.cpu.regs.status.set_if(Status::ZERO, a & data == 0);
                self.cpu.cycles += 5;
            }
            // TSX - transfer stack pointer to X
            Op::Tsx => {
                let sp = self.cpu.regs.sp.q();
                self.cpu.regs.x.set_q(sp);
                self.cpu.update_nz_q(sp);
                self.cpu.cycles += 2;
            }
            // TXA - transfer X to accumulator
            Op::Txa => {
                let x = self.cpu.regs.x.q();
                self.cpu.regs.a.set_q(x);
                self.cpu.update_nz_q(x);
                self.cpu.cycles += 2;
            }
            // TXS - transfer X to stack pointer
            Op::Txs => {
                self.cpu.regs.sp.set_q(self.cpu.regs.x.q());
                self.cpu.cycles += 2;
            }
            // TXY - transfer X to Y
            Op::Txy => {
                let x = self.cpu.regs.x.q();
                self.cpu.regs.y.set_q(x);
                self.cpu.update_nz_q(x);
                self.cpu.cycles += 2;
            }
            // TYA - transfer Y to accumulator
            Op::Tya => {
                let y = self.cpu.regs.y.q();
                self.cpu.regs.a.set_q(y);
                self.cpu.update_nz_q(y);
                self.cpu.cycles += 2;
            }
            // TYX - transfer Y to X
            Op::Tyx => {
                let y = self.cpu.regs.y.q();
                self.cpu.regs.x.set_q(y);
                self.cpu.update_nz_q(y);
                self.cpu.cycles += 2;
            }
            // WAI - wait for interrupt
            Op::Wai => self.halt(StopReason::Wait),
        }
    }
}
