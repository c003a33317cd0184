use crate::addr::AddrMode;
use crate::bus::{Bus, Halves, Size};
use crate::cpu::{Reg, Regs, Status, StopReason};
use crate::emu::Core;
use crate::instr::{decode, Instr, Op};

struct Ram(Vec<u8>);

impl Ram {
    fn new() -> Self {
        Ram(vec![0; 0x2_0000])
    }

    fn load(&mut self, addr: u64, bytes: &[u8]) {
        let addr = addr as usize;
        self.0[addr..addr + bytes.len()].copy_from_slice(bytes)
    }
}

impl Bus for Ram {
    fn read_byte(&mut self, addr: u64) -> u8 {
        self.0[addr as usize % self.0.len()]
    }

    fn write_byte(&mut self, addr: u64, value: u8) {
        let len = self.0.len();
        self.0[addr as usize % len] = value
    }
}

const ORG: u64 = 0x1000;

fn core_with(program: &[u8]) -> Core<Ram> {
    let mut ram = Ram::new();
    ram.load(0xfffc, &[0x00, 0x10]);
    ram.load(ORG, program);
    let mut core = Core::new(ram);
    core.reset(false);
    core
}

#[test]
fn halves_join_and_swap() {
    assert_eq!(u16::join(0x34, 0x12), 0x1234);
    assert_eq!(0x1234u16.lo(), 0x34);
    assert_eq!(0x1234u16.hi(), 0x12);
    assert_eq!(u32::join(0x5678, 0x1234), 0x1234_5678);
    assert_eq!(u64::join(0x9abc_def0, 0x1234_5678), 0x1234_5678_9abc_def0);
    for v in [0u64, 1, 0xdead_beef_0bad_f00d, u64::MAX] {
        assert_eq!(u64::join(v.lo(), v.hi()), v);
        assert_eq!(v.swap().swap(), v);
    }
    assert_eq!(0x1234_5678_9abc_def0u64.swap(), 0x9abc_def0_1234_5678);
}

#[test]
fn reg_lanes_preserve_high_bits() {
    let mut r = Reg(u64::MAX);
    r.set_b(0x12);
    assert_eq!(r.q(), 0xffff_ffff_ffff_ff12);
    r.set_w(0x3456);
    assert_eq!(r.q(), 0xffff_ffff_ffff_3456);
    r.set_d(0x789a_bcde);
    assert_eq!(r.q(), 0xffff_ffff_789a_bcde);
    assert_eq!(r.b(), 0xde);
    assert_eq!(r.w(), 0xbcde);
    assert_eq!(r.d(), 0x789a_bcde);
}

#[test]
fn zero_cache_index_wraps() {
    let mut regs = Regs::new();
    regs.set_zc(130, Reg(7));
    assert_eq!(regs.zc(2).q(), 7);
    assert_eq!(regs.zc(130).q(), 7);
}

#[test]
fn decode_covers_documented_rows() {
    assert_eq!(
        decode(0xa9),
        Some(Instr {
            mode: AddrMode::ImmediateWord,
            op: Op::Lda
        })
    );
    assert_eq!(decode(0x00).map(|i| i.op), Some(Op::Brk));
    assert_eq!(decode(0x61).map(|i| i.op), Some(Op::Adc(Size::Byte)));
    assert_eq!(
        decode(0x71),
        Some(Instr {
            mode: AddrMode::ImmediateQWord,
            op: Op::Adc(Size::QWord)
        })
    );
    assert_eq!(decode(0x01), None);
    let legal = (0..=255u8).filter(|&b| decode(b).is_some()).count();
    assert_eq!(legal, 151);
}

#[test]
fn reset_loads_entry_from_vector() {
    let mut core = core_with(&[0xa9, 0x34, 0x12, 0xdb]);
    assert_eq!(core.cpu.regs.pc, ORG);
    core.run_until_stopped();
    assert_eq!(core.cpu.regs.a.w(), 0x1234);
    assert!(core.is_stopped());
    assert_eq!(core.stop_reason(), StopReason::Stop);
    assert_eq!(core.cycles(), 7);
}

#[test]
fn reset_restores_power_on_state() {
    let mut core = core_with(&[0x02, 0x01, 0x09, 0xff, 0xff, 0xdb]);
    core.step();
    assert!(core.is_stopped());
    assert_eq!(core.cop_inst_size(), 1);
    core.reset(false);
    assert!(!core.is_stopped());
    assert_eq!(core.stop_reason(), StopReason::Running);
    assert_eq!(core.cycles(), 0);
    assert_eq!(core.cop_inst_size(), 0);
    assert_eq!(core.cpu.regs.sp.q(), 0x0100);
    assert!(core.cpu.regs.status.has(Status::IRQ_DISABLE));
    assert_eq!(core.cpu.regs.pc, ORG);
}

#[test]
fn lda_updates_n_and_z() {
    let mut core = core_with(&[0xa9, 0x00, 0x00, 0xa9, 0x00, 0x80, 0xdb]);
    core.step();
    assert!(core.cpu.regs.status.has(Status::ZERO));
    core.step();
    let status = core.cpu.regs.status;
    assert!(status.has(Status::NEGATIVE));
    assert!(!status.has(Status::ZERO));
}

#[test]
fn adc_carry_clear_at_signed_bound() {
    let mut core = core_with(&[0x61, 0x01, 0xdb]);
    core.cpu.regs.a.set_q(0x7fff_ffff_ffff_ffff);
    core.step();
    let status = core.cpu.regs.status;
    assert_eq!(core.cpu.regs.a.q(), 0x8000_0000_0000_0000);
    assert!(!status.has(Status::CARRY));
    assert!(status.has(Status::OVERFLOW));
    assert!(status.has(Status::NEGATIVE));
}

#[test]
fn adc_carry_set_on_unsigned_wrap() {
    let mut core = core_with(&[0x61, 0x01, 0xdb]);
    core.cpu.regs.a.set_q(u64::MAX);
    core.step();
    let status = core.cpu.regs.status;
    assert_eq!(core.cpu.regs.a.q(), 0);
    assert!(status.has(Status::CARRY));
    assert!(!status.has(Status::OVERFLOW));
    assert!(status.has(Status::ZERO));
}

#[test]
fn adc_decimal_adjusts_nibbles() {
    let mut core = core_with(&[0x61, 0x01, 0xdb]);
    core.cpu.regs.status.set_if(Status::DECIMAL, true);
    core.cpu.regs.a.set_q(0x09);
    core.step();
    assert_eq!(core.cpu.regs.a.q(), 0x10);
    assert!(!core.cpu.regs.status.has(Status::CARRY));
}

#[test]
fn adc_immediate_widths_consume_documented_bytes() {
    let mut core = core_with(&[0x69, 0x34, 0x12, 0xdb]);
    core.step();
    assert_eq!(core.cpu.regs.a.q(), 0x1234);
    assert_eq!(core.cpu.regs.pc, ORG + 3);

    let mut program = vec![0x71];
    program.extend_from_slice(&0x0102_0304_0506_0708u64.to_le_bytes());
    program.extend_from_slice(&[0; 8]);
    program.push(0xdb);
    let mut core = core_with(&program);
    core.step();
    assert_eq!(core.cpu.regs.a.q(), 0x0102_0304_0506_0708);
    assert_eq!(core.cpu.regs.pc, ORG + 17);
}

#[test]
fn sbc_borrow_clears_carry() {
    let mut core = core_with(&[0x38, 0xe9, 0x05, 0x00, 0xdb]);
    core.cpu.regs.a.set_w(3);
    core.step();
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 0xfffe);
    assert!(!core.cpu.regs.status.has(Status::CARRY));
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));

    let mut core = core_with(&[0x38, 0xe9, 0x03, 0x00, 0xdb]);
    core.cpu.regs.a.set_w(5);
    core.step();
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 2);
    assert!(core.cpu.regs.status.has(Status::CARRY));
}

#[test]
fn cmp_sets_carry_on_borrow() {
    let mut core = core_with(&[0xc9, 0x03, 0x00, 0xc9, 0x07, 0x00, 0xdb]);
    core.cpu.regs.a.set_w(5);
    core.step();
    assert!(!core.cpu.regs.status.has(Status::CARRY));
    assert!(!core.cpu.regs.status.has(Status::ZERO));
    core.step();
    assert!(core.cpu.regs.status.has(Status::CARRY));
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));
}

#[test]
fn cpx_cpy_compare_word_lanes() {
    let mut core = core_with(&[0xe0, 0x10, 0x00, 0xc0, 0x20, 0x00, 0xdb]);
    core.cpu.regs.x.set_w(0x10);
    core.cpu.regs.y.set_w(0x10);
    core.step();
    assert!(core.cpu.regs.status.has(Status::ZERO));
    assert!(!core.cpu.regs.status.has(Status::CARRY));
    core.step();
    assert!(core.cpu.regs.status.has(Status::CARRY));
}

#[test]
fn branch_taken_and_fallthrough_cycles() {
    let mut core = core_with(&[0xf0, 0x05, 0x00]);
    core.cpu.regs.status.set_if(Status::ZERO, true);
    core.step();
    assert_eq!(core.cpu.regs.pc, ORG + 3 + 5);
    assert_eq!(core.cycles(), 4);

    let mut core = core_with(&[0xf0, 0x05, 0x00]);
    core.step();
    assert_eq!(core.cpu.regs.pc, ORG + 3);
    assert_eq!(core.cycles(), 3);
}

#[test]
fn branch_target_truncates_to_word() {
    // BRA -4 from the advanced pc
    let mut core = core_with(&[0x80, 0xfc, 0xff]);
    core.step();
    assert_eq!(core.cpu.regs.pc, 0x0fff);
}

#[test]
fn stack_push_pull_roundtrip() {
    let mut core = core_with(&[]);
    let sp = core.cpu.regs.sp.q();
    core.push(0xabcdu16);
    assert_eq!(core.cpu.regs.sp.q(), sp - 2);
    assert_eq!(core.bus.read_byte(sp - 1), 0xcd);
    assert_eq!(core.bus.read_byte(sp), 0xab);
    let value: u16 = core.pull();
    assert_eq!(value, 0xabcd);
    assert_eq!(core.cpu.regs.sp.q(), sp);
}

#[test]
fn push_pull_instructions() {
    // PHA, LDA #0, PLA
    let mut core = core_with(&[0x48, 0xa9, 0x00, 0x00, 0x68, 0xdb]);
    let sp = core.cpu.regs.sp.q();
    core.cpu.regs.a.set_w(0x8001);
    core.run_until_stopped();
    assert_eq!(core.cpu.regs.a.w(), 0x8001);
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));
    assert_eq!(core.cpu.regs.sp.q(), sp);
}

#[test]
fn php_plp_roundtrip_raw_flags() {
    // PHP, REP #$ff, PLP
    let mut core = core_with(&[0x08, 0xc2, 0xff, 0x28, 0xdb]);
    core.cpu.regs.status = Status(0xb5);
    core.run_until_stopped();
    assert_eq!(core.cpu.regs.status, Status(0xb5));
}

#[test]
fn rep_and_sep_mask_status_bits() {
    // SEP #$30, REP #$10
    let mut core = core_with(&[0xe2, 0x30, 0xc2, 0x10, 0xdb]);
    core.run_until_stopped();
    let status = core.cpu.regs.status;
    assert!(status.has(Status::PARITY));
    assert!(!status.has(Status::TRAP));
    assert!(status.has(Status::IRQ_DISABLE));
}

#[test]
fn shift_and_rotate_carry_paths() {
    let mut core = core_with(&[0x0a, 0xdb]);
    core.cpu.regs.a.set_q(0xffff_0000_0000_8001);
    core.step();
    assert_eq!(core.cpu.regs.a.q(), 0xffff_0000_0000_0002);
    assert!(core.cpu.regs.status.has(Status::CARRY));

    let mut core = core_with(&[0x6a, 0xdb]);
    core.cpu.regs.status.set_if(Status::CARRY, true);
    core.cpu.regs.a.set_w(0x0002);
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 0x8001);
    assert!(!core.cpu.regs.status.has(Status::CARRY));
}

#[test]
fn memory_shift_rewrites_operand_field() {
    let mut program = [0u8; 18];
    program[0] = 0x0e; // ASL on the inline field
    program[1] = 0x01;
    program[2] = 0x40;
    program[17] = 0xdb;
    let mut core = core_with(&program);
    core.step();
    assert_eq!(core.bus.read_word(ORG + 1), 0x8002);
    assert!(!core.cpu.regs.status.has(Status::CARRY));
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));
}

#[test]
fn inc_dec_memory() {
    let mut program = [0u8; 18];
    program[0] = 0xee; // INC
    program[1] = 0xff;
    program[2] = 0xff;
    program[17] = 0xdb;
    let mut core = core_with(&program);
    core.step();
    assert_eq!(core.bus.read_word(ORG + 1), 0x0000);
    assert!(core.cpu.regs.status.has(Status::ZERO));
}

#[test]
fn stores_target_the_operand_field() {
    let mut program = [0u8; 18];
    program[0] = 0x8d; // STA
    program[17] = 0xdb;
    let mut core = core_with(&program);
    core.cpu.regs.a.set_w(0xfeed);
    core.step();
    assert_eq!(core.bus.read_word(ORG + 1), 0xfeed);
}

#[test]
fn absolute_indexed_addressing() {
    let mut program = vec![0xbd]; // LDA a,X
    program.extend_from_slice(&[0; 16]);
    program.push(0xdb);
    let mut core = core_with(&program);
    core.bus.load(ORG + 1 + 0x100, &[0xef, 0xbe]);
    core.cpu.regs.x.set_q(0x100);
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 0xbeef);
}

#[test]
fn jmp_indirect_reads_qword_pointer() {
    let mut program = vec![0x6c];
    program.extend_from_slice(&0x2000u64.to_le_bytes());
    program.extend_from_slice(&[0; 8]);
    let mut core = core_with(&program);
    core.bus.load(0x2000, &[0xdb]);
    core.step();
    assert_eq!(core.cpu.regs.pc, 0x2000);
    assert_eq!(core.cycles(), 5);
}

#[test]
fn stack_relative_addressing() {
    // ORA d,S
    let mut core = core_with(&[0x03, 0x05, 0xdb]);
    core.cpu.regs.sp.set_q(0x8000);
    core.bus.load(0x8005, &[0x0f, 0x00]);
    core.cpu.regs.a.set_w(0xf0);
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 0xff);

    // LDA (d,S),Y
    let mut core = core_with(&[0xb3, 0x08, 0xdb]);
    core.cpu.regs.sp.set_q(0x8000);
    core.bus.load(0x8008, &0x3000u64.to_le_bytes());
    core.cpu.regs.y.set_q(4);
    core.bus.load(0x3004, &[0xcd, 0xab]);
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 0xabcd);
}

#[test]
fn bit_sets_flags_from_memory() {
    let mut program = [0u8; 18];
    program[0] = 0x2c;
    program[1] = 0x00;
    program[2] = 0xc0;
    program[17] = 0xdb;
    let mut core = core_with(&program);
    core.cpu.regs.a.set_w(0x0001);
    core.step();
    let status = core.cpu.regs.status;
    assert!(status.has(Status::ZERO));
    assert!(status.has(Status::NEGATIVE));
    assert!(status.has(Status::OVERFLOW));

    // immediate form only touches Z
    let mut core = core_with(&[0x89, 0x00, 0xc0, 0xdb]);
    core.cpu.regs.a.set_w(0x4000);
    core.step();
    let status = core.cpu.regs.status;
    assert!(!status.has(Status::ZERO));
    assert!(!status.has(Status::NEGATIVE));
    assert!(!status.has(Status::OVERFLOW));
}

#[test]
fn tsb_trb_operate_on_qwords() {
    let mut program = vec![0x0c]; // TSB
    program.extend_from_slice(&0x00ffu64.to_le_bytes());
    program.extend_from_slice(&[0; 8]);
    program.push(0xdb);
    let mut core = core_with(&program);
    core.cpu.regs.a.set_q(0x0f0f);
    core.step();
    assert_eq!(core.bus.read_qword(ORG + 1), 0x0fff);
    assert!(!core.cpu.regs.status.has(Status::ZERO));

    let mut program = vec![0x1c]; // TRB
    program.extend_from_slice(&0xff00u64.to_le_bytes());
    program.extend_from_slice(&[0; 8]);
    program.push(0xdb);
    let mut core = core_with(&program);
    core.cpu.regs.a.set_q(0x0f00);
    core.step();
    assert_eq!(core.bus.read_qword(ORG + 1), 0xf000);
    assert!(!core.cpu.regs.status.has(Status::ZERO));
}

#[test]
fn jsr_rts_return_discipline() {
    // JSR jumps into its inline field; RTS resumes past it
    let mut program = [0u8; 18];
    program[0] = 0x20; // JSR
    program[1] = 0x60; // RTS, first byte of the operand field
    program[17] = 0xdb;
    let mut core = core_with(&program);
    core.step();
    assert_eq!(core.cpu.regs.pc, ORG + 1);
    core.step();
    assert_eq!(core.cpu.regs.pc, ORG + 17);
    core.step();
    assert_eq!(core.stop_reason(), StopReason::Stop);
}

#[test]
fn brk_pushes_state_and_vectors() {
    let mut core = core_with(&[0x00]);
    core.bus.load(0xffe6, &[0x00, 0x20]);
    core.cpu.regs.status.set_if(Status::DECIMAL, true);
    let sp = core.cpu.regs.sp.q();
    let flags = core.cpu.regs.status.0;
    core.step();
    assert_eq!(core.cpu.regs.pc, 0x2000);
    assert!(core.cpu.regs.status.has(Status::IRQ_DISABLE));
    assert!(!core.cpu.regs.status.has(Status::DECIMAL));
    assert_eq!(core.cpu.regs.sp.q(), sp - 3);
    assert_eq!(core.bus.read_byte(sp - 2), flags);
    assert_eq!(core.bus.read_word(sp - 1), 0x1001);
    assert_eq!(core.cycles(), 8);
}

#[test]
fn rti_restores_flags_then_pc() {
    let mut core = core_with(&[0x40]);
    core.push(0x2345u16);
    core.push(Status::DECIMAL.0 | Status::IRQ_DISABLE.0);
    core.step();
    assert_eq!(core.cpu.regs.pc, 0x2345);
    assert!(core.cpu.regs.status.has(Status::DECIMAL));
    assert!(!core.cpu.regs.status.has(Status::IRQ_DISABLE));
    assert_eq!(core.cycles(), 7);
}

#[test]
fn cop_parks_request_and_halts() {
    let mut core = core_with(&[0x02, 0x02, 0x07, 0x34, 0x12, 0x78, 0x56, 0xdb]);
    core.step();
    assert!(core.is_stopped());
    assert_eq!(core.stop_reason(), StopReason::Coprocessor);
    assert_eq!(core.cpu.regs.pc, ORG + 7);
    assert_eq!(core.cop_inst_size(), 2);
    let inst = core.take_cop_inst().unwrap();
    assert_eq!(inst.op, 7);
    assert_eq!(inst.args, vec![0x1234, 0x5678]);
    assert_eq!(core.cop_inst_size(), 0);
    assert!(core.take_cop_inst().is_none());
    core.resume();
    core.run_until_stopped();
    assert_eq!(core.stop_reason(), StopReason::Stop);
}

#[test]
fn halt_resume_and_interrupt_latch() {
    let mut core = core_with(&[0xdb, 0xea, 0xdb]);
    core.run_until_stopped();
    assert_eq!(core.stop_reason(), StopReason::Stop);
    core.step(); // no-op while stopped
    assert_eq!(core.cpu.regs.pc, ORG + 1);
    core.resume();
    assert_eq!(core.stop_reason(), StopReason::Running);

    let mut core = core_with(&[0xcb, 0xdb]);
    core.step();
    assert_eq!(core.stop_reason(), StopReason::Wait);
    core.interrupt();
    assert!(core.is_stopped()); // the latch alone does not wake the core
    assert!(core.interrupt_pending());
    core.resume();
    core.run_until_stopped();
    assert_eq!(core.stop_reason(), StopReason::Stop);
}

#[test]
fn block_move_repeats_until_counter_underflows() {
    let mut core = core_with(&[0x54, 0x00, 0x01, 0xdb]);
    core.cpu.regs.a.set_w(2);
    core.step();
    assert_eq!(core.cpu.regs.pc, ORG); // rewound for the next iteration
    core.step();
    core.step();
    assert_eq!(core.cpu.regs.a.w(), 0xffff);
    assert_eq!(core.cpu.regs.pc, ORG + 3);
    assert_eq!(core.cycles(), 3 * 8);
}

#[test]
fn transfers_word_and_qword_lanes() {
    let mut core = core_with(&[0xaa, 0x8a, 0xdb]);
    core.cpu.regs.a.set_q(0x1111_0000_0000_1234);
    core.cpu.regs.x.set_q(0xffff_ffff_ffff_0000);
    core.step(); // TAX moves the word lane only
    assert_eq!(core.cpu.regs.x.q(), 0xffff_ffff_ffff_1234);
    core.step(); // TXA moves the full qword
    assert_eq!(core.cpu.regs.a.q(), 0xffff_ffff_ffff_1234);
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));
}

#[test]
fn stack_pointer_transfers_are_qword() {
    let mut core = core_with(&[0x1b, 0xba, 0xdb]);
    core.cpu.regs.a.set_q(0x8000_0000_0001_0000);
    core.step(); // TAS
    assert_eq!(core.cpu.regs.sp.q(), 0x8000_0000_0001_0000);
    core.step(); // TSX
    assert_eq!(core.cpu.regs.x.q(), 0x8000_0000_0001_0000);
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));
}

#[test]
fn tba_copies_b_into_accumulator() {
    let mut core = core_with(&[0xeb, 0xdb]);
    core.cpu.regs.b.set_q(0xdead_beef_0000_0001);
    core.step();
    assert_eq!(core.cpu.regs.a.q(), 0xdead_beef_0000_0001);
    assert!(core.cpu.regs.status.has(Status::NEGATIVE));
}

#[test]
fn push_effective_address_family() {
    // PEA
    let mut core = core_with(&[0xf4, 0x34, 0x12, 0xdb]);
    core.step();
    let value: u16 = core.pull();
    assert_eq!(value, 0x1234);

    // PER pushes the pc-relative target
    let mut core = core_with(&[0x62, 0x10, 0x00, 0xdb]);
    core.step();
    let value: u16 = core.pull();
    assert_eq!(value, (ORG + 3 + 0x10) as u16);

    // PEI pushes the word behind the qword pointer
    let mut program = vec![0xd4];
    program.extend_from_slice(&0x4000u64.to_le_bytes());
    program.extend_from_slice(&[0; 8]);
    program.push(0xdb);
    let mut core = core_with(&program);
    core.bus.load(0x4000, &[0xcd, 0xab]);
    core.step();
    let value: u16 = core.pull();
    assert_eq!(value, 0xabcd);
}

#[test]
fn undefined_opcodes_retire_as_noops() {
    let mut core = core_with(&[0x01, 0xdb]);
    core.step();
    assert_eq!(core.cpu.regs.pc, ORG + 1);
    assert_eq!(core.cycles(), 2);
    core.step();
    assert_eq!(core.stop_reason(), StopReason::Stop);
}

#[test]
fn trace_sink_receives_one_event_per_instruction() {
    let mut ram = Ram::new();
    ram.load(0xfffc, &[0x00, 0x10]);
    ram.load(ORG, &[0xa9, 0x01, 0x00, 0x61, 0x01, 0x01, 0xdb]);
    let mut core = Core::with_trace_sink(ram, Vec::new());
    core.reset(true);
    core.run_until_stopped();
    let events = core.trace_sink();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].mnemonic, "LDA");
    assert_eq!(events[0].pc, ORG);
    assert_eq!(events[0].addr, Some(ORG + 1));
    assert_eq!(events[0].cycles, 4);
    assert_eq!(events[1].mnemonic, "ADC");
    assert_eq!(events[1].size, Some(Size::Byte));
    assert_eq!(events[1].cycles, 2);
    assert_eq!(events[2].mnemonic, "???");
    assert_eq!(events[3].mnemonic, "STP");
    assert_eq!(events[3].addr, None);
    assert_eq!(
        format!("{}", events[1]),
        format!("{:016x}  ADC.b ${:x}  (2 cycles)", ORG + 3, ORG + 4)
    );
}

#[test]
fn save_state_roundtrip() {
    let mut core = core_with(&[0xa9, 0x21, 0x43, 0x02, 0x01, 0x09, 0xff, 0xff]);
    core.step();
    core.step(); // COP parks a request
    let snapshot = core.save_state();

    let mut other = core_with(&[]);
    other.load_state(&snapshot);
    assert_eq!(other.cpu, core.cpu);
    assert_eq!(other.cpu.regs.a.w(), 0x4321);
    assert_eq!(other.stop_reason(), StopReason::Coprocessor);
    assert_eq!(other.take_cop_inst().unwrap().args, vec![0xffff]);
}
