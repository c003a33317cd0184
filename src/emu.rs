//! The execution controller.
//!
//! [`Core`] ties one [`Cpu`] to a host [`Bus`] and an optional trace
//! sink and drives the fetch/decode/resolve/execute loop. It is the
//! whole host control surface: reset, stepping, halt inspection,
//! interrupt latching, coprocessor hand-off and state snapshots.

use crate::backend::{NullTrace, TraceEvent, TraceSink};
use crate::bus::{Bus, Data};
use crate::cpu::{CopInst, Cpu, StopReason};
use crate::instr::decode;
use crate::timing::Cycles;
use save_state::{InSaveState, SaveStateDeserializer, SaveStateSerializer};

/// Word vector loaded into `pc` on reset.
pub const RESET_VECTOR: u64 = 0xfffc;
/// Word vector loaded into `pc` by `BRK`.
pub const BRK_VECTOR: u64 = 0xffe6;

/// A 65x64 core bound to a host bus and a trace sink.
pub struct Core<B: Bus, S: TraceSink = NullTrace> {
    pub cpu: Cpu,
    pub bus: B,
    sink: S,
    trace: bool,
}

impl<B: Bus> Core<B> {
    pub fn new(bus: B) -> Self {
        Self::with_trace_sink(bus, NullTrace)
    }
}

impl<B: Bus, S: TraceSink> Core<B, S> {
    pub fn with_trace_sink(bus: B, sink: S) -> Self {
        Self {
            cpu: Cpu::new(),
            bus,
            sink,
            trace: false,
        }
    }

    pub fn trace_sink(&self) -> &S {
        &self.sink
    }

    pub fn trace_sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Return the core to its power-on state and load `pc` from the
    /// reset vector. `trace` enables per-instruction event emission.
    pub fn reset(&mut self, trace: bool) {
        self.cpu = Cpu::new();
        self.trace = trace;
        let entry = self.bus.read_word(RESET_VECTOR) as u64;
        self.cpu.regs.pc = entry;
        self.cpu.regs.tpc = entry;
    }

    /// Execute at most one instruction. Does nothing while the core is
    /// stopped.
    pub fn step(&mut self) {
        if self.cpu.stopped {
            return;
        }
        let start_cycles = self.cpu.cycles;
        let tpc = self.cpu.regs.pc;
        self.cpu.regs.tpc = tpc;
        let opcode = self.bus.read_byte(tpc);
        self.cpu.regs.pc = tpc.wrapping_add(1);
        let (mnemonic, size, addr) = match decode(opcode) {
            Some(instr) => {
                let ea = self.resolve(instr.mode);
                self.execute(instr.op, ea.unwrap_or(0));
                (instr.op.mnemonic(), instr.op.size(), ea)
            }
            // Undefined opcodes retire as two-cycle no-ops.
            None => {
                self.cpu.cycles += 2;
                ("???", None, None)
            }
        };
        if self.trace {
            let event = TraceEvent {
                pc: tpc,
                mnemonic,
                size,
                addr,
                cycles: self.cpu.cycles - start_cycles,
            };
            self.sink.trace(event);
        }
    }

    /// Step until a halting instruction retires.
    pub fn run_until_stopped(&mut self) {
        while !self.cpu.stopped {
            self.step()
        }
    }

    pub fn cycles(&self) -> Cycles {
        self.cpu.cycles
    }

    pub fn is_stopped(&self) -> bool {
        self.cpu.stopped
    }

    pub fn stop_reason(&self) -> StopReason {
        self.cpu.stop_reason
    }

    /// Restart a stopped core at the instruction after the halting one.
    pub fn resume(&mut self) {
        self.cpu.stopped = false;
        self.cpu.stop_reason = StopReason::Running;
    }

    /// Latch an external interrupt. The latch is only observable state
    /// for now; a core stopped on `WAI` still needs [`resume`](Self::resume).
    pub fn interrupt(&mut self) {
        self.cpu.interrupted = true;
    }

    pub fn interrupt_pending(&self) -> bool {
        self.cpu.interrupted
    }

    /// Number of argument words in the parked coprocessor request.
    pub fn cop_inst_size(&self) -> u8 {
        match &self.cpu.cop {
            Some(inst) => inst.args.len() as u8,
            None => 0,
        }
    }

    /// Collect the parked coprocessor request. A second take without an
    /// intervening `COP` yields `None`.
    pub fn take_cop_inst(&mut self) -> Option<CopInst> {
        self.cpu.cop.take()
    }

    pub fn read<D: Data>(&mut self, addr: u64) -> D {
        D::read_from(&mut self.bus, addr)
    }

    pub fn write<D: Data>(&mut self, addr: u64, value: D) {
        value.write_to(&mut self.bus, addr)
    }

    /// Push a value; byte lanes land in little-endian order below the
    /// pre-push stack pointer.
    pub fn push<D: Data>(&mut self, value: D) {
        let bytes = value.to_bytes();
        for &byte in bytes.as_ref().iter().rev() {
            self.bus.write_byte(self.cpu.regs.sp.q(), byte);
            self.cpu.regs.sp.0 = self.cpu.regs.sp.0.wrapping_sub(1);
        }
    }

    pub fn pull<D: Data>(&mut self) -> D {
        let mut bytes = D::Arr::default();
        for slot in bytes.as_mut().iter_mut() {
            self.cpu.regs.sp.0 = self.cpu.regs.sp.0.wrapping_add(1);
            *slot = self.bus.read_byte(self.cpu.regs.sp.q());
        }
        D::from_bytes(&bytes)
    }

    /// Snapshot the processor state. Bus contents are the host's to
    /// snapshot separately.
    pub fn save_state(&self) -> Vec<u8> {
        let mut ser = SaveStateSerializer { data: vec![] };
        self.cpu.serialize(&mut ser);
        ser.data
    }

    /// Restore a snapshot produced by [`save_state`](Self::save_state).
    pub fn load_state(&mut self, data: &[u8]) {
        let mut de = SaveStateDeserializer { data: data.iter() };
        self.cpu.deserialize(&mut de);
    }
}
