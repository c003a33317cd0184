//! Trace sinks.
//!
//! After every retired instruction the core can hand a [`TraceEvent`] to
//! a host-provided [`TraceSink`]. The default sink is [`NullTrace`],
//! which compiles away; hosts wanting a disassembly-style log can use
//! [`StdoutTrace`] or collect events into a `Vec`.

use crate::bus::Size;
use crate::timing::Cycles;

/// One retired instruction, as seen by a trace sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEvent {
    /// Address the opcode byte was fetched from.
    pub pc: u64,
    /// Mnemonic, `"???"` for undefined opcodes.
    pub mnemonic: &'static str,
    /// Width suffix for size-tagged instructions.
    pub size: Option<Size>,
    /// Effective address, when the addressing mode produced one.
    pub addr: Option<u64>,
    /// Cycles this instruction took, including addressing overhead.
    pub cycles: Cycles,
}

impl core::fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:016x}  {}", self.pc, self.mnemonic)?;
        if let Some(size) = self.size {
            write!(f, ".{}", size.suffix())?
        }
        if let Some(addr) = self.addr {
            write!(f, " ${:x}", addr)?
        }
        write!(f, "  ({} cycles)", self.cycles)
    }
}

/// Receiver for per-instruction trace events.
pub trait TraceSink {
    fn trace(&mut self, event: TraceEvent);
}

/// Sink that drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn trace(&mut self, _event: TraceEvent) {}
}

/// Sink that prints each event on its own line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutTrace;

impl TraceSink for StdoutTrace {
    fn trace(&mut self, event: TraceEvent) {
        println!("<CPU> {}", event)
    }
}

impl TraceSink for Vec<TraceEvent> {
    fn trace(&mut self, event: TraceEvent) {
        self.push(event)
    }
}
