//! Emulation core for the Nozotech 65x64 processor.
//!
//! The 65x64 is a 64-bit widening of the 65C816: the register file is
//! 64 bits wide with byte, word and dword lanes, addresses are 64-bit,
//! and a coprocessor escape instruction hands structured requests to
//! the host. This crate implements the processor core only; memory,
//! peripherals and coprocessors live on the host side of the
//! [`Bus`](bus::Bus) trait.
//!
//! ```
//! use r65x64::{Bus, Core};
//!
//! struct Ram(Vec<u8>);
//!
//! impl Bus for Ram {
//!     fn read_byte(&mut self, addr: u64) -> u8 {
//!         self.0[addr as usize % self.0.len()]
//!     }
//!
//!     fn write_byte(&mut self, addr: u64, value: u8) {
//!         let len = self.0.len();
//!         self.0[addr as usize % len] = value;
//!     }
//! }
//!
//! let mut ram = Ram(vec![0; 0x10000]);
//! ram.0[0xfffc..0xfffe].copy_from_slice(&[0x00, 0x10]); // reset vector
//! ram.0[0x1000..0x1004].copy_from_slice(&[
//!     0xa9, 0x34, 0x12, // LDA #$1234
//!     0xdb,             // STP
//! ]);
//!
//! let mut core = Core::new(ram);
//! core.reset(false);
//! core.run_until_stopped();
//! assert_eq!(core.cpu.regs.a.w(), 0x1234);
//! ```

pub mod addr;
pub mod backend;
pub mod bus;
pub mod cpu;
pub mod emu;
pub mod instr;
pub mod timing;

pub use backend::{NullTrace, StdoutTrace, TraceEvent, TraceSink};
pub use bus::{Bus, Data, Halves, Size};
pub use cpu::{CopInst, Cpu, Reg, Regs, Status, StopReason};
pub use emu::Core;
pub use timing::Cycles;

#[cfg(test)]
mod tests;
