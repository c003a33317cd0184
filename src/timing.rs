//! Cycle accounting.

/// Instruction-cycle count. Monotonically increasing; only
/// [`crate::emu::Core::reset`] zeroes it.
pub type Cycles = u64;
