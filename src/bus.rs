//! The width model and the host memory boundary.
//!
//! The 65x64 moves data at four widths. [`Size`] is the per-instruction
//! width tag, [`Halves`] the split/join algebra everything wider than a
//! byte is built from, and [`Bus`] the narrow boundary behind which the
//! host keeps all memory-mapped storage. The core never owns backing
//! memory; it only calls through a `Bus`.

/// Operand width selector for size-polymorphic instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Size {
    Byte,
    Word,
    DWord,
    QWord,
}

impl Size {
    /// Mnemonic suffix used by trace sinks, e.g. `ADC.q`.
    pub const fn suffix(self) -> &'static str {
        match self {
            Size::Byte => "b",
            Size::Word => "w",
            Size::DWord => "d",
            Size::QWord => "q",
        }
    }

    /// Read a value of this width, zero-extended to 64 bits.
    pub fn read<B: Bus + ?Sized>(self, bus: &mut B, addr: u64) -> u64 {
        match self {
            Size::Byte => bus.read_byte(addr) as u64,
            Size::Word => bus.read_word(addr) as u64,
            Size::DWord => bus.read_dword(addr) as u64,
            Size::QWord => bus.read_qword(addr),
        }
    }

    /// Write the low bits of `value` at this width.
    pub fn write<B: Bus + ?Sized>(self, bus: &mut B, addr: u64, value: u64) {
        match self {
            Size::Byte => bus.write_byte(addr, value as u8),
            Size::Word => bus.write_word(addr, value as u16),
            Size::DWord => bus.write_dword(addr, value as u32),
            Size::QWord => bus.write_qword(addr, value),
        }
    }
}

/// Split/join/swap at the half-width boundary.
///
/// `join(lo(v), hi(v)) == v` and `swap(swap(v)) == v` hold for every
/// width; the flag and stack machinery is built on top of these.
pub trait Halves: Copy {
    type Half;

    fn lo(self) -> Self::Half;
    fn hi(self) -> Self::Half;
    fn join(lo: Self::Half, hi: Self::Half) -> Self;
    fn swap(self) -> Self;
}

macro_rules! impl_halves {
    ($t:ty, $h:ty, $bits:expr) => {
        impl Halves for $t {
            type Half = $h;

            fn lo(self) -> $h {
                self as $h
            }

            fn hi(self) -> $h {
                (self >> $bits) as $h
            }

            fn join(lo: $h, hi: $h) -> Self {
                lo as $t | ((hi as $t) << $bits)
            }

            fn swap(self) -> Self {
                (self >> $bits) | (self << $bits)
            }
        }
    };
}

impl_halves!(u16, u8, 8);
impl_halves!(u32, u16, 16);
impl_halves!(u64, u32, 32);

/// Host-supplied memory-mapped storage, addressed with 64-bit addresses.
///
/// Only the byte accessors are required; the wider accessors default to
/// little-endian composition and exist so hosts with flat backing stores
/// can provide faster paths. Accesses never fail from the core's point
/// of view; address decoding policy is entirely the host's.
pub trait Bus {
    fn read_byte(&mut self, addr: u64) -> u8;
    fn write_byte(&mut self, addr: u64, value: u8);

    fn read_word(&mut self, addr: u64) -> u16 {
        u16::join(self.read_byte(addr), self.read_byte(addr.wrapping_add(1)))
    }

    fn read_dword(&mut self, addr: u64) -> u32 {
        u32::join(self.read_word(addr), self.read_word(addr.wrapping_add(2)))
    }

    fn read_qword(&mut self, addr: u64) -> u64 {
        u64::join(self.read_dword(addr), self.read_dword(addr.wrapping_add(4)))
    }

    fn write_word(&mut self, addr: u64, value: u16) {
        self.write_byte(addr, value.lo());
        self.write_byte(addr.wrapping_add(1), value.hi());
    }

    fn write_dword(&mut self, addr: u64, value: u32) {
        self.write_word(addr, value.lo());
        self.write_word(addr.wrapping_add(2), value.hi());
    }

    fn write_qword(&mut self, addr: u64, value: u64) {
        self.write_dword(addr, value.lo());
        self.write_dword(addr.wrapping_add(4), value.hi());
    }
}

/// Value types that can cross the memory boundary.
pub trait Data: Copy + Default + core::fmt::Debug {
    type Arr: AsRef<[u8]> + AsMut<[u8]> + Default;

    fn to_bytes(self) -> Self::Arr;
    fn from_bytes(bytes: &Self::Arr) -> Self;
    fn read_from<B: Bus + ?Sized>(bus: &mut B, addr: u64) -> Self;
    fn write_to<B: Bus + ?Sized>(self, bus: &mut B, addr: u64);
}

macro_rules! impl_data {
    ($t:ty, $n:expr, $read:ident, $write:ident) => {
        impl Data for $t {
            type Arr = [u8; $n];

            fn to_bytes(self) -> [u8; $n] {
                self.to_le_bytes()
            }

            fn from_bytes(bytes: &[u8; $n]) -> Self {
                Self::from_le_bytes(*bytes)
            }

            fn read_from<B: Bus + ?Sized>(bus: &mut B, addr: u64) -> Self {
                bus.$read(addr)
            }

            fn write_to<B: Bus + ?Sized>(self, bus: &mut B, addr: u64) {
                bus.$write(addr, self)
            }
        }
    };
}

impl_data!(u8, 1, read_byte, write_byte);
impl_data!(u16, 2, read_word, write_word);
impl_data!(u32, 4, read_dword, write_dword);
impl_data!(u64, 8, read_qword, write_qword);
