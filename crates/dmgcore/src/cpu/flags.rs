use bitflags::bitflags;

use super::{Cpu, Registers};

bitflags! {
    /// Flag bits in the F register.
    ///
    /// Only the high nibble carries meaning:
    /// - bit 7: Z (zero)
    /// - bit 6: N (subtract)
    /// - bit 5: H (half carry)
    /// - bit 4: C (carry)
    ///
    /// Bits 0–3 are not named here but are retained when a view is built
    /// from the raw byte, so they read back as whatever was last written.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Flags: u8 {
        const Z = 0b1000_0000;
        const N = 0b0100_0000;
        const H = 0b0010_0000;
        const C = 0b0001_0000;
    }
}

impl Registers {
    /// Decomposed view of F.
    #[inline]
    pub fn flags(&self) -> Flags {
        Flags::from_bits_retain(self.f)
    }

    #[inline]
    pub fn flag(&self, flag: Flags) -> bool {
        self.flags().contains(flag)
    }

    /// The flag as a single bit, 0 or 1.
    #[inline]
    pub fn flag_bit(&self, flag: Flags) -> u8 {
        u8::from(self.flag(flag))
    }

    /// Set or clear `flag`; every other bit of F is preserved.
    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.f = flags.bits();
    }

    /// Bit-style setter: any non-zero `value` sets the flag.
    #[inline]
    pub fn set_flag_bit(&mut self, flag: Flags, value: u8) {
        self.set_flag(flag, value != 0);
    }
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flags) -> bool {
        self.regs.flag(flag)
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flags, value: bool) {
        self.regs.set_flag(flag, value);
    }

    /// Clear Z, N, H and C. The unused low nibble is left alone.
    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f &= !Flags::all().bits();
    }
}
