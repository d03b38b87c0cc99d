use crate::memory::Bus;

use super::alu::Shift;
use super::{Cpu, Flags};

impl Cpu {
    /// Handle CB-prefixed instructions (bit operations, shifts, and rotates).
    ///
    /// The sub-opcode is the byte at PC+1; the whole instruction is 2 bytes.
    /// Every one of the 256 sub-opcodes is defined.
    pub(crate) fn exec_cb(&mut self, bus: &mut dyn Bus) -> u32 {
        let cb = self.operand8(bus);
        self.advance(2);

        let x = cb >> 6;
        let y = (cb >> 3) & 0x07;
        let z = cb & 0x07;
        let on_hl = z == 6;

        match x {
            0 => {
                let value = self.read_reg8(bus, z);
                let result = self.alu_shift(Shift::from_index(y), value);
                self.write_reg8(bus, z, result);
                if on_hl { 16 } else { 8 }
            }
            1 => {
                // BIT b,r: Z = !bit, N = 0, H = 1, C preserved.
                let value = self.read_reg8(bus, z);
                self.set_flag(Flags::Z, value & (1 << y) == 0);
                self.set_flag(Flags::N, false);
                self.set_flag(Flags::H, true);
                if on_hl { 12 } else { 8 }
            }
            2 => {
                // RES b,r
                let value = self.read_reg8(bus, z) & !(1 << y);
                self.write_reg8(bus, z, value);
                if on_hl { 16 } else { 8 }
            }
            _ => {
                // SET b,r
                let value = self.read_reg8(bus, z) | (1 << y);
                self.write_reg8(bus, z, value);
                if on_hl { 16 } else { 8 }
            }
        }
    }
}
