use crate::cpu::{Cpu, Flags};
use crate::memory::Bus;

impl Cpu {
    /// Condition field (bits 3–4) of JR/JP/CALL/RET cc.
    #[inline]
    fn cc_condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flags::Z), // NZ
            1 => self.get_flag(Flags::Z),  // Z
            2 => !self.get_flag(Flags::C), // NC
            _ => self.get_flag(Flags::C),  // C
        }
    }

    /// JR r8
    pub(crate) fn exec_jr(&mut self, bus: &mut dyn Bus) -> u32 {
        self.jr(bus, true)
    }

    /// JR NZ/Z/NC/C,r8
    pub(crate) fn exec_jr_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x20 | 0x28 | 0x30 | 0x38));
        let cond = self.cc_condition(opcode);
        self.jr(bus, cond)
    }

    pub(crate) fn exec_jp_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC2 | 0xCA | 0xD2 | 0xDA));
        let cond = self.cc_condition(opcode);
        self.jp_cond(bus, cond)
    }

    pub(crate) fn exec_jp_a16(&mut self, bus: &mut dyn Bus) -> u32 {
        self.jp_cond(bus, true)
    }

    pub(crate) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(crate) fn exec_call_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC4 | 0xCC | 0xD4 | 0xDC));
        let cond = self.cc_condition(opcode);
        self.call_cond(bus, cond)
    }

    pub(crate) fn exec_call_a16(&mut self, bus: &mut dyn Bus) -> u32 {
        self.call_cond(bus, true)
    }

    pub(crate) fn exec_ret_cc(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC0 | 0xC8 | 0xD0 | 0xD8));
        let cond = self.cc_condition(opcode);
        self.ret_cond(bus, cond)
    }

    /// Unconditional RET is 16 cycles, not the 20 of a taken RET cc.
    pub(crate) fn exec_ret(&mut self, bus: &mut dyn Bus) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        16
    }
}
