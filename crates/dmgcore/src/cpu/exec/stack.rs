use crate::cpu::Cpu;
use crate::memory::Bus;

impl Cpu {
    /// 16-bit register by `rp2` index, the PUSH/POP encoding: 0=BC, 1=DE,
    /// 2=HL, 3=AF.
    fn read_rp2(&self, rp2: u8) -> u16 {
        match rp2 & 0x03 {
            0 => self.regs.bc(),
            1 => self.regs.de(),
            2 => self.regs.hl(),
            _ => self.regs.af(),
        }
    }

    pub(crate) fn exec_push_rr(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC5 | 0xD5 | 0xE5 | 0xF5));

        let value = self.read_rp2(opcode >> 4);
        self.push_u16(bus, value);
        self.advance(1);
        16
    }

    pub(crate) fn exec_pop_rr(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0xC1 | 0xD1 | 0xE1 | 0xF1));

        let value = self.pop_u16(bus);
        match (opcode >> 4) & 0x03 {
            0 => self.regs.set_bc(value),
            1 => self.regs.set_de(value),
            2 => self.regs.set_hl(value),
            // The low nibble of F does not exist in hardware.
            _ => self.regs.set_af(value & 0xFFF0),
        }
        self.advance(1);
        12
    }

    pub(crate) fn exec_rst(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0xC7 | 0xCF | 0xD7 | 0xDF | 0xE7 | 0xEF | 0xF7 | 0xFF
        ));

        let ret = self.regs.pc.wrapping_add(1);
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
        16
    }
}
