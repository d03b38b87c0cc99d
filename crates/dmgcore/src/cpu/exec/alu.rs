use crate::cpu::alu::Shift;
use crate::cpu::{Cpu, Flags};
use crate::memory::Bus;

impl Cpu {
    /// Dispatch the 3-bit ALU operation field shared by 0x80–0xBF and the
    /// immediate forms.
    fn alu_op(&mut self, operation: u8, value: u8) {
        match operation & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r (0x80–0xBF).
    pub(crate) fn exec_alu_reg(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!((0x80..=0xBF).contains(&opcode));

        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu_op(opcode >> 3, value);
        self.advance(1);

        if src == 6 { 8 } else { 4 }
    }

    /// ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,d8.
    pub(crate) fn exec_alu_imm(&mut self, bus: &mut dyn Bus, opcode: u8) -> u32 {
        debug_assert!(matches!(
            opcode,
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE
        ));

        let value = self.operand8(bus);
        self.alu_op(opcode >> 3, value);
        self.advance(2);
        8
    }

    /// RLCA / RRCA / RLA / RRA. Same as the CB rotates except Z is always
    /// cleared.
    pub(crate) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));

        let op = Shift::from_index(opcode >> 3);
        self.regs.a = self.alu_shift(op, self.regs.a);
        self.set_flag(Flags::Z, false);
        self.advance(1);
        4
    }

    /// ADD HL,rr
    pub(crate) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        debug_assert!(matches!(opcode, 0x09 | 0x19 | 0x29 | 0x39));

        let value = self.read_rp(opcode >> 4);
        self.alu_add16_hl(value);
        self.advance(1);
        8
    }

    pub(crate) fn exec_add_sp_r8(&mut self, bus: &mut dyn Bus) -> u32 {
        let imm = self.operand8(bus);
        self.regs.sp = self.alu_add16_signed(self.regs.sp, imm);
        self.advance(2);
        16
    }

    pub(crate) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        self.advance(1);
        4
    }

    pub(crate) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flags::H, true);
        self.set_flag(Flags::N, true);
        self.advance(1);
        4
    }

    pub(crate) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flags::C, true);
        self.set_flag(Flags::H, false);
        self.set_flag(Flags::N, false);
        self.advance(1);
        4
    }

    pub(crate) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flags::C);
        self.set_flag(Flags::C, !carry);
        self.set_flag(Flags::H, false);
        self.set_flag(Flags::N, false);
        self.advance(1);
        4
    }
}
