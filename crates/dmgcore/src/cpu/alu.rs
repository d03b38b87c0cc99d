use super::{Cpu, Flags};

/// Rotate/shift operations shared by the accumulator rotates (RLCA, RRCA,
/// RLA, RRA) and the CB-prefixed group. The discriminant is the `y` field of
/// a CB opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Shift {
    Rlc = 0,
    Rrc = 1,
    Rl = 2,
    Rr = 3,
    Sla = 4,
    Sra = 5,
    Swap = 6,
    Srl = 7,
}

impl Shift {
    pub(super) fn from_index(index: u8) -> Self {
        match index & 0x07 {
            0 => Shift::Rlc,
            1 => Shift::Rrc,
            2 => Shift::Rl,
            3 => Shift::Rr,
            4 => Shift::Sla,
            5 => Shift::Sra,
            6 => Shift::Swap,
            _ => Shift::Srl,
        }
    }
}

impl Cpu {
    /// Replace all four flags at once. The low nibble of F is kept.
    fn write_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        let mut flags = Flags::empty();
        flags.set(Flags::Z, z);
        flags.set(Flags::N, n);
        flags.set(Flags::H, h);
        flags.set(Flags::C, c);
        self.regs.f = (self.regs.f & 0x0F) | flags.bits();
    }

    /// ADD A,value, or ADC when `with_carry` is set.
    pub(super) fn alu_add(&mut self, value: u8, with_carry: bool) {
        let a = self.regs.a;
        let carry_in = u8::from(with_carry && self.get_flag(Flags::C));

        let (partial, c1) = a.overflowing_add(value);
        let (sum, c2) = partial.overflowing_add(carry_in);
        let half = (a & 0x0F) + (value & 0x0F) + carry_in > 0x0F;

        self.regs.a = sum;
        self.write_flags(sum == 0, false, half, c1 || c2);
    }

    /// A minus `value` (and the borrow, for SBC). Sets the flags and returns
    /// the difference without storing it, so CP can share it.
    fn sub8(&mut self, value: u8, with_carry: bool) -> u8 {
        let a = self.regs.a;
        let borrow_in = u8::from(with_carry && self.get_flag(Flags::C));

        let (partial, b1) = a.overflowing_sub(value);
        let (diff, b2) = partial.overflowing_sub(borrow_in);
        let half = (a & 0x0F) < (value & 0x0F) + borrow_in;

        self.write_flags(diff == 0, true, half, b1 || b2);
        diff
    }

    /// SUB A,value, or SBC when `with_carry` is set.
    pub(super) fn alu_sub(&mut self, value: u8, with_carry: bool) {
        self.regs.a = self.sub8(value, with_carry);
    }

    /// CP: flags of `A - value`, A unchanged.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub8(value, false);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;
        self.write_flags(result == 0, false, true, false);
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;
        self.write_flags(result == 0, false, false, false);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;
        self.write_flags(result == 0, false, false, false);
    }

    /// DAA: turn A back into packed BCD after an add or subtract.
    ///
    /// The correction depends on the previous operation (N) and its H and C
    /// outcome. N is kept, H is cleared, C records whether the high digit
    /// needed correcting.
    pub(super) fn alu_daa(&mut self) {
        let a = self.regs.a;
        let flags = self.regs.flags();
        let subtract = flags.contains(Flags::N);

        let mut correction = 0u8;
        let mut carry = flags.contains(Flags::C);
        if flags.contains(Flags::H) || (!subtract && a & 0x0F > 0x09) {
            correction |= 0x06;
        }
        if carry || (!subtract && a > 0x99) {
            correction |= 0x60;
            carry = true;
        }

        let result = if subtract {
            a.wrapping_sub(correction)
        } else {
            a.wrapping_add(correction)
        };
        self.regs.a = result;
        self.write_flags(result == 0, subtract, false, carry);
    }

    /// INC r / INC (HL). C is untouched.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, value & 0x0F == 0x0F);
        result
    }

    /// DEC r / DEC (HL). C is untouched; H is the borrow into bit 4, i.e. the
    /// low nibble was zero. 0x00 wraps to 0xFF.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flags::Z, result == 0);
        self.set_flag(Flags::N, true);
        self.set_flag(Flags::H, value & 0x0F == 0);
        result
    }

    /// ADD HL,rr. Z is untouched, N cleared, H from bit 11, C from bit 15.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);

        self.set_flag(Flags::N, false);
        self.set_flag(Flags::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flags::C, carry);
        self.regs.set_hl(result);
    }

    /// `base + signed imm8` for ADD SP,r8 and LD HL,SP+r8.
    ///
    /// H and C come from adding the raw byte to the low byte of `base`, as
    /// if unsigned. Z and N are cleared.
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let low = base as u8;
        let half = (low & 0x0F) + (imm8 & 0x0F) > 0x0F;
        let (_, carry) = low.overflowing_add(imm8);

        self.write_flags(false, false, half, carry);
        base.wrapping_add_signed(imm8 as i8 as i16)
    }

    /// Rotate or shift `value` and set Z, N, H, C the way the CB group does
    /// (Z from the result, N = H = 0, C = bit shifted out).
    pub(super) fn alu_shift(&mut self, op: Shift, value: u8) -> u8 {
        let carry_in = self.get_flag(Flags::C);
        let (result, carry) = match op {
            Shift::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Shift::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Shift::Rl => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            Shift::Rr => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            Shift::Sla => (value << 1, value & 0x80 != 0),
            Shift::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Shift::Swap => (value.rotate_left(4), false),
            Shift::Srl => (value >> 1, value & 0x01 != 0),
        };

        self.write_flags(result == 0, false, false, carry);
        result
    }
}
