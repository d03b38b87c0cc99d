use lazy_static::lazy_static;

use crate::error::DecodeError;
use crate::memory::Bus;

use super::Cpu;

/// Instruction handler. Receives the opcode byte so one handler can serve a
/// whole encoding group; returns the T-cycles taken.
pub type Handler = fn(&mut Cpu, &mut dyn Bus, u8) -> u32;

/// Entry in the opcode table.
#[derive(Clone, Copy)]
pub struct Instruction {
    /// Assembler form of the encoding group, e.g. `"LD r,d8"`.
    pub name: &'static str,
    /// Encoded length in bytes, opcode included.
    pub length: u8,
    pub handler: Handler,
}

impl std::fmt::Debug for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Instruction")
            .field("name", &self.name)
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

/// Fixed mapping from opcode byte to instruction. Immutable once built.
pub struct OpcodeTable {
    entries: [Option<Instruction>; 256],
}

lazy_static! {
    /// The unprefixed SM83 opcode table, built on first use.
    pub static ref OPCODES: OpcodeTable = OpcodeTable::build();
}

/// Resolve an opcode byte to its instruction.
///
/// Pure: the same byte always gives the same answer, and a failed lookup
/// touches no CPU or memory state.
pub fn decode(opcode: u8) -> Result<&'static Instruction, DecodeError> {
    OPCODES
        .get(opcode)
        .ok_or(DecodeError::UnimplementedOpcode(opcode))
}

/// Stand-in used by the engine's bring-up mode for bytes with no entry.
pub(crate) static UNMAPPED_NOP: Instruction = Instruction {
    name: "NOP (unmapped)",
    length: 1,
    handler: nop,
};

fn nop(cpu: &mut Cpu, _bus: &mut dyn Bus, _opcode: u8) -> u32 {
    cpu.exec_nop()
}

/// Opcodes with a common layout where a 3-bit field sits at bits 3–5.
fn column(base: u8) -> impl Iterator<Item = u8> {
    (0u8..8).map(move |i| base | (i << 3))
}

impl OpcodeTable {
    #[inline]
    pub fn get(&self, opcode: u8) -> Option<&Instruction> {
        self.entries[opcode as usize].as_ref()
    }

    pub fn is_mapped(&self, opcode: u8) -> bool {
        self.entries[opcode as usize].is_some()
    }

    /// Every byte without an instruction, in ascending order.
    pub fn unmapped(&self) -> impl Iterator<Item = u8> + '_ {
        (0u8..=0xFF).filter(move |&op| !self.is_mapped(op))
    }

    fn set(
        &mut self,
        opcodes: impl IntoIterator<Item = u8>,
        name: &'static str,
        length: u8,
        handler: Handler,
    ) {
        for opcode in opcodes {
            debug_assert!(
                self.entries[opcode as usize].is_none(),
                "opcode 0x{opcode:02X} registered twice"
            );
            self.entries[opcode as usize] = Some(Instruction {
                name,
                length,
                handler,
            });
        }
    }

    fn build() -> Self {
        let mut t = Self {
            entries: [None; 256],
        };

        // 0x00–0x3F: loads, 8/16-bit INC/DEC, accumulator rotates, JR.
        t.set([0x00], "NOP", 1, nop);
        t.set([0x01, 0x11, 0x21, 0x31], "LD rr,d16", 3, |c, b, op| {
            c.exec_ld_rr_d16(b, op)
        });
        t.set([0x02, 0x12, 0x22, 0x32], "LD (rr),A", 1, |c, b, op| {
            c.exec_ld_indirect_a(b, op)
        });
        t.set([0x0A, 0x1A, 0x2A, 0x3A], "LD A,(rr)", 1, |c, b, op| {
            c.exec_ld_a_indirect(b, op)
        });
        t.set([0x03, 0x13, 0x23, 0x33], "INC rr", 1, |c, _, op| {
            c.exec_inc16(op)
        });
        t.set([0x0B, 0x1B, 0x2B, 0x3B], "DEC rr", 1, |c, _, op| {
            c.exec_dec16(op)
        });
        t.set(column(0x04), "INC r", 1, |c, b, op| c.exec_inc8(b, op));
        t.set(column(0x05), "DEC r", 1, |c, b, op| c.exec_dec8(b, op));
        t.set(column(0x06), "LD r,d8", 2, |c, b, op| c.exec_ld_r_d8(b, op));
        t.set([0x07, 0x0F, 0x17, 0x1F], "RLCA/RRCA/RLA/RRA", 1, |c, _, op| {
            c.exec_rotate_a(op)
        });
        t.set([0x08], "LD (a16),SP", 3, |c, b, _| c.exec_ld_a16_sp(b));
        t.set([0x09, 0x19, 0x29, 0x39], "ADD HL,rr", 1, |c, _, op| {
            c.exec_add_hl_rr(op)
        });
        t.set([0x10], "STOP", 2, |c, _, _| c.exec_stop());
        t.set([0x18], "JR r8", 2, |c, b, _| c.exec_jr(b));
        t.set([0x20, 0x28, 0x30, 0x38], "JR cc,r8", 2, |c, b, op| {
            c.exec_jr_cc(b, op)
        });
        t.set([0x27], "DAA", 1, |c, _, _| c.exec_daa());
        t.set([0x2F], "CPL", 1, |c, _, _| c.exec_cpl());
        t.set([0x37], "SCF", 1, |c, _, _| c.exec_scf());
        t.set([0x3F], "CCF", 1, |c, _, _| c.exec_ccf());

        // 0x40–0x7F: register transfers, with HALT in the (HL),(HL) slot.
        t.set((0x40..=0x7F).filter(|&op| op != 0x76), "LD r,r'", 1, |c, b, op| {
            c.exec_ld_r_r(b, op)
        });
        t.set([0x76], "HALT", 1, |c, _, _| c.exec_halt());

        // 0x80–0xBF: 8-bit ALU on A.
        t.set(0x80..=0xBF, "ALU A,r", 1, |c, b, op| c.exec_alu_reg(b, op));

        // 0xC0–0xFF: stack, absolute control flow, high-page loads.
        t.set(column(0xC6), "ALU A,d8", 2, |c, b, op| c.exec_alu_imm(b, op));
        t.set(column(0xC7), "RST n", 1, |c, b, op| c.exec_rst(b, op));
        t.set([0xC0, 0xC8, 0xD0, 0xD8], "RET cc", 1, |c, b, op| {
            c.exec_ret_cc(b, op)
        });
        t.set([0xC1, 0xD1, 0xE1, 0xF1], "POP rr", 1, |c, b, op| {
            c.exec_pop_rr(b, op)
        });
        t.set([0xC5, 0xD5, 0xE5, 0xF5], "PUSH rr", 1, |c, b, op| {
            c.exec_push_rr(b, op)
        });
        t.set([0xC2, 0xCA, 0xD2, 0xDA], "JP cc,a16", 3, |c, b, op| {
            c.exec_jp_cc(b, op)
        });
        t.set([0xC3], "JP a16", 3, |c, b, _| c.exec_jp_a16(b));
        t.set([0xE9], "JP HL", 1, |c, _, _| c.exec_jp_hl());
        t.set([0xC4, 0xCC, 0xD4, 0xDC], "CALL cc,a16", 3, |c, b, op| {
            c.exec_call_cc(b, op)
        });
        t.set([0xCD], "CALL a16", 3, |c, b, _| c.exec_call_a16(b));
        t.set([0xC9], "RET", 1, |c, b, _| c.exec_ret(b));
        t.set([0xCB], "PREFIX CB", 2, |c, b, _| c.exec_cb(b));
        t.set([0xE0, 0xF0], "LDH (a8)", 2, |c, b, op| c.exec_ldh_a8(b, op));
        t.set([0xE2, 0xF2], "LD (C)", 1, |c, b, op| c.exec_ldh_c(b, op));
        t.set([0xEA, 0xFA], "LD (a16)", 3, |c, b, op| c.exec_ld_a16_a(b, op));
        t.set([0xE8], "ADD SP,r8", 2, |c, b, _| c.exec_add_sp_r8(b));
        t.set([0xF8], "LD HL,SP+r8", 2, |c, b, _| c.exec_ld_hl_sp_r8(b));
        t.set([0xF9], "LD SP,HL", 1, |c, _, _| c.exec_ld_sp_hl());

        // Left unmapped: DI (F3), EI (FB) and RETI (D9) need an interrupt
        // controller, and D3 DB DD E3 E4 EB EC ED F4 FC FD are the opcode
        // holes that lock up real hardware.
        t
    }
}
