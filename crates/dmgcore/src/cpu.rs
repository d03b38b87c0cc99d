mod alu;
mod cb;
mod exec;
mod flags;
mod helpers;
mod regs;
mod table;


pub use flags::Flags;
pub use regs::{Reg16, Reg8, Registers};
pub use table::{decode, Handler, Instruction, OpcodeTable, OPCODES};
pub(crate) use table::UNMAPPED_NOP;

use crate::error::DecodeError;
use crate::memory::Bus;

/// Game Boy CPU core.
///
/// Holds the register file and the HALT latch. All state lives here and is
/// mutated by the instruction handlers; the execution engine owns the only
/// instance.
#[derive(Clone, Debug, Default)]
pub struct Cpu {
    pub regs: Registers,
    /// Set by the HALT instruction. The engine turns it into its terminal
    /// Halted state.
    pub(crate) halted: bool,
}

impl Cpu {
    /// A CPU with every register at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return every register to zero and drop the HALT latch.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.halted = false;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Read the opcode at PC and look it up. PC is not moved.
    ///
    /// The opcode byte is returned alongside the lookup so a caller can
    /// report or substitute an unmapped byte.
    pub fn fetch(&self, bus: &mut dyn Bus) -> (u8, Result<&'static Instruction, DecodeError>) {
        let opcode = bus.read8(self.regs.pc);
        (opcode, decode(opcode))
    }

    /// Fetch, decode and execute the instruction at PC.
    ///
    /// Returns the number of T-cycles taken. On a decode fault nothing is
    /// modified.
    pub fn step(&mut self, bus: &mut dyn Bus) -> Result<u32, DecodeError> {
        let (opcode, instr) = self.fetch(bus);
        Ok(self.execute(bus, instr?, opcode))
    }

    /// Run an already decoded instruction.
    #[inline]
    pub fn execute(&mut self, bus: &mut dyn Bus, instr: &Instruction, opcode: u8) -> u32 {
        log::trace!(
            "PC=0x{:04X} op=0x{opcode:02X} {}",
            self.regs.pc,
            instr.name
        );
        (instr.handler)(self, bus, opcode)
    }
}
