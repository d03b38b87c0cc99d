use crate::cpu::Cpu;

impl Cpu {
    pub(crate) fn exec_nop(&mut self) -> u32 {
        self.advance(1);
        4
    }

    /// STOP is a 2-byte instruction; the second byte is padding and is
    /// skipped. Low-power mode belongs to the host, so the core treats it as
    /// a wide NOP.
    pub(crate) fn exec_stop(&mut self) -> u32 {
        self.advance(2);
        4
    }

    /// HALT. Without an interrupt controller there is nothing to wake the
    /// CPU, so the engine treats this as the end of execution.
    pub(crate) fn exec_halt(&mut self) -> u32 {
        self.advance(1);
        self.halted = true;
        4
    }
}
