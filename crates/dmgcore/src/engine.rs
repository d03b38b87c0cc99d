use crate::config::{EngineConfig, UnmappedOpcodes};
use crate::cpu::{Cpu, Registers, UNMAPPED_NOP};
use crate::error::{ConfigError, EngineError, MemoryError};
use crate::memory::{Bus, Memory};

#[cfg(test)]
mod tests;

/// Why the engine stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// A HALT instruction executed.
    HaltInstruction,
    /// The byte at `pc` has no opcode table entry.
    DecodeFault { opcode: u8, pc: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Terminal until [`Engine::reset`].
    Halted(HaltReason),
}

/// Summary of one `run_frame` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames completed so far, this one included.
    pub frame: u64,
    /// T-cycles consumed, overshoot of the last instruction included.
    pub cycles: u32,
    /// Instructions executed.
    pub steps: u64,
    /// False when a HALT stopped the frame before the budget was met. The
    /// host refresh hook is only called for completed frames.
    pub completed: bool,
}

/// Fetch-decode-execute loop with per-frame cycle accounting.
///
/// Owns the CPU and the bus exclusively. The host drives it one frame at a
/// time and is notified through [`Bus::end_frame`] whenever a frame's cycle
/// budget has been consumed.
pub struct Engine<B: Bus = Memory> {
    cpu: Cpu,
    bus: B,
    config: EngineConfig,
    state: EngineState,
    /// Cycles accumulated in the current frame.
    frame_cycles: u32,
    frames: u64,
}

impl Engine<Memory> {
    /// Engine over a zeroed flat memory, all registers zero.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        Self::with_bus(config, Memory::new())
    }

    /// Copy a raw image into memory starting at address 0.
    ///
    /// Registers are not touched; execution starts wherever PC points
    /// (0x0000 after construction or reset).
    pub fn load_image(&mut self, image: &[u8]) -> Result<(), MemoryError> {
        self.bus.load(0, image)?;
        log::info!("loaded {} byte image at 0x0000", image.len());
        Ok(())
    }

    pub fn memory(&self) -> &Memory {
        &self.bus
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.bus
    }
}

impl<B: Bus> Engine<B> {
    /// Engine over a host-provided bus. The config is validated here so an
    /// invalid budget never reaches a frame.
    pub fn with_bus(config: EngineConfig, bus: B) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            cpu: Cpu::new(),
            bus,
            config,
            state: EngineState::Running,
            frame_cycles: 0,
            frames: 0,
        })
    }

    /// Zero the registers, clear the counters and return to Running.
    ///
    /// The bus (and so any loaded image) is left as is.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.state = EngineState::Running;
        self.frame_cycles = 0;
        self.frames = 0;
        log::info!("engine reset");
    }

    /// Execute a single instruction and return the T-cycles it took.
    ///
    /// The cycles are added to the current frame's total. A decode fault
    /// leaves registers and memory untouched and halts the engine.
    pub fn step(&mut self) -> Result<u32, EngineError> {
        if let EngineState::Halted(_) = self.state {
            return Err(EngineError::Halted);
        }

        // PC is not pre-incremented; the handler moves it.
        let pc = self.cpu.regs.pc;
        let (opcode, decoded) = self.cpu.fetch(&mut self.bus);
        let instr = match decoded {
            Ok(instr) => instr,
            Err(source) => match self.config.unmapped_opcodes {
                UnmappedOpcodes::Nop => {
                    log::warn!("unmapped opcode 0x{opcode:02X} at PC=0x{pc:04X} executed as NOP");
                    &UNMAPPED_NOP
                }
                UnmappedOpcodes::Fault => {
                    log::error!(
                        "decode fault: unimplemented opcode 0x{opcode:02X} ({})",
                        self.cpu.regs
                    );
                    self.state = EngineState::Halted(HaltReason::DecodeFault { opcode, pc });
                    return Err(EngineError::Decode { pc, source });
                }
            },
        };

        let cycles = self.cpu.execute(&mut self.bus, instr, opcode);
        self.frame_cycles = self.frame_cycles.saturating_add(cycles);

        if self.cpu.is_halted() {
            log::info!("HALT at PC=0x{pc:04X}");
            self.state = EngineState::Halted(HaltReason::HaltInstruction);
        }

        Ok(cycles)
    }

    /// Run until the frame's cycle budget is met, then notify the bus and
    /// start the next frame from zero.
    ///
    /// The budget is checked only between instructions, so the last
    /// instruction may overshoot it; the overshoot is not carried over.
    pub fn run_frame(&mut self) -> Result<FrameReport, EngineError> {
        if let EngineState::Halted(_) = self.state {
            return Err(EngineError::Halted);
        }

        let mut steps = 0u64;
        while self.frame_cycles < self.config.cycles_per_frame {
            self.step()?;
            steps += 1;

            if !self.is_running() {
                return Ok(FrameReport {
                    frame: self.frames,
                    cycles: self.frame_cycles,
                    steps,
                    completed: false,
                });
            }
        }

        let cycles = self.frame_cycles;
        self.frames += 1;
        self.frame_cycles = 0;
        self.bus.end_frame(self.frames);
        log::debug!(
            "frame {} complete: {} cycles in {} steps",
            self.frames,
            cycles,
            steps
        );

        Ok(FrameReport {
            frame: self.frames,
            cycles,
            steps,
            completed: true,
        })
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn registers(&self) -> &Registers {
        &self.cpu.regs
    }

    /// Direct register access, e.g. to point PC at an entry point before
    /// the first frame.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.cpu.regs
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == EngineState::Running
    }

    /// Frames completed since construction or the last reset.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Cycles accumulated so far in the frame in progress.
    pub fn frame_cycles(&self) -> u32 {
        self.frame_cycles
    }
}
