//! Instruction-execution core for the Game Boy CPU (SM83 / LR35902).
//!
//! The crate models the register file, the flag byte, a flat 64 KiB memory
//! bus, the opcode table and a frame-budgeted execution engine. Anything that
//! sits around the CPU (cartridge parsing, video, audio, timers, interrupts)
//! is left to the host, which plugs in through the [`Bus`] trait.

pub mod config;
pub mod cpu;
pub mod engine;
pub mod error;
pub mod memory;

pub use config::{EngineConfig, UnmappedOpcodes};
pub use cpu::{
    decode, Cpu, Flags, Handler, Instruction, OpcodeTable, Reg16, Reg8, Registers, OPCODES,
};
pub use engine::{Engine, EngineState, FrameReport, HaltReason};
pub use error::{ConfigError, DecodeError, EngineError, MemoryError};
pub use memory::{Bus, Memory};

/// Nominal DMG CPU clock in T-cycles per second.
pub const CPU_CLOCK_HZ: u32 = 4_194_304;
/// Host refresh rate the frame budget is derived from.
pub const FRAME_RATE_HZ: u32 = 60;
/// Default per-frame cycle budget (69_905 T-cycles).
pub const CYCLES_PER_FRAME: u32 = CPU_CLOCK_HZ / FRAME_RATE_HZ;
/// Size of the flat address space in bytes.
pub const MEMORY_SIZE: usize = 0x10000;
