use thiserror::Error;

/// A fetched byte has no entry in the opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unimplemented opcode 0x{0:02X}")]
    UnimplementedOpcode(u8),
}

impl DecodeError {
    pub fn opcode(&self) -> u8 {
        match *self {
            DecodeError::UnimplementedOpcode(opcode) => opcode,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The image would run past the last addressable byte (0xFFFF).
    #[error("image of {len} bytes at offset 0x{offset:04X} does not fit in the 64 KiB address space")]
    ImageTooLarge { offset: u16, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("per-frame cycle budget must be greater than zero")]
    ZeroCycleBudget,
    #[error("refresh rate must be greater than zero")]
    ZeroRefreshRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The byte at `pc` did not decode. The engine is now halted.
    #[error("decode fault at PC=0x{pc:04X}")]
    Decode {
        pc: u16,
        #[source]
        source: DecodeError,
    },
    /// The engine already reached its terminal state; call `reset` first.
    #[error("engine is halted")]
    Halted,
}
