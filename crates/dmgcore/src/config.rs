use typed_builder::TypedBuilder;

use crate::error::ConfigError;
use crate::CYCLES_PER_FRAME;

/// What the engine does with a byte that has no opcode table entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnmappedOpcodes {
    /// Stop with a decode fault. The production behaviour.
    #[default]
    Fault,
    /// Execute a 1-byte, 4-cycle NOP and log a warning. Only meant for
    /// bring-up testing against images that use instructions the core does
    /// not model yet.
    Nop,
}

/// Engine configuration.
///
/// ```
/// use dmgcore::{EngineConfig, UnmappedOpcodes};
///
/// let config = EngineConfig::builder()
///     .cycles_per_frame(70_224)
///     .unmapped_opcodes(UnmappedOpcodes::Nop)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct EngineConfig {
    /// T-cycles per frame. Changes timing granularity only, never what an
    /// instruction does.
    #[builder(default = CYCLES_PER_FRAME)]
    pub cycles_per_frame: u32,
    #[builder(default)]
    pub unmapped_opcodes: UnmappedOpcodes,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl EngineConfig {
    /// Derive the frame budget from a clock rate and a refresh rate.
    ///
    /// `from_clock(4_194_304, 60)` gives the DMG default of 69_905 cycles.
    pub fn from_clock(clock_hz: u32, refresh_hz: u32) -> Result<Self, ConfigError> {
        if refresh_hz == 0 {
            return Err(ConfigError::ZeroRefreshRate);
        }
        let config = Self::builder()
            .cycles_per_frame(clock_hz / refresh_hz)
            .build();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cycles_per_frame == 0 {
            return Err(ConfigError::ZeroCycleBudget);
        }
        Ok(())
    }
}
