use super::*;
use crate::error::DecodeError;

/// Flat memory that records every end-of-frame notification.
#[derive(Default)]
struct RecordingBus {
    mem: Memory,
    frames: Vec<u64>,
}

impl Bus for RecordingBus {
    fn read8(&mut self, addr: u16) -> u8 {
        self.mem.read(addr)
    }

    fn write8(&mut self, addr: u16, value: u8) {
        self.mem.write(addr, value);
    }

    fn end_frame(&mut self, frame: u64) {
        self.frames.push(frame);
    }
}

fn engine_with(image: &[u8]) -> Engine {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    engine.load_image(image).unwrap();
    engine
}

#[test]
fn nop_frame_takes_ceil_budget_over_four_steps() {
    let mut engine = engine_with(&[]);

    let report = engine.run_frame().unwrap();
    assert_eq!(
        report,
        FrameReport {
            frame: 1,
            cycles: 69_908,
            steps: 17_477,
            completed: true,
        }
    );
    assert_eq!(engine.registers().pc, 17_477);
    assert_eq!(engine.frame_cycles(), 0);
    assert_eq!(engine.frames(), 1);
    assert!(engine.is_running());
}

#[test]
fn overshoot_is_not_carried_into_the_next_frame() {
    let mut engine = engine_with(&[]);

    for frame in 1..=5u64 {
        let report = engine.run_frame().unwrap();
        assert_eq!(report.frame, frame);
        assert_eq!(report.steps, 17_477);
        assert_eq!(report.cycles, 69_908);
    }
    // PC wraps through the whole address space without trouble.
    assert_eq!(engine.registers().pc, (5 * 17_477u32 % 0x10000) as u16);
    assert_eq!(engine.state(), EngineState::Running);
}

#[test]
fn tight_loop_runs_frames_indefinitely() {
    // 0x0000: JR -2
    let mut engine = engine_with(&[0x18, 0xFE]);

    for _ in 0..10 {
        let report = engine.run_frame().unwrap();
        // 5825 * 12 = 69_900 is still under budget.
        assert_eq!(report.steps, 5_826);
        assert_eq!(report.cycles, 69_912);
        assert!(report.completed);
    }
    assert_eq!(engine.registers().pc, 0x0000);
    assert_eq!(engine.frames(), 10);
}

#[test]
fn end_frame_hook_runs_once_per_completed_frame() {
    let config = EngineConfig::builder().cycles_per_frame(100).build();
    let mut engine = Engine::with_bus(config, RecordingBus::default()).unwrap();

    for _ in 0..3 {
        engine.run_frame().unwrap();
    }
    assert_eq!(engine.bus().frames, vec![1, 2, 3]);
}

#[test]
fn custom_budget_changes_granularity_only() {
    let config = EngineConfig::builder().cycles_per_frame(10).build();
    let mut engine = Engine::new(config).unwrap();

    let first = engine.run_frame().unwrap();
    assert_eq!(first.steps, 3);
    assert_eq!(first.cycles, 12);

    let second = engine.run_frame().unwrap();
    assert_eq!(second.steps, 3);
    assert_eq!(engine.registers().pc, 6);
}

#[test]
fn step_accumulates_frame_cycles() {
    // 0x0000: LD BC,0x1234
    // 0x0003: NOP
    let mut engine = engine_with(&[0x01, 0x34, 0x12, 0x00]);

    assert_eq!(engine.step().unwrap(), 12);
    assert_eq!(engine.frame_cycles(), 12);
    assert_eq!(engine.step().unwrap(), 4);
    assert_eq!(engine.frame_cycles(), 16);
    assert_eq!(engine.registers().bc(), 0x1234);
    assert_eq!(engine.frames(), 0);
}

#[test]
fn decode_fault_halts_without_side_effects() {
    let mut engine = engine_with(&[0xD3]);
    engine.registers_mut().a = 0x42;
    engine.registers_mut().sp = 0xFFFE;
    let regs = *engine.registers();
    let mem = engine.memory().clone();

    let err = engine.run_frame().unwrap_err();
    assert_eq!(
        err,
        EngineError::Decode {
            pc: 0x0000,
            source: DecodeError::UnimplementedOpcode(0xD3),
        }
    );
    assert_eq!(
        engine.state(),
        EngineState::Halted(HaltReason::DecodeFault {
            opcode: 0xD3,
            pc: 0x0000
        })
    );
    assert_eq!(*engine.registers(), regs);
    assert_eq!(engine.memory().as_slice(), mem.as_slice());
    assert_eq!(engine.frames(), 0);
}

#[test]
fn decode_fault_mid_frame_keeps_earlier_work() {
    // 0x0000: INC A
    // 0x0001: INC A
    // 0x0002: <unmapped>
    let config = EngineConfig::default();
    let mut engine = Engine::with_bus(config, RecordingBus::default()).unwrap();
    engine.bus_mut().mem.load(0, &[0x3C, 0x3C, 0xED]).unwrap();

    let err = engine.run_frame().unwrap_err();
    assert_eq!(
        err,
        EngineError::Decode {
            pc: 0x0002,
            source: DecodeError::UnimplementedOpcode(0xED),
        }
    );
    assert_eq!(engine.registers().a, 2);
    assert_eq!(engine.registers().pc, 0x0002);
    assert_eq!(engine.frame_cycles(), 8);
    assert!(engine.bus().frames.is_empty());
}

#[test]
fn halted_engine_refuses_to_run() {
    let mut engine = engine_with(&[0xFD]);
    assert!(engine.run_frame().is_err());

    assert_eq!(engine.run_frame().unwrap_err(), EngineError::Halted);
    assert_eq!(engine.step().unwrap_err(), EngineError::Halted);
    assert_eq!(engine.registers().pc, 0x0000);
}

#[test]
fn every_unmapped_byte_faults_identically() {
    for opcode in crate::cpu::OPCODES.unmapped() {
        let mut engine = engine_with(&[opcode]);
        let err = engine.step().unwrap_err();
        assert_eq!(
            err,
            EngineError::Decode {
                pc: 0,
                source: DecodeError::UnimplementedOpcode(opcode),
            }
        );
        assert_eq!(*engine.registers(), Registers::default());
    }
}

#[test]
fn nop_mode_skips_unmapped_bytes() {
    // 0x0000: <unmapped>
    // 0x0001: INC A
    let config = EngineConfig::builder()
        .unmapped_opcodes(UnmappedOpcodes::Nop)
        .build();
    let mut engine = Engine::new(config).unwrap();
    engine.load_image(&[0xD3, 0x3C]).unwrap();

    assert_eq!(engine.step().unwrap(), 4);
    assert_eq!(engine.registers().pc, 1);
    assert_eq!(engine.registers().f, 0);

    assert_eq!(engine.step().unwrap(), 4);
    assert_eq!(engine.registers().a, 1);
    assert!(engine.is_running());
}

#[test]
fn halt_ends_the_frame_early() {
    // 0x0000: NOP
    // 0x0001: HALT
    let config = EngineConfig::default();
    let mut engine = Engine::with_bus(config, RecordingBus::default()).unwrap();
    engine.bus_mut().mem.load(0, &[0x00, 0x76]).unwrap();

    let report = engine.run_frame().unwrap();
    assert_eq!(
        report,
        FrameReport {
            frame: 0,
            cycles: 8,
            steps: 2,
            completed: false,
        }
    );
    assert_eq!(
        engine.state(),
        EngineState::Halted(HaltReason::HaltInstruction)
    );
    assert_eq!(engine.registers().pc, 2);
    assert!(engine.bus().frames.is_empty());
    assert_eq!(engine.run_frame().unwrap_err(), EngineError::Halted);
}

#[test]
fn reset_restarts_with_memory_intact() {
    let mut engine = engine_with(&[0x3C, 0x76]);
    engine.run_frame().unwrap();
    assert!(!engine.is_running());

    engine.reset();
    assert!(engine.is_running());
    assert_eq!(*engine.registers(), Registers::default());
    assert_eq!(engine.frames(), 0);
    assert_eq!(engine.frame_cycles(), 0);
    assert_eq!(engine.memory().read(0x0001), 0x76);

    // Same program, same outcome.
    let report = engine.run_frame().unwrap();
    assert!(!report.completed);
    assert_eq!(engine.registers().a, 1);
}

#[test]
fn load_image_rejects_oversized_images() {
    let mut engine = Engine::new(EngineConfig::default()).unwrap();
    let image = vec![0u8; 0x10001];

    assert_eq!(
        engine.load_image(&image),
        Err(MemoryError::ImageTooLarge {
            offset: 0,
            len: 0x10001
        })
    );
    engine.load_image(&image[..0x10000]).unwrap();
}

#[test]
fn zero_budget_is_rejected_at_construction() {
    let config = EngineConfig::builder().cycles_per_frame(0).build();

    assert_eq!(Engine::new(config).err(), Some(ConfigError::ZeroCycleBudget));
    assert_eq!(
        Engine::with_bus(config, RecordingBus::default()).err(),
        Some(ConfigError::ZeroCycleBudget)
    );
}

#[test]
fn entry_point_can_be_moved_before_running() {
    let mut engine = engine_with(&[]);
    engine.memory_mut().write(0x0100, 0x76);
    engine.registers_mut().pc = 0x0100;

    let report = engine.run_frame().unwrap();
    assert_eq!(report.steps, 1);
    assert_eq!(engine.registers().pc, 0x0101);
}

#[test]
fn engine_steps_match_a_bare_cpu() {
    // 0x0000: LD HL,0xC000
    // 0x0003: LD (HL+),A
    // 0x0004: INC A
    // 0x0005: JR NZ,-4
    // 0x0007: DEC B
    // 0x0008: <unmapped>
    let program = [0x21, 0x00, 0xC0, 0x22, 0x3C, 0x20, 0xFC, 0x05, 0xD3];
    let mut engine = engine_with(&program);
    let mut cpu = Cpu::new();
    let mut mem = Memory::new();
    mem.load(0, &program).unwrap();

    loop {
        match (engine.step(), cpu.step(&mut mem)) {
            (Ok(a), Ok(b)) => assert_eq!(a, b),
            (Err(EngineError::Decode { pc, source }), Err(err)) => {
                assert_eq!(pc, 0x0008);
                assert_eq!(source, err);
                break;
            }
            (left, right) => panic!("engine {left:?} vs cpu {right:?}"),
        }
        assert_eq!(engine.registers(), &cpu.regs);
    }
    assert_eq!(engine.memory().as_slice(), mem.as_slice());
    assert_eq!(engine.memory().read(0xC0FF), 0xFF);
}
