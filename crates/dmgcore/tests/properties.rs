use dmgcore::{
    decode, Cpu, DecodeError, Engine, EngineConfig, EngineError, Flags, Memory, Reg16, Reg8,
    Registers, OPCODES,
};
use proptest::prelude::*;

fn registers() -> impl Strategy<Value = Registers> {
    (
        any::<[u8; 8]>(),
        any::<u16>(),
        any::<u16>(),
    )
        .prop_map(|([a, f, b, c, d, e, h, l], sp, pc)| Registers {
            a,
            f,
            b,
            c,
            d,
            e,
            h,
            l,
            sp,
            pc,
        })
}

fn reg8() -> impl Strategy<Value = Reg8> {
    prop::sample::select(Reg8::ALL.to_vec())
}

fn reg16() -> impl Strategy<Value = Reg16> {
    prop::sample::select(Reg16::ALL.to_vec())
}

fn any_flag() -> impl Strategy<Value = Flags> {
    prop::sample::select(vec![Flags::Z, Flags::N, Flags::H, Flags::C])
}

proptest! {
    #[test]
    fn pair_writes_read_back(regs in registers(), reg in reg16(), value in any::<u16>()) {
        let mut regs = regs;
        regs.set16(reg, value);
        prop_assert_eq!(regs.get16(reg), value);

        let [hi, lo] = value.to_be_bytes();
        match reg {
            Reg16::AF => {
                prop_assert_eq!((regs.a, regs.f), (hi, lo));
            }
            Reg16::BC => {
                prop_assert_eq!((regs.b, regs.c), (hi, lo));
            }
            Reg16::DE => {
                prop_assert_eq!((regs.d, regs.e), (hi, lo));
            }
            Reg16::HL => {
                prop_assert_eq!((regs.h, regs.l), (hi, lo));
            }
            Reg16::SP | Reg16::PC => {}
        }
    }

    #[test]
    fn byte_writes_leave_other_registers_alone(
        regs in registers(),
        reg in reg8(),
        value in any::<u8>(),
    ) {
        let mut after = regs;
        after.set8(reg, value);
        prop_assert_eq!(after.get8(reg), value);
        for other in Reg8::ALL.into_iter().filter(|&r| r != reg) {
            prop_assert_eq!(after.get8(other), regs.get8(other));
        }
        prop_assert_eq!((after.sp, after.pc), (regs.sp, regs.pc));
    }

    #[test]
    fn setting_a_flag_touches_only_its_bit(
        f in any::<u8>(),
        flag in any_flag(),
        value in any::<bool>(),
    ) {
        let mut regs = Registers { f, ..Registers::default() };
        regs.set_flag(flag, value);

        prop_assert_eq!(regs.flag(flag), value);
        prop_assert_eq!(regs.f & !flag.bits(), f & !flag.bits());
    }

    #[test]
    fn dec_b_flags(b in any::<u8>(), f in any::<u8>()) {
        let mut cpu = Cpu::new();
        let mut mem = Memory::new();
        mem.write(0, 0x05);
        cpu.regs.b = b;
        cpu.regs.f = f;

        prop_assert_eq!(cpu.step(&mut mem).unwrap(), 4);
        prop_assert_eq!(cpu.regs.b, b.wrapping_sub(1));
        prop_assert_eq!(cpu.get_flag(Flags::Z), b == 1);
        prop_assert!(cpu.get_flag(Flags::N));
        prop_assert_eq!(cpu.get_flag(Flags::H), b & 0x0F == 0);
        prop_assert_eq!(cpu.regs.f & Flags::C.bits(), f & Flags::C.bits());
        prop_assert_eq!(cpu.regs.pc, 1);
    }

    #[test]
    fn inc_then_dec_restores_the_register(value in any::<u8>(), f in any::<u8>()) {
        // 0x0000: INC E
        // 0x0001: DEC E
        let mut cpu = Cpu::new();
        let mut mem = Memory::new();
        mem.load(0, &[0x1C, 0x1D]).unwrap();
        cpu.regs.e = value;
        cpu.regs.f = f;

        cpu.step(&mut mem).unwrap();
        cpu.step(&mut mem).unwrap();
        prop_assert_eq!(cpu.regs.e, value);
        prop_assert_eq!(cpu.regs.f & Flags::C.bits(), f & Flags::C.bits());
    }

    #[test]
    fn jr_nz_targets_the_next_instruction_plus_offset(
        pc in any::<u16>(),
        offset in any::<u8>(),
        zero in any::<bool>(),
    ) {
        let mut cpu = Cpu::new();
        let mut mem = Memory::new();
        mem.write(pc, 0x20);
        mem.write(pc.wrapping_add(1), offset);
        cpu.regs.pc = pc;
        cpu.set_flag(Flags::Z, zero);

        let cycles = cpu.step(&mut mem).unwrap();
        let next = pc.wrapping_add(2);
        if zero {
            prop_assert_eq!(cycles, 8);
            prop_assert_eq!(cpu.regs.pc, next);
        } else {
            prop_assert_eq!(cycles, 12);
            prop_assert_eq!(cpu.regs.pc, next.wrapping_add_signed(offset as i8 as i16));
        }
    }

    #[test]
    fn nop_only_moves_pc(regs in registers()) {
        let mut cpu = Cpu::new();
        let mut mem = Memory::new();
        mem.write(regs.pc, 0x00);
        cpu.regs = regs;

        prop_assert_eq!(cpu.step(&mut mem).unwrap(), 4);
        prop_assert_eq!(
            cpu.regs,
            Registers { pc: regs.pc.wrapping_add(1), ..regs }
        );
    }

    #[test]
    fn decode_is_deterministic(opcode in any::<u8>()) {
        let first = decode(opcode).map(|i| (i.name, i.length));
        let second = decode(opcode).map(|i| (i.name, i.length));
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.is_ok(), OPCODES.is_mapped(opcode));
    }

    #[test]
    fn unmapped_bytes_fault_at_any_address(
        index in 0usize..14,
        pc in any::<u16>(),
        regs in registers(),
    ) {
        let opcode = OPCODES.unmapped().nth(index).unwrap();
        let mut engine = Engine::new(EngineConfig::default()).unwrap();
        engine.memory_mut().write(pc, opcode);
        *engine.registers_mut() = Registers { pc, ..regs };
        let before = *engine.registers();

        let err = engine.step().unwrap_err();
        prop_assert_eq!(
            err,
            EngineError::Decode {
                pc,
                source: DecodeError::UnimplementedOpcode(opcode),
            }
        );
        prop_assert_eq!(*engine.registers(), before);
        prop_assert!(!engine.is_running());
    }
}
