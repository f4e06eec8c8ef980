use chip8_vm::constants::KEY_COUNT;
use chip8_vm::{Chip8, Chip8Error, Config, RunState};
use proptest::prelude::*;

fn machine(program: &[u8]) -> Chip8 {
    let mut chip8 = Chip8::with_config(Config::default().with_seed(0));
    chip8.load(program).unwrap();
    chip8
}

fn steps(chip8: &mut Chip8, n: usize) {
    for _ in 0..n {
        chip8.step().unwrap();
    }
}

proptest! {
    #[test]
    fn add_zero_leaves_register(x in 0u8..0xF, value in any::<u8>()) {
        let program = [0x60 | x, value, 0x70 | x, 0x00];
        let mut chip8 = machine(&program);
        steps(&mut chip8, 2);
        prop_assert_eq!(chip8.registers()[x as usize], value);
    }

    #[test]
    fn add_complement_wraps_to_zero(x in 0u8..0xF, value in any::<u8>(), flag in any::<u8>()) {
        let program = [
            0x6F, flag,
            0x60 | x, value,
            0x70 | x, value.wrapping_neg(),
        ];
        let mut chip8 = machine(&program);
        steps(&mut chip8, 3);
        prop_assert_eq!(chip8.registers()[x as usize], 0);
        prop_assert_eq!(chip8.registers()[0xF], flag);
    }

    #[test]
    fn nested_calls_return_to_caller(depth in 1usize..=16) {
        // 0x200: CALL sub(1); 0x202: JP 0x202
        // sub(k): CALL sub(k + 1); RET, with the deepest being a bare RET
        let sub = |k: usize| 0x204 + 4 * (k as u16 - 1);
        let call = |addr: u16| [0x20 | (addr >> 8) as u8, addr as u8];
        let mut program = call(sub(1)).to_vec();
        program.extend_from_slice(&[0x12, 0x02]);
        for k in 1..=depth {
            if k < depth {
                program.extend_from_slice(&call(sub(k + 1)));
            }
            program.extend_from_slice(&[0x00, 0xEE]);
            if k == depth {
                program.extend_from_slice(&[0x00, 0x00]);
            }
        }
        let mut chip8 = machine(&program);

        steps(&mut chip8, depth);
        prop_assert_eq!(chip8.stack_depth(), depth);
        prop_assert_eq!(chip8.pc(), sub(depth));
        for level in (0..depth).rev() {
            chip8.step().unwrap();
            let caller = if level == 0 { 0x200 } else { sub(level) };
            prop_assert_eq!(chip8.pc(), caller + 2);
        }
        prop_assert_eq!(chip8.stack_depth(), 0);
    }

    #[test]
    fn draw_twice_restores_frame(
        sprite in proptest::collection::vec(any::<u8>(), 1..=15),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let n = sprite.len() as u8;
        // V0 = x; V1 = y; I = 0x300; DRW; DRW; data at 0x300
        let mut program = vec![0x60, x, 0x61, y, 0xA3, 0x00, 0xD0, 0x10 | n, 0xD0, 0x10 | n];
        program.resize(0x100, 0);
        program.extend_from_slice(&sprite);
        let mut chip8 = machine(&program);

        steps(&mut chip8, 3);
        let before = chip8.frame();
        chip8.step().unwrap();
        prop_assert_eq!(chip8.registers()[0xF], 0);
        chip8.step().unwrap();
        prop_assert_eq!(chip8.frame(), before);
        let any_lit = sprite.iter().any(|&row| row != 0);
        prop_assert_eq!(chip8.registers()[0xF], u8::from(any_lit));
    }

    #[test]
    fn store_then_load_round_trips(x in 0u8..=0xF, values in any::<[u8; 16]>()) {
        // V0..=VF = values; I = 0x400; LD [I], Vx; clear V0..=Vx; LD Vx, [I]
        let mut program = Vec::new();
        for (register, value) in values.iter().enumerate() {
            program.extend_from_slice(&[0x60 | register as u8, *value]);
        }
        program.extend_from_slice(&[0xA4, 0x00, 0xF0 | x, 0x55]);
        for register in 0..=x {
            program.extend_from_slice(&[0x60 | register, 0x00]);
        }
        program.extend_from_slice(&[0xF0 | x, 0x65]);
        let mut chip8 = machine(&program);

        steps(&mut chip8, 16 + 2 + x as usize + 1 + 1);
        let registers = chip8.registers();
        prop_assert_eq!(&registers[..=x as usize], &values[..=x as usize]);
        prop_assert_eq!(chip8.i(), 0x400);
    }

    #[test]
    fn bcd_digits(value in any::<u8>()) {
        let program = [0x65, value, 0xA3, 0x00, 0xF5, 0x33];
        let mut chip8 = machine(&program);
        steps(&mut chip8, 3);
        let digits = &chip8.memory()[0x300..0x303];
        prop_assert_eq!(digits, &[value / 100, value / 10 % 10, value % 10]);
    }

    #[test]
    fn key_wait_holds_until_pressed(register in 0u8..=0xF, key in 0u8..16, idle_frames in 0usize..8) {
        let mut chip8 = machine(&[0xF0 | register, 0x0A]);
        for _ in 0..idle_frames {
            chip8.run_frame([false; KEY_COUNT]).unwrap();
            prop_assert_eq!(chip8.run_state(), RunState::AwaitingKey(register));
            prop_assert_eq!(chip8.pc(), 0x200);
        }
        chip8.key_press(key);
        chip8.step().unwrap();
        prop_assert_eq!(chip8.run_state(), RunState::Running);
        prop_assert_eq!(chip8.registers()[register as usize], key);
        prop_assert_eq!(chip8.pc(), 0x202);
    }
}

#[test]
fn clear_then_draw_never_collides() {
    // draw the 0 glyph, clear, draw it again
    let program = [0xD0, 0x05, 0x00, 0xE0, 0xD0, 0x05];
    let mut chip8 = machine(&program);
    steps(&mut chip8, 2);
    assert!(chip8.frame().iter().flatten().all(|&pixel| pixel == 0));
    chip8.step().unwrap();
    assert_eq!(chip8.registers()[0xF], 0);
}

#[test]
fn calls_beyond_capacity_overflow() {
    // 0x200: CALL 0x200, forever
    let mut chip8 = Chip8::with_config(Config::default().with_stack_depth(12).with_seed(0));
    chip8.load(&[0x22, 0x00]).unwrap();
    steps(&mut chip8, 12);
    assert!(matches!(
        chip8.step(),
        Err(Chip8Error::StackOverflow { capacity: 12 })
    ));
    assert_eq!(chip8.stack_depth(), 12);
}

#[test]
fn load_annn_scenario() {
    let mut chip8 = machine(&[0xA2, 0x2A]);
    chip8.step().unwrap();
    assert_eq!(chip8.i(), 0x22A);
    assert_eq!(chip8.pc(), 0x202);
}
