use log::{debug, warn};
use rand::Rng;

use crate::constants::{FONT_GLYPH_SIZE, FONT_START, VF};
use crate::error::Result;
use crate::instruction::Instruction;
use crate::screen;
use crate::state::{RunState, State};

/// Applies a single decoded instruction to `state`.
///
/// On error `state` is left exactly as it was.
pub fn execute<R: Rng>(
    instruction: Instruction,
    state: &mut State,
    rng: &mut R,
) -> Result<()> {
    use Instruction::*;

    match instruction {
        Cls => clr(state),
        Ret => return rts(state),
        Jump { addr } => jump(state, addr),
        Call { addr } => return call(state, addr),
        SkipEqImm { x, nn } => state.skip_if(state.v[x as usize] == nn),
        SkipNeImm { x, nn } => state.skip_if(state.v[x as usize] != nn),
        SkipEqReg { x, y } => state.skip_if(state.v[x as usize] == state.v[y as usize]),
        LoadImm { x, nn } => load(state, x, nn),
        AddImm { x, nn } => add(state, x, nn),
        Move { x, y } => alu(state, x, y, |_, vy| (vy, None)),
        Or { x, y } => alu(state, x, y, |vx, vy| (vx | vy, None)),
        And { x, y } => alu(state, x, y, |vx, vy| (vx & vy, None)),
        Xor { x, y } => alu(state, x, y, |vx, vy| (vx ^ vy, None)),
        AddReg { x, y } => alu(state, x, y, |vx, vy| {
            let (res, over) = vx.overflowing_add(vy);
            (res, Some(over))
        }),
        Sub { x, y } => alu(state, x, y, |vx, vy| (vx.wrapping_sub(vy), Some(vx > vy))),
        ShiftRight { x, y } => alu(state, x, y, |vx, _| (vx >> 1, Some(vx & 0x1 == 1))),
        SubN { x, y } => alu(state, x, y, |vx, vy| (vy.wrapping_sub(vx), Some(vy > vx))),
        ShiftLeft { x, y } => alu(state, x, y, |vx, _| (vx << 1, Some(vx & 0x80 != 0))),
        SkipNeReg { x, y } => state.skip_if(state.v[x as usize] != state.v[y as usize]),
        LoadI { addr } => loadi(state, addr),
        JumpOffset { addr } => jumpi(state, addr),
        Random { x, nn } => rnd(state, rng, x, nn),
        Draw { x, y, n } => return draw(state, x, y, n),
        SkipKeyPressed { x } => {
            let key = state.v[x as usize] & 0xF;
            state.skip_if(state.keypad.is_pressed(key))
        }
        SkipKeyReleased { x } => {
            let key = state.v[x as usize] & 0xF;
            state.skip_if(!state.keypad.is_pressed(key))
        }
        LoadDelay { x } => moved(state, x),
        WaitKey { x } => keyd(state, x),
        SetDelay { x } => loads(state, x),
        SetSound { x } => ld(state, x),
        AddI { x } => addi(state, x),
        LoadGlyph { x } => ldspr(state, x),
        StoreBcd { x } => return bcd(state, x),
        StoreRegisters { x } => return stor(state, x),
        LoadRegisters { x } => return read(state, x),
        Unknown(op) => {
            warn!("ignoring unknown opcode {:04X} at {:04X}", op, state.pc);
            state.advance()
        }
    }
    Ok(())
}

/// clear
fn clr(state: &mut State) {
    state.frame_buffer = screen::blank();
    state.draw_flag = true;
    state.advance();
}

/// PC = STACK.pop()
fn rts(state: &mut State) -> Result<()> {
    state.pc = state.stack.pop()?;
    Ok(())
}

/// PC = addr
fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC + 2); PC = addr
fn call(state: &mut State, addr: u16) -> Result<()> {
    state.stack.push(state.pc.wrapping_add(2))?;
    state.pc = addr;
    Ok(())
}

/// Vx = nn
fn load(state: &mut State, x: u8, nn: u8) {
    state.v[x as usize] = nn;
    state.advance();
}

/// Vx += nn
/// Overflow is dropped and VF is left alone
fn add(state: &mut State, x: u8, nn: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(nn);
    state.advance();
}

/// Vx = f(Vx, Vy)
/// `f` may also produce a flag; it is computed from the operands and
/// written to VF after the result, so it wins when x is F.
fn alu(state: &mut State, x: u8, y: u8, f: impl Fn(u8, u8) -> (u8, Option<bool>)) {
    let (res, flag) = f(state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = res;
    if let Some(flag) = flag {
        state.v[VF] = u8::from(flag);
    }
    state.advance();
}

/// I = addr
fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
    state.advance();
}

/// PC = V0 + addr
fn jumpi(state: &mut State, addr: u16) {
    state.pc = addr + u16::from(state.v[0x0]);
}

/// Vx = rand_byte & nn
fn rnd<R: Rng>(state: &mut State, rng: &mut R, x: u8, nn: u8) {
    let rand_byte: u8 = rng.gen();
    state.v[x as usize] = rand_byte & nn;
    state.advance();
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite stored at mem[I..I+n] onto the FrameBuffer at Vx, Vy.
/// VF = whether any lit pixel was erased
fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<()> {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    let rows = state.memory.slice(state.i as usize, n as usize)?;
    let collision = screen::draw_sprite(&mut state.frame_buffer, vx, vy, rows);
    state.v[VF] = u8::from(collision);
    state.draw_flag = true;
    state.advance();
    Ok(())
}

/// Vx = DT
fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.timers.delay;
    state.advance();
}

/// Vx = first pressed key, or park until there is one
fn keyd(state: &mut State, x: u8) {
    match state.keypad.first_pressed() {
        Some(key) => {
            state.v[x as usize] = key;
            state.advance();
        }
        None => {
            debug!("awaiting key for V{:X}", x);
            state.run_state = RunState::AwaitingKey(x);
        }
    }
}

/// DT = Vx
fn loads(state: &mut State, x: u8) {
    state.timers.delay = state.v[x as usize];
    state.advance();
}

/// ST = Vx
fn ld(state: &mut State, x: u8) {
    state.timers.sound = state.v[x as usize];
    state.advance();
}

/// I += Vx
/// Wraps at 12 bits; VF is untouched
fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize])) & 0x0FFF;
    state.advance();
}

/// I = address of the font glyph for the low nibble of Vx
fn ldspr(state: &mut State, x: u8) {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = FONT_START + digit * FONT_GLYPH_SIZE;
    state.advance();
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(state: &mut State, x: u8) -> Result<()> {
    let vx = state.v[x as usize];
    state
        .memory
        .write(state.i as usize, &[vx / 100, vx / 10 % 10, vx % 10])?;
    state.advance();
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, x: u8) -> Result<()> {
    state
        .memory
        .write(state.i as usize, &state.v[..=x as usize])?;
    state.advance();
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, x: u8) -> Result<()> {
    let bytes = state.memory.slice(state.i as usize, x as usize + 1)?;
    state.v[..=x as usize].copy_from_slice(bytes);
    state.advance();
    Ok(())
}
