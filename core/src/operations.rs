//! Instruction handlers as pure state transitions.
//!
//! Handlers receive the state with the pc already advanced past the opcode,
//! so jump and call targets are absolute and a skip is a further `pc + 2`.

use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_GLYPH_SIZE, STACK_DEPTH};
use crate::error::Fault;
use crate::opcode::Opcode;
use crate::state::{Keypad, State};

/// 00E0: clear the frame buffer
pub fn clr(_op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        draw_flag: true,
        ..*state
    })
}

/// 00EE: PC = STACK.pop()
pub fn rts(_op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow);
    }
    let sp = state.sp - 1;
    Ok(State {
        pc: state.stack[usize::from(sp)],
        sp,
        ..*state
    })
}

/// 1nnn: PC = nnn
pub fn jump(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        pc: op.nnn(),
        ..*state
    })
}

/// 2nnn: STACK.push(PC); PC = nnn
///
/// The pushed pc already points past the call opcode, so it is the return
/// address as-is.
pub fn call(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    if usize::from(state.sp) == STACK_DEPTH {
        return Err(Fault::StackOverflow);
    }
    let mut stack = state.stack;
    stack[usize::from(state.sp)] = state.pc;
    Ok(State {
        pc: op.nnn(),
        sp: state.sp + 1,
        stack,
        ..*state
    })
}

/// 3xkk: if Vx == kk then pc += 2
pub fn ske(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let pc = if state.v[op.x()] == op.kk() {
        state.pc + 0x2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// 4xkk: if Vx != kk then pc += 2
pub fn skne(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let pc = if state.v[op.x()] != op.kk() {
        state.pc + 0x2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// 5xy0: if Vx == Vy then pc += 2
pub fn skre(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let pc = if state.v[op.x()] == state.v[op.y()] {
        state.pc + 0x2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// 6xkk: Vx = kk
pub fn load(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] = op.kk();
    Ok(State { v, ..*state })
}

/// 7xkk: Vx += kk, wrapping; no flag change
pub fn add(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] = v[op.x()].wrapping_add(op.kk());
    Ok(State { v, ..*state })
}

/// 8xy0: Vx = Vy
pub fn mv(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] = v[op.y()];
    Ok(State { v, ..*state })
}

/// 8xy1: Vx |= Vy
pub fn or(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] |= v[op.y()];
    Ok(State { v, ..*state })
}

/// 8xy2: Vx &= Vy
pub fn and(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] &= v[op.y()];
    Ok(State { v, ..*state })
}

/// 8xy3: Vx ^= Vy
pub fn xor(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] ^= v[op.y()];
    Ok(State { v, ..*state })
}

/// 8xy4: Vx += Vy; VF = carry
pub fn addr(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let (res, carry) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[0xF] = carry as u8;
    Ok(State { v, ..*state })
}

/// 8xy5: Vx -= Vy; VF = 1 iff no borrow (Vx >= Vy)
pub fn sub(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let (res, borrow) = state.v[op.x()].overflowing_sub(state.v[op.y()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[0xF] = !borrow as u8;
    Ok(State { v, ..*state })
}

/// 8xy6: VF = bit 0 of Vx; Vx >>= 1
pub fn shr(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[0xF] = v[op.x()] & 0x1;
    v[op.x()] >>= 1;
    Ok(State { v, ..*state })
}

/// 8xy7: Vx = Vy - Vx; VF = 1 iff no borrow (Vy >= Vx)
pub fn subn(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let (res, borrow) = state.v[op.y()].overflowing_sub(state.v[op.x()]);
    let mut v = state.v;
    v[op.x()] = res;
    v[0xF] = !borrow as u8;
    Ok(State { v, ..*state })
}

/// 8xyE: VF = bit 7 of Vx; Vx <<= 1
pub fn shl(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[0xF] = v[op.x()] >> 7;
    v[op.x()] <<= 1;
    Ok(State { v, ..*state })
}

/// 9xy0: if Vx != Vy then pc += 2
pub fn skrne(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let pc = if state.v[op.x()] != state.v[op.y()] {
        state.pc + 0x2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// Annn: I = nnn
pub fn loadi(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        i: op.nnn(),
        ..*state
    })
}

/// Bnnn: PC = nnn + V0
pub fn jumpi(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        pc: op.nnn() + u16::from(state.v[0x0]),
        ..*state
    })
}

/// Cxkk: Vx = random byte & kk
pub fn rand(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] = rand::random::<u8>() & op.kk();
    Ok(State { v, ..*state })
}

/// Dxyn: XOR the n-row sprite at memory[I..I+n) onto the frame buffer at
/// (Vx, Vy); VF = collision
///
/// Rows wrap mod 32 and columns mod 64; nothing is clipped. A collision is
/// any 1 bit written onto an already-set pixel. The renderer is flushed once
/// for the whole draw via the draw flag, not per pixel.
pub fn draw(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let rows = state.span(state.i, u16::from(op.n()))?;
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    v[0xF] = 0x0;
    for (row, &byte) in state.memory[rows].iter().enumerate() {
        let y = (usize::from(state.v[op.y()]) + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let x = (usize::from(state.v[op.x()]) + bit) % DISPLAY_WIDTH;
            let pixel = (byte >> (7 - bit)) & 0x1;
            v[0xF] |= pixel & frame_buffer[y][x];
            frame_buffer[y][x] ^= pixel;
        }
    }

    Ok(State {
        draw_flag: true,
        v,
        frame_buffer,
        ..*state
    })
}

/// Ex9E: if key Vx is pressed then pc += 2
pub fn skpr(op: Opcode, state: &State, keys: &Keypad) -> Result<State, Fault> {
    let pc = if keys[usize::from(state.v[op.x()] & 0xF)] {
        state.pc + 0x2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// ExA1: if key Vx is not pressed then pc += 2
pub fn skup(op: Opcode, state: &State, keys: &Keypad) -> Result<State, Fault> {
    let pc = if !keys[usize::from(state.v[op.x()] & 0xF)] {
        state.pc + 0x2
    } else {
        state.pc
    };
    Ok(State { pc, ..*state })
}

/// Fx07: Vx = delay timer
pub fn moved(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    v[op.x()] = state.delay_timer;
    Ok(State { v, ..*state })
}

/// Fx0A: suspend until a keypress lands in Vx
///
/// The pc has already moved past this opcode; the machine simply stops
/// executing cycles and ticking timers until the press arrives.
pub fn keyd(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        awaiting_key: Some(op.x()),
        ..*state
    })
}

/// Fx15: delay timer = Vx
pub fn loads(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        delay_timer: state.v[op.x()],
        ..*state
    })
}

/// Fx18: sound timer = Vx
pub fn ld(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        sound_timer: state.v[op.x()],
        ..*state
    })
}

/// Fx1E: I += Vx; VF = 1 and I wraps if the sum leaves the 12-bit range
///
/// The overflow flag is undocumented but relied on by Spacefight 2091.
pub fn addi(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let mut v = state.v;
    let mut i = state.i + u16::from(state.v[op.x()]);
    if i > 0xFFF {
        i -= 0x1000;
        v[0xF] = 0x1;
    } else {
        v[0xF] = 0x0;
    }
    Ok(State { i, v, ..*state })
}

/// Fx29: I = address of the font glyph for digit Vx
pub fn ldspr(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    Ok(State {
        i: u16::from(state.v[op.x()]) * FONT_GLYPH_SIZE,
        ..*state
    })
}

/// Fx33: memory[I..I+3] = BCD digits of Vx (hundreds, tens, ones)
pub fn bcd(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let span = state.span(state.i, 3)?;
    let digits = [
        state.v[op.x()] / 100,
        state.v[op.x()] / 10 % 10,
        state.v[op.x()] % 10,
    ];
    let mut memory = state.memory;
    memory[span].copy_from_slice(&digits);
    Ok(State { memory, ..*state })
}

/// Fx55: memory[I..=I+x] = V0..=Vx
pub fn stor(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let span = state.span(state.i, op.x() as u16 + 1)?;
    let mut memory = state.memory;
    memory[span].copy_from_slice(&state.v[0x0..=op.x()]);
    Ok(State { memory, ..*state })
}

/// Fx65: V0..=Vx = memory[I..=I+x]
pub fn read(op: Opcode, state: &State, _keys: &Keypad) -> Result<State, Fault> {
    let span = state.span(state.i, op.x() as u16 + 1)?;
    let mut v = state.v;
    v[0x0..=op.x()].copy_from_slice(&state.memory[span]);
    Ok(State { v, ..*state })
}
