use std::ops::Range;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT, MEMORY_SIZE, PROGRAM_START, STACK_DEPTH,
};
use crate::error::Fault;

/// The frame buffer is indexed as `[y][x]`.
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// Pressed/released flags for the 16 logical keys `0x0..=0xF`.
pub type Keypad = [bool; 16];

/// A snapshot of the machine's internal state.
///
/// ## CPU
/// - (v) 16 primary 8-bit registers V0..VF; VF doubles as the flag output
///   for carry, borrow, shift-out and sprite collision results
/// - (i) a 16-bit memory address register, logically 12-bit
/// - (pc) a 16-bit program counter, advanced by 2 after each fetch
/// - (sp) the number of live return addresses on the stack
///
/// ## Timers
/// - 2 8-bit counters (delay & sound) that floor at zero and are decremented
///   once per external timer tick, independent of the instruction rate
///
/// ## Memory
/// - 4096 bytes of addressable memory; the font occupies 0x000..0x050 and
///   ROMs load at 0x200
/// - a 16-deep stack of return addresses
/// - a 32x64 binary frame buffer, mutated only by XOR sprite composition
///
/// ## Input
/// - `awaiting_key` holds the register that a pending `Fx0A` will write;
///   while it is set the machine neither executes cycles nor ticks timers
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub awaiting_key: Option<usize>,
}

impl State {
    pub fn new() -> Self {
        // 0x000..0x050 holds the hexadecimal font
        let mut memory = [0; MEMORY_SIZE];
        memory[0..FONT.len()].copy_from_slice(&FONT);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            draw_flag: false,
            awaiting_key: None,
        }
    }

    /// Reads the byte at `addr`, faulting outside addressable memory.
    pub fn read8(&self, addr: u16) -> Result<u8, Fault> {
        self.memory
            .get(addr as usize)
            .copied()
            .ok_or(Fault::MemoryOutOfRange { addr, len: 1 })
    }

    /// Writes the byte at `addr`, faulting outside addressable memory.
    pub fn write8(&mut self, addr: u16, val: u8) -> Result<(), Fault> {
        match self.memory.get_mut(addr as usize) {
            Some(cell) => {
                *cell = val;
                Ok(())
            }
            None => Err(Fault::MemoryOutOfRange { addr, len: 1 }),
        }
    }

    /// Bounds-checks a span of memory and returns it as an index range.
    pub fn span(&self, addr: u16, len: u16) -> Result<Range<usize>, Fault> {
        let start = addr as usize;
        let end = start + len as usize;
        if end > MEMORY_SIZE {
            Err(Fault::MemoryOutOfRange { addr, len })
        } else {
            Ok(start..end)
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
