/// Horizontal display resolution in Chip-8 pixels.
pub const DISPLAY_WIDTH: usize = 64;

/// Vertical display resolution in Chip-8 pixels.
pub const DISPLAY_HEIGHT: usize = 32;

/// Total addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Address at which ROMs are loaded and execution begins.
pub const PROGRAM_START: u16 = 0x200;

/// Maximum number of return addresses the stack can hold.
pub const STACK_DEPTH: usize = 16;

/// Default instruction dispatch rate in cycles per second.
///
/// This is a tunable, not part of the instruction set; most ROMs were written
/// against interpreters running in this neighborhood.
pub const DEFAULT_CLOCK_HZ: u32 = 600;

/// Fixed cadence at which the delay and sound timers are decremented.
pub const TIMER_HZ: u32 = 60;

/// Each font glyph is 5 bytes (8x5 pixels with the low nibble unused).
pub const FONT_GLYPH_SIZE: u16 = 5;

/// Hexadecimal font sprites for 0..F, baked into memory at 0x000 so that
/// `I = Vx * 5` addresses the glyph for digit Vx.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
