use std::io;
use std::io::Read;

use log::{error, trace, warn};

use crate::constants::{MEMORY_SIZE, PROGRAM_START};
use crate::error::Fault;
use crate::instruction;
use crate::opcode::Opcode;
use crate::state::{FrameBuffer, Keypad, State};

/// Execution mode of the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Fetch-decode-execute proceeds normally.
    Ready,
    /// Suspended on `Fx0A`; no cycles run and no timers tick until a
    /// keypress arrives.
    AwaitingKey,
    /// An unrecoverable fault stopped the machine permanently.
    Halted,
}

/// How the machine responds to unsupported or unimplemented opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// Log the opcode and keep executing; what most ROM-era interpreters do.
    Lenient,
    /// Halt on any fault.
    Strict,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns the machine `State`, the pressed-key flags, and the fault policy.
///
/// Supplies interfaces for:
/// - loading ROMs
/// - pressing and releasing keys
/// - advancing the CPU one fetch-decode-execute cycle at a time
/// - ticking its timers on an external cadence
/// - taking its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    pressed_keys: Keypad,
    policy: FaultPolicy,
    fault: Option<Fault>,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8::with_policy(FaultPolicy::Lenient)
    }

    pub fn with_policy(policy: FaultPolicy) -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; 16],
            policy,
            fault: None,
        }
    }

    /// Loads a ROM into memory at the program start address.
    ///
    /// # Arguments
    /// * `reader` a reader over raw ROM bytes
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), io::Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;

        let start = PROGRAM_START as usize;
        if rom.len() > MEMORY_SIZE - start {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("ROM of {} bytes does not fit in memory", rom.len()),
            ));
        }
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        Ok(())
    }

    /// The dispatcher's current mode.
    pub fn mode(&self) -> Mode {
        if self.fault.is_some() {
            Mode::Halted
        } else if self.state.awaiting_key.is_some() {
            Mode::AwaitingKey
        } else {
            Mode::Ready
        }
    }

    /// The fault that halted the machine, if any.
    pub fn fault(&self) -> Option<Fault> {
        self.fault
    }

    /// Takes the frame buffer if the display should be redrawn.
    ///
    /// Clears the draw flag, so one draw or clear instruction produces
    /// exactly one flush to the renderer.
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Sets the pressed status of `key` and resolves a pending `Fx0A`.
    ///
    /// # Arguments
    /// * `key` the logical key 0x0..=0xF that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[usize::from(key & 0xF)] = true;
        if let Some(register) = self.state.awaiting_key {
            self.state.v[register] = key & 0xF;
            self.state.awaiting_key = None;
        }
    }

    /// Unsets the pressed status of `key`.
    ///
    /// # Arguments
    /// * `key` the logical key 0x0..=0xF that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[usize::from(key & 0xF)] = false;
    }

    /// Advances the CPU by a single fetch-decode-execute cycle.
    ///
    /// Does nothing unless the machine is `Ready`. Recoverable faults are
    /// logged and skipped under the lenient policy with the cycle's state
    /// otherwise unchanged; everything else halts the machine and is
    /// returned to the caller.
    pub fn step(&mut self) -> Result<(), Fault> {
        if self.mode() != Mode::Ready {
            return Ok(());
        }
        match self.cycle() {
            Ok(()) => Ok(()),
            Err(fault) if fault.is_recoverable() && self.policy == FaultPolicy::Lenient => {
                warn!("skipping: {}", fault);
                Ok(())
            }
            Err(fault) => {
                error!("halting: {}", fault);
                self.fault = Some(fault);
                Err(fault)
            }
        }
    }

    fn cycle(&mut self) -> Result<(), Fault> {
        let op = self.fetch()?;
        // advance past the opcode before executing so that jump and call
        // targets are absolute
        self.state.pc += 2;
        let operation = instruction::decode(op)?;
        self.state = operation(op, &self.state, &self.pressed_keys)?;
        trace!(
            "{} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        Ok(())
    }

    /// Fetches the big-endian opcode at the pc.
    fn fetch(&self) -> Result<Opcode, Fault> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Fault::PcOutOfRange(self.state.pc));
        }
        Ok(Opcode::from_bytes(
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ))
    }

    /// Decrements the delay and sound timers by one, flooring at zero.
    ///
    /// Invoked by the driver on a fixed cadence independent of the
    /// instruction rate; gated off while suspended or halted.
    pub fn tick_timers(&mut self) {
        if self.mode() != Mode::Ready {
            return;
        }
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
