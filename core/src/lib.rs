pub use chip8::{Chip8, FaultPolicy, Mode};
pub use error::Fault;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
