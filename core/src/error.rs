use thiserror::Error;

/// Faults the virtual machine can raise while executing a cycle.
///
/// Unsupported and unimplemented opcodes leave the cycle's state otherwise
/// unchanged (the pc has already advanced past them), so execution can
/// continue under a lenient policy. Everything else indicates the machine
/// state can no longer be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("program counter 0x{0:04X} points outside addressable memory")]
    PcOutOfRange(u16),

    #[error("call with {} return addresses already on the stack", crate::constants::STACK_DEPTH)]
    StackOverflow,

    #[error("return with no caller on the stack")]
    StackUnderflow,

    #[error("memory access of {len} byte(s) at 0x{addr:04X} is out of range")]
    MemoryOutOfRange { addr: u16, len: u16 },

    #[error("unsupported opcode 0x{0:04X}")]
    UnsupportedOpcode(u16),

    #[error("machine language routine at 0x{0:03X} is not implemented")]
    MachineCall(u16),
}

impl Fault {
    /// Whether execution may continue past this fault without corrupting
    /// machine state.
    pub fn is_recoverable(self) -> bool {
        matches!(self, Fault::UnsupportedOpcode(_) | Fault::MachineCall(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_faults_are_recoverable() {
        assert!(Fault::UnsupportedOpcode(0x5001).is_recoverable());
        assert!(Fault::MachineCall(0x123).is_recoverable());
    }

    #[test]
    fn test_state_faults_are_not_recoverable() {
        assert!(!Fault::PcOutOfRange(0xFFF).is_recoverable());
        assert!(!Fault::StackOverflow.is_recoverable());
        assert!(!Fault::StackUnderflow.is_recoverable());
        assert!(!Fault::MemoryOutOfRange { addr: 0xFFF, len: 2 }.is_recoverable());
    }
}
