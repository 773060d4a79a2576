//! Error types for the engine and its I/O hooks.

use intcode_core::{DecodeError, Word};
use thiserror::Error;

use crate::vm::VmState;

/// Failure reported by an input or output hook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HookError {
    #[error("input exhausted")]
    Exhausted,
    #[error("hook disconnected")]
    Disconnected,
    #[error("hook failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("unknown opcode {opcode} in instruction {instruction}")]
    UnknownOpcode { opcode: Word, instruction: Word },
    #[error("unknown parameter mode in instruction {instruction}")]
    InvalidParameterMode { instruction: Word },
    #[error("program wants input but no input hook provided")]
    MissingInputHook,
    #[error("program wants to output but no output hook provided")]
    MissingOutputHook,
    #[error(transparent)]
    Hook(#[from] HookError),
    #[error("immediate-mode write in instruction {instruction}")]
    ImmediateWrite { instruction: Word },
    #[error("address {address} out of bounds for memory of length {len}")]
    AddressOutOfBounds { address: usize, len: usize },
    #[error("negative address {0}")]
    NegativeAddress(Word),
    #[error("address computation overflowed")]
    AddressOverflow,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
    #[error("position {position} ran past end of memory (length {len}) without halting")]
    PositionOutOfBounds { position: usize, len: usize },
    #[error("instruction limit exceeded: {0}")]
    InstructionLimitExceeded(u64),
    #[error("vm is not running: {0}")]
    NotRunning(VmState),
}

impl From<DecodeError> for VmError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnknownOpcode {
                opcode,
                instruction,
            } => VmError::UnknownOpcode {
                opcode,
                instruction,
            },
            DecodeError::InvalidParameterMode { instruction } => {
                VmError::InvalidParameterMode { instruction }
            }
        }
    }
}

impl VmError {
    pub fn is_unknown_opcode(&self) -> bool {
        matches!(self, VmError::UnknownOpcode { .. })
    }

    pub fn is_invalid_parameter_mode(&self) -> bool {
        matches!(self, VmError::InvalidParameterMode { .. })
    }

    /// True for a missing input or output hook.
    pub fn is_missing_hook(&self) -> bool {
        matches!(self, VmError::MissingInputHook | VmError::MissingOutputHook)
    }

    pub fn is_hook_failure(&self) -> bool {
        matches!(self, VmError::Hook(_))
    }

    pub fn is_instruction_limit_exceeded(&self) -> bool {
        matches!(self, VmError::InstructionLimitExceeded(_))
    }

    /// True for any out-of-range or malformed memory address.
    pub fn is_address_error(&self) -> bool {
        matches!(
            self,
            VmError::AddressOutOfBounds { .. }
                | VmError::NegativeAddress(_)
                | VmError::AddressOverflow
                | VmError::PositionOutOfBounds { .. }
        )
    }
}
