//! Intcode Core
//!
//! Shared types for the Intcode VM: program text, the opcode table, parameter
//! modes, and the instruction decoder.

pub mod instruction;
pub mod opcode;
pub mod program;

pub use instruction::{DecodeError, Instruction, MAX_PARAMS};
pub use opcode::{OpCode, ParamMode};
pub use program::{Program, ProgramParseError};

/// A single memory cell / program word.
pub type Word = i64;
