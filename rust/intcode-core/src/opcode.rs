//! Opcode table and parameter addressing modes.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumCount, EnumIter};

use crate::Word;

/// Opcodes understood by the Intcode VM.
///
/// The discriminant is the two-digit code found in the low digits of an
/// instruction word.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, EnumCount,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum OpCode {
    Add = 1,                 // a, b, t: mem[t] = a + b
    Mul = 2,                 // a, b, t: mem[t] = a * b
    Input = 3,               // t:       mem[t] = input()
    Output = 4,              // a:       output(a)
    JumpIfTrue = 5,          // a, b:    if a != 0 { pc = b }
    JumpIfFalse = 6,         // a, b:    if a == 0 { pc = b }
    LessThan = 7,            // a, b, t: mem[t] = a < b
    Equals = 8,              // a, b, t: mem[t] = a == b
    AdjustRelativeBase = 9,  // a:       relative_base += a
    Halt = 99,
}

impl OpCode {
    /// Look up the opcode for the low two digits of an instruction word.
    pub const fn from_code(code: Word) -> Option<Self> {
        match code {
            1 => Some(OpCode::Add),
            2 => Some(OpCode::Mul),
            3 => Some(OpCode::Input),
            4 => Some(OpCode::Output),
            5 => Some(OpCode::JumpIfTrue),
            6 => Some(OpCode::JumpIfFalse),
            7 => Some(OpCode::LessThan),
            8 => Some(OpCode::Equals),
            9 => Some(OpCode::AdjustRelativeBase),
            99 => Some(OpCode::Halt),
            _ => None,
        }
    }

    pub const fn code(self) -> Word {
        self as u8 as Word
    }

    pub const fn name(self) -> &'static str {
        match self {
            OpCode::Add => "add",
            OpCode::Mul => "mult",
            OpCode::Input => "input",
            OpCode::Output => "output",
            OpCode::JumpIfTrue => "jump-if-true",
            OpCode::JumpIfFalse => "jump-if-false",
            OpCode::LessThan => "less-than",
            OpCode::Equals => "equals",
            OpCode::AdjustRelativeBase => "adjust-relative-base",
            OpCode::Halt => "halt",
        }
    }

    /// Number of parameter words following the opcode word. This is also how
    /// far the program counter moves past the parameters when no jump occurs.
    pub const fn param_count(self) -> usize {
        match self {
            OpCode::Add | OpCode::Mul | OpCode::LessThan | OpCode::Equals => 3,
            OpCode::JumpIfTrue | OpCode::JumpIfFalse => 2,
            OpCode::Input | OpCode::Output | OpCode::AdjustRelativeBase => 1,
            OpCode::Halt => 0,
        }
    }

    /// Index of the parameter this opcode writes to, if any.
    pub const fn write_param(self) -> Option<usize> {
        match self {
            OpCode::Add | OpCode::Mul | OpCode::LessThan | OpCode::Equals => Some(2),
            OpCode::Input => Some(0),
            _ => None,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a raw parameter word is turned into a value or a write address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ParamMode {
    /// The word is an address.
    Position = 0,
    /// The word is the value itself.
    Immediate = 1,
    /// The word is an offset from the relative base.
    Relative = 2,
}

impl ParamMode {
    pub const fn from_digit(digit: Word) -> Option<Self> {
        match digit {
            0 => Some(ParamMode::Position),
            1 => Some(ParamMode::Immediate),
            2 => Some(ParamMode::Relative),
            _ => None,
        }
    }

    pub const fn digit(self) -> Word {
        self as u8 as Word
    }
}

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamMode::Position => f.write_str("position"),
            ParamMode::Immediate => f.write_str("immediate"),
            ParamMode::Relative => f.write_str("relative"),
        }
    }
}
