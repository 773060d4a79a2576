//! Instruction decoding: one raw word into an opcode plus parameter modes.

use std::fmt;

use thiserror::Error;

use crate::opcode::{OpCode, ParamMode};
use crate::Word;

/// Largest parameter count of any opcode.
pub const MAX_PARAMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode {opcode} in instruction {instruction}")]
    UnknownOpcode { opcode: Word, instruction: Word },
    #[error("unknown parameter mode in instruction {instruction}")]
    InvalidParameterMode { instruction: Word },
}

/// A decoded instruction word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    op: OpCode,
    modes: [ParamMode; MAX_PARAMS],
    word: Word,
}

impl Instruction {
    /// Decode `word` as `modes * 100 + opcode`.
    ///
    /// Mode digits are read least-significant first, one per parameter. A
    /// word with nonzero digits beyond the opcode's parameters does not encode
    /// any instruction and is reported as an unknown opcode.
    pub fn decode(word: Word) -> Result<Self, DecodeError> {
        let opcode = word % 100;
        let op = OpCode::from_code(opcode).ok_or(DecodeError::UnknownOpcode {
            opcode,
            instruction: word,
        })?;

        let mut modes = [ParamMode::Position; MAX_PARAMS];
        let mut rest = word / 100;
        for slot in modes.iter_mut().take(op.param_count()) {
            *slot = ParamMode::from_digit(rest % 10)
                .ok_or(DecodeError::InvalidParameterMode { instruction: word })?;
            rest /= 10;
        }
        if rest != 0 {
            return Err(DecodeError::UnknownOpcode {
                opcode,
                instruction: word,
            });
        }

        Ok(Self { op, modes, word })
    }

    pub fn op(&self) -> OpCode {
        self.op
    }

    /// The raw word this instruction was decoded from.
    pub fn word(&self) -> Word {
        self.word
    }

    pub fn param_count(&self) -> usize {
        self.op.param_count()
    }

    /// Parameter modes in argument order; length equals the parameter count.
    pub fn modes(&self) -> &[ParamMode] {
        &self.modes[..self.op.param_count()]
    }

    /// Mode of parameter `index`. Indices past the parameter count read as
    /// position mode.
    pub fn mode(&self, index: usize) -> ParamMode {
        self.modes().get(index).copied().unwrap_or(ParamMode::Position)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op)?;
        for (i, mode) in self.modes().iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}", sep, mode)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn decode_plain_add() {
        let ins = Instruction::decode(1).unwrap();
        assert_eq!(ins.op(), OpCode::Add);
        assert_eq!(ins.modes(), &[ParamMode::Position; 3]);
    }

    #[test]
    fn decode_mixed_modes() {
        let ins = Instruction::decode(1002).unwrap();
        assert_eq!(ins.op(), OpCode::Mul);
        assert_eq!(
            ins.modes(),
            &[ParamMode::Position, ParamMode::Immediate, ParamMode::Position]
        );

        let ins = Instruction::decode(21101).unwrap();
        assert_eq!(
            ins.modes(),
            &[ParamMode::Immediate, ParamMode::Immediate, ParamMode::Relative]
        );
        assert_eq!(ins.word(), 21101);
    }

    #[test]
    fn decode_relative_output() {
        let ins = Instruction::decode(204).unwrap();
        assert_eq!(ins.op(), OpCode::Output);
        assert_eq!(ins.modes(), &[ParamMode::Relative]);
    }

    #[test]
    fn modes_length_matches_param_count() {
        for op in OpCode::iter() {
            let ins = Instruction::decode(op.code()).unwrap();
            assert_eq!(ins.modes().len(), op.param_count(), "{}", op);
        }
    }

    #[test]
    fn unknown_opcode_reports_word() {
        assert_eq!(
            Instruction::decode(50),
            Err(DecodeError::UnknownOpcode {
                opcode: 50,
                instruction: 50
            })
        );
        assert_eq!(
            Instruction::decode(1250),
            Err(DecodeError::UnknownOpcode {
                opcode: 50,
                instruction: 1250
            })
        );
    }

    #[test]
    fn negative_word_is_unknown() {
        assert!(matches!(
            Instruction::decode(-1),
            Err(DecodeError::UnknownOpcode { opcode: -1, .. })
        ));
    }

    #[test]
    fn halt_with_stray_mode_digits_is_unknown() {
        assert_eq!(
            Instruction::decode(1399),
            Err(DecodeError::UnknownOpcode {
                opcode: 99,
                instruction: 1399
            })
        );
    }

    #[test]
    fn digit_past_params_is_unknown() {
        // output takes one parameter; the second mode digit has no slot
        assert!(matches!(
            Instruction::decode(1104),
            Err(DecodeError::UnknownOpcode { opcode: 4, .. })
        ));
    }

    #[test]
    fn bad_mode_digit() {
        assert_eq!(
            Instruction::decode(301),
            Err(DecodeError::InvalidParameterMode { instruction: 301 })
        );
        assert_eq!(
            Instruction::decode(90001),
            Err(DecodeError::InvalidParameterMode { instruction: 90001 })
        );
    }

    #[test]
    fn display() {
        let ins = Instruction::decode(1105).unwrap();
        assert_eq!(ins.to_string(), "jump-if-true immediate, immediate");
        assert_eq!(Instruction::decode(99).unwrap().to_string(), "halt");
    }
}
