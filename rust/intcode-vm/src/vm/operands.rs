//! Parameter resolution under position, immediate and relative modes.
//!
//! All lookups are relative to `self.position`, which during execution points
//! one past the opcode word, so parameter `i` lives at `position + i`.

use intcode_core::{Instruction, ParamMode, Word};

use super::Vm;
use crate::error::VmError;

impl Vm {
    /// Raw parameter word `index`.
    fn param(&self, index: usize) -> Result<Word, VmError> {
        self.memory.get(self.position + index)
    }

    fn relative_address(&self, raw: Word) -> Result<Word, VmError> {
        self.relative_base
            .checked_add(raw)
            .ok_or(VmError::AddressOverflow)
    }

    /// Value of parameter `index`.
    pub(super) fn mval(&self, instr: &Instruction, index: usize) -> Result<Word, VmError> {
        let raw = self.param(index)?;
        match instr.mode(index) {
            ParamMode::Position => self.memory.read(raw),
            ParamMode::Immediate => Ok(raw),
            ParamMode::Relative => self.memory.read(self.relative_address(raw)?),
        }
    }

    /// Write `value` to the address named by parameter `index`.
    pub(super) fn set(
        &mut self,
        instr: &Instruction,
        index: usize,
        value: Word,
    ) -> Result<(), VmError> {
        let raw = self.param(index)?;
        let address = match instr.mode(index) {
            ParamMode::Position => raw,
            ParamMode::Relative => self.relative_address(raw)?,
            ParamMode::Immediate => {
                return Err(VmError::ImmediateWrite {
                    instruction: instr.word(),
                })
            }
        };
        self.memory.write(address, value)
    }
}
