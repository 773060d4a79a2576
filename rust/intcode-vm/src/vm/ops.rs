//! Opcode effects.

use intcode_core::{Instruction, OpCode, Word};

use super::{Flow, Vm};
use crate::error::VmError;

impl Vm {
    pub(super) fn execute(&mut self, instr: Instruction) -> Result<Flow, VmError> {
        match instr.op() {
            OpCode::Add => self.arith(&instr, Word::checked_add),
            OpCode::Mul => self.arith(&instr, Word::checked_mul),
            OpCode::Input => self.read_input(&instr),
            OpCode::Output => self.write_output(&instr),
            OpCode::JumpIfTrue => self.jump_if(&instr, |v| v != 0),
            OpCode::JumpIfFalse => self.jump_if(&instr, |v| v == 0),
            OpCode::LessThan => self.compare(&instr, |a, b| a < b),
            OpCode::Equals => self.compare(&instr, |a, b| a == b),
            OpCode::AdjustRelativeBase => {
                let delta = self.mval(&instr, 0)?;
                self.relative_base = self
                    .relative_base
                    .checked_add(delta)
                    .ok_or(VmError::ArithmeticOverflow)?;
                Ok(Flow::Continue)
            }
            OpCode::Halt => Ok(Flow::Halt),
        }
    }

    fn arith(
        &mut self,
        instr: &Instruction,
        op: fn(Word, Word) -> Option<Word>,
    ) -> Result<Flow, VmError> {
        let a = self.mval(instr, 0)?;
        let b = self.mval(instr, 1)?;
        let result = op(a, b).ok_or(VmError::ArithmeticOverflow)?;
        self.store(instr, result)?;
        Ok(Flow::Continue)
    }

    fn compare(
        &mut self,
        instr: &Instruction,
        pred: fn(Word, Word) -> bool,
    ) -> Result<Flow, VmError> {
        let a = self.mval(instr, 0)?;
        let b = self.mval(instr, 1)?;
        self.store(instr, Word::from(pred(a, b)))?;
        Ok(Flow::Continue)
    }

    fn jump_if(&mut self, instr: &Instruction, pred: fn(Word) -> bool) -> Result<Flow, VmError> {
        if pred(self.mval(instr, 0)?) {
            let target = self.mval(instr, 1)?;
            self.jump(target)?;
        }
        Ok(Flow::Continue)
    }

    fn read_input(&mut self, instr: &Instruction) -> Result<Flow, VmError> {
        let hook = self.input.clone().ok_or(VmError::MissingInputHook)?;
        let value = hook.read()?;
        self.store(instr, value)?;
        Ok(Flow::Continue)
    }

    /// Write `value` through the opcode's write parameter.
    fn store(&mut self, instr: &Instruction, value: Word) -> Result<(), VmError> {
        match instr.op().write_param() {
            Some(index) => self.set(instr, index, value),
            None => Ok(()),
        }
    }

    fn write_output(&mut self, instr: &Instruction) -> Result<Flow, VmError> {
        let hook = self.output.clone().ok_or(VmError::MissingOutputHook)?;
        let value = self.mval(instr, 0)?;
        hook.write(value)?;
        Ok(Flow::Continue)
    }
}
