//! Fetch/decode/execute loop for Intcode programs.

mod operands;
mod ops;

use std::fmt;
use std::sync::Arc;

use intcode_core::{Instruction, Program, Word};
use tracing::{debug, trace, warn};

use crate::error::VmError;
use crate::io::{InputSource, OutputSink};
use crate::memory::{to_index, Memory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Running,
    Halted,
    Failed,
}

impl fmt::Display for VmState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VmState::Running => f.write_str("running"),
            VmState::Halted => f.write_str("halted"),
            VmState::Failed => f.write_str("failed"),
        }
    }
}

/// Result of executing one instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Halted,
}

/// What an opcode effect tells the loop to do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Halt,
}

/// An Intcode virtual machine.
///
/// Cloning a VM copies its program, memory and registers; the I/O hooks are
/// shared between the clones.
#[derive(Clone)]
pub struct Vm {
    program: Program,
    memory: Memory,
    position: usize,
    /// Last decoded instruction.
    instruction: Option<Instruction>,
    /// Set when the last instruction moved the program counter itself.
    jumped: bool,
    relative_base: Word,
    state: VmState,
    input: Option<Arc<dyn InputSource>>,
    output: Option<Arc<dyn OutputSink>>,
    instruction_count: u64,
    max_instructions: Option<u64>,
}

impl Vm {
    /// Create a VM with `program` copied into the start of `memory`.
    pub fn new(program: Program, mut memory: Memory) -> Self {
        memory.load(&program);
        debug!(
            program_len = program.len(),
            memory_len = memory.len(),
            growable = memory.is_growable(),
            "vm created"
        );
        Self {
            program,
            memory,
            position: 0,
            instruction: None,
            jumped: false,
            relative_base: 0,
            state: VmState::Running,
            input: None,
            output: None,
            instruction_count: 0,
            max_instructions: None,
        }
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Some(Arc::new(input));
        self
    }

    pub fn with_output(mut self, output: impl OutputSink + 'static) -> Self {
        self.output = Some(Arc::new(output));
        self
    }

    /// Stop with `InstructionLimitExceeded` once more than `max` instructions
    /// have been executed.
    pub fn with_instruction_limit(mut self, max: u64) -> Self {
        self.max_instructions = Some(max);
        self
    }

    pub fn set_input(&mut self, input: Option<Arc<dyn InputSource>>) {
        self.input = input;
    }

    pub fn set_output(&mut self, output: Option<Arc<dyn OutputSink>>) {
        self.output = output;
    }

    pub fn set_instruction_limit(&mut self, max: Option<u64>) {
        self.max_instructions = max;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Mutable memory, for patching a program before it runs.
    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn into_memory(self) -> Memory {
        self.memory
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn relative_base(&self) -> Word {
        self.relative_base
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    pub fn instruction(&self) -> Option<Instruction> {
        self.instruction
    }

    pub fn instruction_count(&self) -> u64 {
        self.instruction_count
    }

    /// Independent copy of the full machine state. Hooks are shared.
    pub fn snapshot(&self) -> Self {
        trace!(
            position = self.position,
            count = self.instruction_count,
            "vm snapshot"
        );
        self.clone()
    }

    /// Run until the program halts or fails.
    pub fn run(&mut self) -> Result<(), VmError> {
        while self.position <= self.memory.len() {
            if self.step()? == StepOutcome::Halted {
                return Ok(());
            }
        }
        let err = VmError::PositionOutOfBounds {
            position: self.position,
            len: self.memory.len(),
        };
        warn!(error = %err, "vm ran off the end of memory");
        self.state = VmState::Failed;
        Err(err)
    }

    /// Execute a single instruction.
    pub fn step(&mut self) -> Result<StepOutcome, VmError> {
        if self.state != VmState::Running {
            return Err(VmError::NotRunning(self.state));
        }
        match self.advance() {
            Ok(Flow::Continue) => Ok(StepOutcome::Continue),
            Ok(Flow::Halt) => {
                self.state = VmState::Halted;
                debug!(count = self.instruction_count, "vm halted");
                Ok(StepOutcome::Halted)
            }
            Err(err) => {
                self.state = VmState::Failed;
                warn!(position = self.position, error = %err, "vm failed");
                Err(err)
            }
        }
    }

    fn advance(&mut self) -> Result<Flow, VmError> {
        // The previous instruction's parameters are skipped here, at the start
        // of the next step, unless it jumped.
        if let Some(prev) = self.instruction {
            if !self.jumped {
                self.position += prev.param_count();
            }
        }
        self.jumped = false;

        self.instruction_count = self.instruction_count.saturating_add(1);
        if let Some(max) = self.max_instructions {
            if self.instruction_count > max {
                return Err(VmError::InstructionLimitExceeded(max));
            }
        }

        let word = self.memory.get(self.position)?;
        let instr = Instruction::decode(word)?;
        trace!(position = self.position, word, op = %instr.op(), "decoded");
        self.instruction = Some(instr);
        self.position += 1;

        self.execute(instr)
    }

    fn jump(&mut self, target: Word) -> Result<(), VmError> {
        self.position = to_index(target)?;
        self.jumped = true;
        Ok(())
    }
}

impl fmt::Debug for Vm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vm")
            .field("position", &self.position)
            .field("relative_base", &self.relative_base)
            .field("state", &self.state)
            .field("instruction", &self.instruction)
            .field("jumped", &self.jumped)
            .field("memory_len", &self.memory.len())
            .field("has_input", &self.input.is_some())
            .field("has_output", &self.output.is_some())
            .field("instruction_count", &self.instruction_count)
            .finish()
    }
}

/// Run `program` in `memory` with the given hooks.
///
/// The program is copied into the start of `memory` first. On return,
/// `memory` holds the final machine memory whether the run halted or failed.
pub fn run(
    program: &Program,
    memory: &mut Memory,
    input: Option<Arc<dyn InputSource>>,
    output: Option<Arc<dyn OutputSink>>,
) -> Result<(), VmError> {
    let mut vm = Vm::new(program.clone(), std::mem::take(memory));
    vm.set_input(input);
    vm.set_output(output);
    let result = vm.run();
    *memory = vm.into_memory();
    result
}
