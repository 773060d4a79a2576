//! Running a program with line-oriented host I/O.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use intcode_core::{Program, Word};
use intcode_vm::{HookError, InputSource, Memory, OutputSink, QueueInput, Vm, VmError};
use parking_lot::Mutex;
use tracing::info;

use crate::config::IntcodeConfig;
use crate::error::CliError;

/// Input hook reading one integer per line. Blank lines are skipped.
pub struct LineInput<R> {
    reader: Mutex<R>,
}

impl<R: BufRead + Send> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

impl<R: BufRead + Send> InputSource for LineInput<R> {
    fn read(&self) -> Result<Word, HookError> {
        let mut reader = self.reader.lock();
        let mut line = String::new();
        loop {
            line.clear();
            let n = reader
                .read_line(&mut line)
                .map_err(|e| HookError::Failed(e.to_string()))?;
            if n == 0 {
                return Err(HookError::Exhausted);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return trimmed
                .parse()
                .map_err(|_| HookError::Failed(format!("not an integer: {:?}", trimmed)));
        }
    }
}

/// Output hook writing one integer per line.
pub struct LineOutput<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LineOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl<W: Write + Send> OutputSink for LineOutput<W> {
    fn write(&self, value: Word) -> Result<(), HookError> {
        let mut writer = self.writer.lock();
        writeln!(writer, "{}", value)
            .and_then(|_| writer.flush())
            .map_err(|e| HookError::Failed(e.to_string()))
    }
}

/// Outcome of one program run. Memory is kept even when the run failed.
#[derive(Debug)]
pub struct RunReport {
    pub memory: Memory,
    pub instructions: u64,
    pub result: Result<(), VmError>,
}

pub fn read_program(path: &Path) -> Result<Program, CliError> {
    let source = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Program::parse(&source)?)
}

/// Parse `--input 1,2,3` into a queue hook.
pub fn queue_input(values: &str) -> Result<QueueInput, CliError> {
    let words = Program::parse(values).map_err(CliError::Input)?;
    Ok(QueueInput::new(words.into_words()))
}

pub fn execute(
    program: Program,
    config: &IntcodeConfig,
    input: Arc<dyn InputSource>,
    output: Arc<dyn OutputSink>,
) -> RunReport {
    let mut vm = Vm::new(program, config.memory());
    vm.set_input(Some(input));
    vm.set_output(Some(output));
    vm.set_instruction_limit(config.max_instructions);

    let result = vm.run();
    let instructions = vm.instruction_count();
    info!(instructions, ok = result.is_ok(), "run finished");
    RunReport {
        memory: vm.into_memory(),
        instructions,
        result,
    }
}

/// Memory as a JSON array.
pub fn memory_json(memory: &Memory) -> Result<String, CliError> {
    Ok(serde_json::to_string(memory.as_slice())?)
}
