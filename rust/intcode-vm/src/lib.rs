//! Intcode VM — fetch/decode/execute engine for Intcode programs.

pub mod error;
pub mod io;
pub mod memory;
pub mod vm;

pub use error::{HookError, VmError};
pub use intcode_core::{Instruction, OpCode, ParamMode, Program, Word};
pub use io::{
    channel, ChannelInput, ChannelOutput, CollectOutput, InputSource, OutputSink, QueueInput,
};
pub use memory::Memory;
pub use vm::{run, StepOutcome, Vm, VmState};
