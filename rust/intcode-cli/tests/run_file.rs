//! Runner tests: program files on disk through the CLI library surface.

use std::path::PathBuf;
use std::sync::Arc;

use intcode_cli::runner::{execute, queue_input, read_program};
use intcode_cli::{CliError, IntcodeConfig};
use intcode_vm::{CollectOutput, QueueInput, VmError};

fn write_program(name: &str, text: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("intcode-cli-{}-{}", std::process::id(), name));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("program.txt");
    std::fs::write(&path, text).unwrap();
    path
}

#[test]
fn runs_program_file_with_queued_input() {
    let path = write_program("echo", "3,0,4,0,\n99\n");
    let program = read_program(&path).unwrap();
    let out = CollectOutput::new();
    let report = execute(
        program,
        &IntcodeConfig::default(),
        Arc::new(queue_input("42").unwrap()),
        Arc::new(out.clone()),
    );
    report.result.unwrap();
    assert_eq!(out.values(), vec![42]);
    assert_eq!(report.instructions, 3);
    assert_eq!(report.memory.len(), 4096);
    assert_eq!(report.memory.as_slice()[0], 42);
}

#[test]
fn instruction_limit_from_config() {
    let cfg = IntcodeConfig::from_toml("memory_size = 8\nmax_instructions = 100\n").unwrap();
    let path = write_program("loop", "1105,1,0");
    let report = execute(
        read_program(&path).unwrap(),
        &cfg,
        Arc::new(QueueInput::default()),
        Arc::new(CollectOutput::new()),
    );
    assert_eq!(report.result, Err(VmError::InstructionLimitExceeded(100)));
    assert_eq!(report.memory.len(), 8);
}

#[test]
fn growable_override_lets_small_memory_run() {
    let cfg = IntcodeConfig::default().with_overrides(Some(0), true, None);
    let path = write_program("grow", "1101,2,3,500,4,500,99");
    let out = CollectOutput::new();
    let report = execute(
        read_program(&path).unwrap(),
        &cfg,
        Arc::new(QueueInput::default()),
        Arc::new(out.clone()),
    );
    report.result.unwrap();
    assert_eq!(out.values(), vec![5]);
    assert_eq!(report.memory.len(), 501);
}

#[test]
fn fixed_memory_failure_keeps_memory() {
    let cfg = IntcodeConfig::default().with_overrides(Some(0), false, None);
    let path = write_program("fixed", "1101,2,3,500,99");
    let report = execute(
        read_program(&path).unwrap(),
        &cfg,
        Arc::new(QueueInput::default()),
        Arc::new(CollectOutput::new()),
    );
    assert!(report.result.unwrap_err().is_address_error());
    assert_eq!(report.memory.as_slice(), &[1101, 2, 3, 500, 99]);
}

#[test]
fn bad_program_file_is_a_parse_error() {
    let path = write_program("bad", "1,2,three");
    match read_program(&path) {
        Err(CliError::Parse(e)) => assert_eq!(e.index, 2),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn missing_file_is_a_read_error() {
    let err = read_program(&PathBuf::from("/nonexistent/intcode/program.txt")).unwrap_err();
    assert!(matches!(err, CliError::Read { .. }), "{:?}", err);
}
