//! Criterion benchmarks for the Intcode VM dispatch loop.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use intcode_vm::{CollectOutput, Memory, Program, Vm, Word};

/// Counts `n` down to zero: two instructions per iteration.
fn countdown(n: Word) -> Program {
    Program::new(vec![1101, 0, n, 100, 1001, 100, -1, 100, 1005, 100, 4, 99])
}

const QUINE: &str = "109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99";

fn bench_countdown(c: &mut Criterion) {
    let mut group = c.benchmark_group("countdown");
    for n in [1_000, 10_000, 100_000] {
        let program = countdown(n);
        group.throughput(Throughput::Elements((2 * n + 2) as u64));
        group.bench_with_input(BenchmarkId::new("instructions", n), &program, |b, p| {
            b.iter(|| {
                let mut vm = Vm::new(black_box(p.clone()), Memory::with_len(128));
                vm.run().expect("countdown halts");
                vm.instruction_count()
            });
        });
    }
    group.finish();
}

fn bench_quine(c: &mut Criterion) {
    let program = Program::parse(QUINE).expect("quine parses");
    c.bench_function("quine", |b| {
        b.iter(|| {
            let out = CollectOutput::new();
            let mut vm = Vm::new(program.clone(), Memory::with_len(128)).with_output(out.clone());
            vm.run().expect("quine halts");
            black_box(out.values())
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for len in [1_024, 65_536] {
        let vm = Vm::new(countdown(10), Memory::with_len(len));
        group.bench_with_input(BenchmarkId::new("memory_words", len), &vm, |b, vm| {
            b.iter(|| black_box(vm.snapshot()));
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let source = (0..10_000).map(|i| (i * 7 - 3000).to_string()).collect::<Vec<_>>().join(",");
    c.bench_function("parse_10k_words", |b| {
        b.iter(|| Program::parse(black_box(&source)).expect("parses"));
    });
}

criterion_group!(benches, bench_countdown, bench_quine, bench_snapshot, bench_parse);
criterion_main!(benches);
