//! Performance benchmarks for the text runtime stepping loop.
//!
//! Uses the stub engine so the numbers reflect cursor, encoder and scoring
//! overhead only.

use chat_htm::cursor::{CharCursor, WordCursor};
use chat_htm::encoders::{ScalarEncoder, ScalarEncoderParams, WordRowEncoder, WordRowEncoderParams};
use chat_htm::stubs::{PredictionPolicy, StubEngine};
use chat_htm::TextRuntime;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const CORPUS: &str = "It was the best of times, it was the worst of times, it was the age \
of wisdom, it was the age of foolishness, it was the epoch of belief, it was the epoch \
of incredulity, it was the season of Light, it was the season of Darkness.";

fn char_runtime(n: usize) -> TextRuntime<StubEngine> {
    let encoder = ScalarEncoder::new(ScalarEncoderParams {
        n,
        w: n / 20,
        min_val: 0,
        max_val: 127,
    })
    .unwrap();
    let cursor = CharCursor::from_text(CORPUS).unwrap();
    let engine = StubEngine::new(n, 1, PredictionPolicy::Always).without_history();
    TextRuntime::with_char_input(engine, cursor, encoder, "bench").unwrap()
}

fn bench_char_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("char_step");

    for n in [400usize, 2048] {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            let mut rt = char_runtime(n);
            b.iter(|| rt.step(black_box(1)).unwrap());
        });
    }

    group.finish();
}

fn bench_word_step(c: &mut Criterion) {
    c.bench_function("word_step", |b| {
        let encoder = WordRowEncoder::new(WordRowEncoderParams::default()).unwrap();
        let cursor = WordCursor::from_text(CORPUS).unwrap();
        let engine = StubEngine::new(encoder.total_bits(), 1, PredictionPolicy::Transition)
            .without_history();
        let mut rt = TextRuntime::with_word_input(engine, cursor, encoder, "bench").unwrap();
        b.iter(|| rt.step(black_box(1)).unwrap());
    });
}

fn bench_trace_line(c: &mut Criterion) {
    let mut rt = char_runtime(400);
    rt.step(50).unwrap();

    c.bench_function("trace_line", |b| {
        b.iter(|| black_box(rt.trace_line()));
    });
}

criterion_group!(benches, bench_char_step, bench_word_step, bench_trace_line);
criterion_main!(benches);
